//! Helpers for building rosters and roster files

use std::path::{Path, PathBuf};

use warbot::{Participant, Roster};

/// Write `content` as `battle.txt` inside `dir` and return its path
pub fn write_roster(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("battle.txt");
    std::fs::write(&path, content).unwrap();
    path
}

/// Build a roster from (name, alive) pairs
pub fn roster_of(entries: &[(&str, bool)]) -> Roster {
    Roster::from_participants(
        entries
            .iter()
            .map(|(name, alive)| Participant::with_status(*name, *alive))
            .collect(),
    )
    .unwrap()
}
