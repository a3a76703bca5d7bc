//! The battlefield: a roster bound to its file and picture directory

pub mod engine;
pub mod participant;
pub mod roster;

pub use engine::{draw_round, draw_round_with, Kill, Round};
pub use participant::{Participant, ParticipantId};
pub use roster::{Roster, MAX_PARTICIPANTS};

use std::path::{Path, PathBuf};

use rand::{CryptoRng, Rng};
use tracing::info;

use crate::config::BattlefieldConfig;
use crate::error::WarbotResult;
use crate::render::{picture_file_name, StatusRenderer};

/// A roster together with the file it is persisted to and the directory
/// generated pictures are written to
#[derive(Debug, Clone)]
pub struct Battlefield {
    roster: Roster,
    roster_path: PathBuf,
    picture_dir: PathBuf,
}

impl Battlefield {
    /// Open a battlefield whose pictures go next to the roster file.
    ///
    /// Load failures are logged and leave an empty (or partial) roster.
    pub fn open(roster_path: impl Into<PathBuf>) -> Self {
        let roster_path = roster_path.into();
        let picture_dir = default_picture_dir(&roster_path);
        Self::open_with_picture_dir(roster_path, picture_dir)
    }

    /// Open a battlefield with an explicit picture directory
    pub fn open_with_picture_dir(roster_path: impl Into<PathBuf>, picture_dir: impl Into<PathBuf>) -> Self {
        let roster_path = roster_path.into();
        let roster = Roster::load_or_empty(&roster_path);

        info!(
            path = %roster_path.display(),
            participants = roster.len(),
            alive = roster.alive_count(),
            "Battlefield opened"
        );

        Self {
            roster,
            roster_path,
            picture_dir: picture_dir.into(),
        }
    }

    /// Open the battlefield described by a config section
    pub fn from_config(config: &BattlefieldConfig) -> Self {
        match &config.picture_dir {
            Some(dir) => Self::open_with_picture_dir(&config.roster_path, dir),
            None => Self::open(&config.roster_path),
        }
    }

    /// Build a battlefield around an in-memory roster without touching disk
    pub fn with_roster(roster: Roster, roster_path: impl Into<PathBuf>, picture_dir: impl Into<PathBuf>) -> Self {
        Self {
            roster,
            roster_path: roster_path.into(),
            picture_dir: picture_dir.into(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn participants(&self) -> &[Participant] {
        self.roster.participants()
    }

    pub fn alive_count(&self) -> usize {
        self.roster.alive_count()
    }

    /// Whether fewer than two participants remain
    pub fn is_over(&self) -> bool {
        self.roster.alive_count() < 2
    }

    /// Replace all participants. Lists over the capacity are rejected.
    pub fn set_participants(&mut self, participants: Vec<Participant>) -> WarbotResult<()> {
        self.roster.replace_all(participants)
    }

    pub fn roster_path(&self) -> &Path {
        &self.roster_path
    }

    pub fn set_roster_path(&mut self, path: impl Into<PathBuf>) {
        self.roster_path = path.into();
    }

    pub fn picture_dir(&self) -> &Path {
        &self.picture_dir
    }

    /// Re-read the roster file, replacing the in-memory roster.
    ///
    /// On failure the current roster is kept and the error returned.
    pub fn reload(&mut self) -> WarbotResult<()> {
        self.roster = Roster::load(&self.roster_path)?;
        Ok(())
    }

    /// Write the roster back to its file
    pub fn persist(&self) -> WarbotResult<()> {
        self.roster.save(&self.roster_path)
    }

    /// Draw one round with the OS CSPRNG
    pub fn fight(&mut self) -> Round {
        draw_round(&mut self.roster)
    }

    /// Draw one round with a caller-supplied CSPRNG
    pub fn fight_with<R: Rng + CryptoRng>(&mut self, rng: &mut R) -> Round {
        draw_round_with(&mut self.roster, rng)
    }

    /// Path of the status picture for the current alive count
    pub fn picture_path(&self, extension: &str) -> PathBuf {
        self.picture_dir
            .join(picture_file_name(self.roster.alive_count(), extension))
    }

    /// Render the status table into the picture directory
    pub fn draw_table(&self, renderer: &dyn StatusRenderer) -> WarbotResult<PathBuf> {
        let path = self.picture_path(renderer.extension());
        renderer.render(&self.roster, &path)?;
        Ok(path)
    }
}

fn default_picture_dir(roster_path: &Path) -> PathBuf {
    match roster_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
