//! Bounded participant roster and its line-oriented file format
//!
//! One participant per line. A leading `#` marks the participant dead.
//! Blank lines are skipped and are not preserved when the roster is saved.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use super::participant::{Participant, ParticipantId};
use crate::error::{WarbotError, WarbotResult};

/// Maximum number of participants a roster holds
pub const MAX_PARTICIPANTS: usize = 100;

/// Ordered list of participants with a running count of the living
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
    alive: usize,
}

impl Roster {
    /// Create an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from a list, rejecting lists over the capacity
    pub fn from_participants(participants: Vec<Participant>) -> WarbotResult<Self> {
        let mut roster = Self::new();
        roster.replace_all(participants)?;
        Ok(roster)
    }

    /// Replace every participant at once.
    ///
    /// Fails with `InvalidArgument` when the list holds more than
    /// [`MAX_PARTICIPANTS`] entries; the roster is left untouched in that case.
    pub fn replace_all(&mut self, participants: Vec<Participant>) -> WarbotResult<()> {
        if participants.len() > MAX_PARTICIPANTS {
            return Err(WarbotError::InvalidArgument {
                message: format!(
                    "The list can't contain more than {} participants (got {})",
                    MAX_PARTICIPANTS,
                    participants.len()
                ),
            });
        }

        self.alive = participants.iter().filter(|p| p.is_alive()).count();
        self.participants = participants;
        Ok(())
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, &Participant)> {
        self.participants
            .iter()
            .enumerate()
            .map(|(i, p)| (ParticipantId(i), p))
    }

    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Number of participants still alive
    pub fn alive_count(&self) -> usize {
        self.alive
    }

    /// Ids of the living participants, in roster order
    pub fn alive_ids(&self) -> Vec<ParticipantId> {
        self.iter()
            .filter(|(_, p)| p.is_alive())
            .map(|(id, _)| id)
            .collect()
    }

    /// Mark a participant dead and keep the alive count in step.
    /// Returns false if the id is unknown or the participant was already dead.
    pub(crate) fn kill(&mut self, id: ParticipantId) -> bool {
        let killed = self
            .participants
            .get_mut(id.index())
            .map_or(false, Participant::kill);
        if killed {
            self.alive -= 1;
        }
        killed
    }

    /// Append a parsed participant. Returns false once the roster is full.
    fn push(&mut self, participant: Participant) -> bool {
        if self.participants.len() >= MAX_PARTICIPANTS {
            return false;
        }
        if participant.is_alive() {
            self.alive += 1;
        }
        self.participants.push(participant);
        true
    }

    /// Parse a roster from any buffered reader
    pub fn from_reader<R: BufRead>(reader: R) -> WarbotResult<Self> {
        let mut roster = Self::new();
        roster.read_lines(reader, Path::new("<reader>"))?;
        Ok(roster)
    }

    /// Load a roster file.
    ///
    /// A missing file is `NotFound`, content that is not UTF-8 is
    /// `Malformed`, any other I/O failure is `Read`.
    pub fn load(path: impl AsRef<Path>) -> WarbotResult<Self> {
        let mut roster = Self::new();
        roster.read_path(path.as_ref())?;
        Ok(roster)
    }

    /// Load a roster file, logging failures instead of returning them.
    ///
    /// Whatever was parsed before an error is kept, so a missing file gives
    /// an empty roster and a read error midway gives a partial one.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut roster = Self::new();
        if let Err(e) = roster.read_path(path) {
            warn!(
                path = %path.display(),
                error = %e,
                loaded = roster.len(),
                "Could not load roster, continuing with what was read"
            );
        }
        roster
    }

    fn read_path(&mut self, path: &Path) -> WarbotResult<()> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => WarbotError::NotFound { path: path.to_path_buf() },
            _ => WarbotError::Read {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        })?;
        self.read_lines(BufReader::new(file), path)
    }

    fn read_lines<R: BufRead>(&mut self, reader: R, source: &Path) -> WarbotResult<()> {
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| match e.kind() {
                io::ErrorKind::InvalidData => WarbotError::Malformed {
                    path: source.to_path_buf(),
                    line: index + 1,
                    message: e.to_string(),
                },
                _ => WarbotError::Read {
                    path: source.to_path_buf(),
                    message: e.to_string(),
                },
            })?;

            let Some(participant) = Participant::from_line(&line) else {
                continue;
            };

            if !self.push(participant) {
                warn!(
                    path = %source.display(),
                    line = index + 1,
                    max = MAX_PARTICIPANTS,
                    "Roster is full, ignoring the remaining lines"
                );
                break;
            }
        }

        debug!(
            path = %source.display(),
            participants = self.len(),
            alive = self.alive,
            "Roster loaded"
        );
        Ok(())
    }

    /// Write the roster in file format to any writer
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for p in &self.participants {
            writeln!(writer, "{}", p.to_line())?;
        }
        writer.flush()
    }

    /// Roster rendered in file format
    pub fn to_text(&self) -> String {
        self.participants
            .iter()
            .map(|p| p.to_line() + "\n")
            .collect()
    }

    /// Overwrite `path` with the roster.
    ///
    /// Not atomic: a failure midway leaves a partially written file.
    pub fn save(&self, path: impl AsRef<Path>) -> WarbotResult<()> {
        let path = path.as_ref();
        let write_failed = |e: io::Error| WarbotError::WriteFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let file = File::create(path).map_err(write_failed)?;
        self.write_to(BufWriter::new(file)).map_err(write_failed)?;

        debug!(
            path = %path.display(),
            participants = self.len(),
            alive = self.alive,
            "Roster saved"
        );
        Ok(())
    }
}
