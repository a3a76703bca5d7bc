//! Participants and their stable identifiers

use std::fmt;
use serde::{Deserialize, Serialize};

/// Position of a participant inside its roster.
///
/// Ids are assigned on load and on bulk replace and stay valid until the
/// roster is replaced again. The engine finds victims by id, so two
/// participants with the same name and status are never confused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub usize);

impl ParticipantId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A contender on the battlefield
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    name: String,
    alive: bool,
}

impl Participant {
    /// Create a living participant
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alive: true,
        }
    }

    /// Create a participant with an explicit status
    pub fn with_status(name: impl Into<String>, alive: bool) -> Self {
        Self {
            name: name.into(),
            alive,
        }
    }

    /// Create a participant that is already dead
    pub fn dead(name: impl Into<String>) -> Self {
        Self::with_status(name, false)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark the participant dead. Returns false if it already was.
    pub fn kill(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }

    /// Line written to the roster file for this participant
    pub fn to_line(&self) -> String {
        if self.alive {
            self.name.clone()
        } else {
            format!("# {}", self.name)
        }
    }

    /// Parse one roster line. Blank lines yield `None`.
    pub fn from_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match line.strip_prefix('#') {
            Some(rest) => Some(Self::dead(rest.trim())),
            None => Some(Self::new(line)),
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
