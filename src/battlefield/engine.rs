//! Elimination draw: one random victim and one random killer per round

use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::participant::{Participant, ParticipantId};
use super::roster::Roster;

/// Outcome of one elimination draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Round {
    Kill(Kill),
    /// Fewer than two participants were alive; nothing changed
    GameOver,
}

impl Round {
    pub fn is_game_over(&self) -> bool {
        matches!(self, Round::GameOver)
    }

    pub fn kill(&self) -> Option<&Kill> {
        match self {
            Round::Kill(kill) => Some(kill),
            Round::GameOver => None,
        }
    }
}

/// A killer/victim pairing produced by a draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kill {
    pub killer_id: ParticipantId,
    pub killer: Participant,
    pub victim_id: ParticipantId,
    /// Snapshot taken after the victim was marked dead
    pub victim: Participant,
    /// Participants still alive after this kill
    pub remaining: usize,
}

impl Kill {
    /// Whether this kill left fewer than two participants standing
    pub fn ends_game(&self) -> bool {
        self.remaining < 2
    }
}

/// Draw one round using the operating system's CSPRNG
pub fn draw_round(roster: &mut Roster) -> Round {
    draw_round_with(roster, &mut OsRng)
}

/// Draw one round with the given cryptographically secure generator.
///
/// The victim is drawn uniformly from the living participants and marked
/// dead; the killer is then drawn uniformly from those still alive, so the
/// two are always different.
pub fn draw_round_with<R>(roster: &mut Roster, rng: &mut R) -> Round
where
    R: Rng + CryptoRng,
{
    if roster.alive_count() < 2 {
        return Round::GameOver;
    }

    let mut surviving = roster.alive_ids();

    let victim_id = surviving.remove(rng.gen_range(0..surviving.len()));
    let killer_id = surviving[rng.gen_range(0..surviving.len())];

    // Snapshot both before mutating so a miss leaves the roster as it was
    let (Some(killer), Some(mut victim)) = (
        roster.get(killer_id).cloned(),
        roster.get(victim_id).cloned(),
    ) else {
        return Round::GameOver;
    };

    roster.kill(victim_id);
    victim.kill();

    let kill = Kill {
        killer_id,
        killer,
        victim_id,
        victim,
        remaining: roster.alive_count(),
    };

    debug!(
        killer = %kill.killer,
        killer_id = %killer_id,
        victim = %kill.victim,
        victim_id = %victim_id,
        remaining = kill.remaining,
        "Drew round"
    );

    Round::Kill(kill)
}
