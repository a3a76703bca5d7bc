//! Round execution and periodic scheduling
//!
//! A round is: draw, persist the roster, render the status picture, post.
//! Only the draw can end a round early (game over). Persist, render and
//! post failures are logged and the round still counts.

use std::path::PathBuf;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use crate::battlefield::{Battlefield, Kill, Round};
use crate::client::{PostReceipt, Poster};
use crate::render::StatusRenderer;

/// Announcement text for a kill
pub fn status_text(kill: &Kill) -> String {
    let mut text = format!(
        "{} kills {} [{} remaining]",
        kill.killer.name(),
        kill.victim.name(),
        kill.remaining
    );
    if kill.ends_game() {
        text.push_str(". The game has ended");
    }
    text
}

/// What happened during one round
#[derive(Debug, Clone)]
pub enum RoundReport {
    /// A kill was drawn; the other steps are best effort
    Played {
        kill: Kill,
        text: String,
        persisted: bool,
        image: Option<PathBuf>,
        receipt: Option<PostReceipt>,
    },
    /// Fewer than two participants were alive, nothing was done
    GameOver,
}

impl RoundReport {
    pub fn is_game_over(&self) -> bool {
        matches!(self, RoundReport::GameOver)
    }
}

/// Owns a battlefield and the collaborators needed to play it out
pub struct RoundRunner {
    battlefield: Battlefield,
    renderer: Box<dyn StatusRenderer>,
    poster: Box<dyn Poster>,
}

impl RoundRunner {
    pub fn new(battlefield: Battlefield, renderer: Box<dyn StatusRenderer>, poster: Box<dyn Poster>) -> Self {
        Self {
            battlefield,
            renderer,
            poster,
        }
    }

    pub fn battlefield(&self) -> &Battlefield {
        &self.battlefield
    }

    pub fn battlefield_mut(&mut self) -> &mut Battlefield {
        &mut self.battlefield
    }

    pub fn into_battlefield(self) -> Battlefield {
        self.battlefield
    }

    /// Play a single round
    pub async fn run_round(&mut self) -> RoundReport {
        let span = tracing::info_span!("round", round_id = %Uuid::new_v4());
        async {
            let round = self.battlefield.fight();
            self.play(round).await
        }
        .instrument(span)
        .await
    }

    async fn play(&mut self, round: Round) -> RoundReport {
        let kill = match round {
            Round::Kill(kill) => kill,
            Round::GameOver => {
                info!(alive = self.battlefield.alive_count(), "Game is over, no round played");
                return RoundReport::GameOver;
            }
        };

        let persisted = match self.battlefield.persist() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Failed to persist roster");
                false
            }
        };

        let image = match self.battlefield.draw_table(self.renderer.as_ref()) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "Failed to render status table, posting without picture");
                None
            }
        };

        let text = status_text(&kill);
        let receipt = match self.poster.post(&text, image.as_deref()).await {
            Ok(receipt) => Some(receipt),
            Err(e) => {
                warn!(error = %e, text = %text, "Failed to post round");
                None
            }
        };

        info!(
            killer = %kill.killer,
            victim = %kill.victim,
            remaining = kill.remaining,
            posted = receipt.is_some(),
            "Round played"
        );

        RoundReport::Played {
            kill,
            text,
            persisted,
            image,
            receipt,
        }
    }

    /// Play rounds every `period` until fewer than two participants remain.
    ///
    /// The first round is played immediately. Returns the number of kills.
    pub async fn run_scheduled(&mut self, period: Duration) -> usize {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut kills = 0;

        info!(
            period_secs = period.as_secs(),
            alive = self.battlefield.alive_count(),
            "Starting scheduled rounds"
        );

        loop {
            ticker.tick().await;

            if self.run_round().await.is_game_over() {
                break;
            }
            kills += 1;

            if self.battlefield.is_over() {
                break;
            }
        }

        info!(kills = kills, alive = self.battlefield.alive_count(), "Game has ended");
        kills
    }
}
