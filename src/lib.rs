//! warbot - a battle royale bot
//!
//! A roster of named participants is kept in a flat text file. Every round
//! one random living participant is killed by another, the roster file is
//! rewritten, a status table picture is rendered and the kill is posted:
//! - `battlefield`: roster file format, elimination draw
//! - `render`: status table layout and raster rendering
//! - `client`: credentials, OAuth signing and the posting clients
//! - `scheduler`: one round end to end, and the periodic loop

pub mod battlefield;
pub mod client;
pub mod config;
pub mod error;
pub mod render;
pub mod scheduler;

// Re-export commonly used types for convenience
pub use error::{NetworkError, WarbotError, WarbotResult};

pub use battlefield::{
    draw_round, draw_round_with, Battlefield, Kill, Participant, ParticipantId, Roster, Round,
    MAX_PARTICIPANTS,
};

pub use render::{ImageFormat, StatusRenderer, TableLayout, TableRenderer};

pub use client::{Credentials, DryRunPoster, OAuthKeys, PostReceipt, Poster, TwitterClient};

pub use config::{BattlefieldConfig, RenderConfig, ScheduleConfig, TwitterConfig, WarbotConfig};

pub use scheduler::{status_text, RoundReport, RoundRunner};
