//! Posting clients for round announcements

pub mod credentials;
pub mod oauth;
pub mod twitter;

pub use credentials::{Credentials, OAuthKeys};
pub use twitter::TwitterClient;

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::WarbotResult;

/// Identifier of a published post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostReceipt {
    pub id: String,
}

/// Something that can publish a text message with an optional picture
#[async_trait]
pub trait Poster: Send + Sync {
    async fn post(&self, text: &str, image: Option<&Path>) -> WarbotResult<PostReceipt>;
}

/// Poster that only logs what it would publish
#[derive(Debug, Clone, Default)]
pub struct DryRunPoster;

#[async_trait]
impl Poster for DryRunPoster {
    async fn post(&self, text: &str, image: Option<&Path>) -> WarbotResult<PostReceipt> {
        info!(
            text = text,
            image = ?image,
            "Dry run, not posting"
        );
        Ok(PostReceipt { id: "dry-run".to_string() })
    }
}
