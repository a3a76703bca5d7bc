//! Twitter API client: media upload followed by a post carrying the media id

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::credentials::{Credentials, OAuthKeys};
use super::{oauth, PostReceipt, Poster};
use crate::config::TwitterConfig;
use crate::error::{NetworkError, WarbotError, WarbotResult};

#[derive(Debug, Deserialize)]
struct MediaUploadResponse {
    media_id_string: String,
}

#[derive(Debug, Deserialize)]
struct CreatePostResponse {
    data: CreatedPost,
}

#[derive(Debug, Deserialize)]
struct CreatedPost {
    id: String,
}

/// OAuth 1.0a authenticated Twitter client
#[derive(Debug, Clone)]
pub struct TwitterClient {
    http: reqwest::Client,
    keys: OAuthKeys,
    api_base: String,
    upload_base: String,
}

impl TwitterClient {
    pub fn new(keys: OAuthKeys, config: &TwitterConfig) -> WarbotResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            keys,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            upload_base: config.upload_base.trim_end_matches('/').to_string(),
        })
    }

    /// Read the credential file named in the config and build a client.
    /// Fails if any of the four keys is missing.
    pub fn from_config(config: &TwitterConfig) -> WarbotResult<Self> {
        let keys = Credentials::from_file(&config.credentials_path).oauth_keys()?;
        Self::new(keys, config)
    }

    pub fn media_upload_url(&self) -> String {
        format!("{}/1.1/media/upload.json", self.upload_base)
    }

    pub fn create_post_url(&self) -> String {
        format!("{}/2/tweets", self.api_base)
    }

    fn authorization(&self, method: &str, url: &str) -> WarbotResult<String> {
        oauth::authorization_header(&self.keys, method, url, &[], &oauth::nonce(), Utc::now().timestamp())
    }

    /// Upload a picture and return its media id
    pub async fn upload_media(&self, path: &Path) -> WarbotResult<String> {
        let bytes = tokio::fs::read(path).await.map_err(|e| WarbotError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "status".to_string());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_for(path))?;
        let form = Form::new().part("media", part);

        let url = self.media_upload_url();
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.authorization("POST", &url)?)
            .multipart(form)
            .send()
            .await?;

        let body: MediaUploadResponse = read_json(response, "media_upload").await?;
        debug!(media_id = %body.media_id_string, path = %path.display(), "Uploaded media");
        Ok(body.media_id_string)
    }

    /// Publish a post with the given media attached
    pub async fn create_post(&self, text: &str, media_ids: &[String]) -> WarbotResult<PostReceipt> {
        let url = self.create_post_url();
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.authorization("POST", &url)?)
            .json(&post_body(text, media_ids))
            .send()
            .await?;

        let body: CreatePostResponse = read_json(response, "create_post").await?;
        info!(post_id = %body.data.id, "Posted status");
        Ok(PostReceipt { id: body.data.id })
    }
}

#[async_trait]
impl Poster for TwitterClient {
    async fn post(&self, text: &str, image: Option<&Path>) -> WarbotResult<PostReceipt> {
        let media_ids = match image {
            Some(path) => vec![self.upload_media(path).await?],
            None => Vec::new(),
        };
        self.create_post(text, &media_ids).await
    }
}

/// JSON body of a post request
pub fn post_body(text: &str, media_ids: &[String]) -> serde_json::Value {
    if media_ids.is_empty() {
        json!({ "text": text })
    } else {
        json!({ "text": text, "media": { "media_ids": media_ids } })
    }
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(response: reqwest::Response, context: &str) -> WarbotResult<T> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(WarbotError::network(
            NetworkError::Status {
                status: status.as_u16(),
                body: text,
            },
            context,
        ));
    }

    serde_json::from_str(&text).map_err(|e| {
        WarbotError::network(
            NetworkError::InvalidResponse {
                message: format!("{}: {}", e, text),
            },
            context,
        )
    })
}
