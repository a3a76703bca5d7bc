//! OAuth 1.0a request signing (HMAC-SHA1)

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::RngCore;
use sha1::Sha1;

use super::credentials::OAuthKeys;
use crate::error::{WarbotError, WarbotResult};

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters stay as they are
const OAUTH_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE).to_string()
}

/// Random hex nonce
pub fn nonce() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Compute the `oauth_signature` for a request.
///
/// `params` holds every oauth_* parameter plus any query or form parameters
/// that are part of the request; JSON and multipart bodies are not signed.
pub fn signature(
    method: &str,
    url: &str,
    params: &[(String, String)],
    consumer_secret: &str,
    token_secret: &str,
) -> WarbotResult<String> {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let base = format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(url),
        percent_encode(&param_string)
    );
    let key = format!("{}&{}", percent_encode(consumer_secret), percent_encode(token_secret));

    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).map_err(|e| WarbotError::Credentials {
        message: format!("HMAC error: {}", e),
    })?;
    mac.update(base.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Build the `Authorization` header value for a request
pub fn authorization_header(
    keys: &OAuthKeys,
    method: &str,
    url: &str,
    extra_params: &[(String, String)],
    nonce: &str,
    timestamp: i64,
) -> WarbotResult<String> {
    let mut oauth_params = vec![
        ("oauth_consumer_key".to_string(), keys.consumer_key.clone()),
        ("oauth_nonce".to_string(), nonce.to_string()),
        ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
        ("oauth_timestamp".to_string(), timestamp.to_string()),
        ("oauth_token".to_string(), keys.access_key.clone()),
        ("oauth_version".to_string(), "1.0".to_string()),
    ];

    let mut all_params = oauth_params.clone();
    all_params.extend_from_slice(extra_params);
    let sig = signature(method, url, &all_params, &keys.consumer_secret, &keys.access_secret)?;
    oauth_params.push(("oauth_signature".to_string(), sig));

    let fields = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!("OAuth {}", fields))
}
