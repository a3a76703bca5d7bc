//! Error types for warbot

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for warbot
#[derive(Debug, Clone, Error)]
pub enum WarbotError {
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Malformed file {} at line {line}: {message}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Failed to read {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Failed to write {}: {message}", .path.display())]
    WriteFailed { path: PathBuf, message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String, field: String },

    #[error("Credential error: {message}")]
    Credentials { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Network error: {source}")]
    Network {
        source: NetworkError,
        context: String,
    },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Network-specific error types
#[derive(Debug, Clone, Error)]
pub enum NetworkError {
    #[error("Request failed: {message}")]
    RequestFailed { message: String },

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },
}

impl WarbotError {
    /// Attach a context string to a network error
    pub fn network(source: NetworkError, context: &str) -> Self {
        WarbotError::Network {
            source,
            context: context.to_string(),
        }
    }

    /// Whether the error means the file simply was not there
    pub fn is_not_found(&self) -> bool {
        matches!(self, WarbotError::NotFound { .. })
    }
}

impl From<NetworkError> for WarbotError {
    fn from(err: NetworkError) -> Self {
        WarbotError::Network {
            source: err,
            context: String::new(),
        }
    }
}

impl From<reqwest::Error> for WarbotError {
    fn from(err: reqwest::Error) -> Self {
        let context = err.url().map(|u| u.to_string()).unwrap_or_default();
        WarbotError::Network {
            source: NetworkError::RequestFailed {
                message: err.to_string(),
            },
            context,
        }
    }
}

impl From<serde_json::Error> for WarbotError {
    fn from(err: serde_json::Error) -> Self {
        WarbotError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<image::ImageError> for WarbotError {
    fn from(err: image::ImageError) -> Self {
        WarbotError::Render {
            message: err.to_string(),
        }
    }
}

/// Type alias for the main result type used throughout the library
pub type WarbotResult<T> = Result<T, WarbotError>;

/// Logging configuration and initialization
pub mod logging {
    use tracing::Level;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};
    use std::env;

    /// Logging output format
    #[derive(Debug, Clone, PartialEq)]
    pub enum LogFormat {
        Human,
        Json,
    }

    /// Logging output destination
    #[derive(Debug, Clone, PartialEq)]
    pub enum LogOutput {
        Stdout,
        Stderr,
    }

    /// Logging configuration
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        pub level: Level,
        pub format: LogFormat,
        pub output: LogOutput,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::INFO,
                format: LogFormat::Human,
                output: LogOutput::Stderr,
            }
        }
    }

    /// Initialize structured logging with the given configuration
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let env_filter = EnvFilter::builder()
            .with_default_directive(config.level.into())
            .from_env_lossy()
            .add_directive("hyper=info".parse()?)
            .add_directive("reqwest=info".parse()?);

        let registry = tracing_subscriber::registry()
            .with(env_filter);

        match config.format {
            LogFormat::Human => {
                let fmt_layer = fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true);

                match config.output {
                    LogOutput::Stdout => registry.with(fmt_layer.with_writer(std::io::stdout)).try_init()?,
                    LogOutput::Stderr => registry.with(fmt_layer.with_writer(std::io::stderr)).try_init()?,
                }
            }
            LogFormat::Json => {
                let fmt_layer = fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_events(fmt::format::FmtSpan::CLOSE);

                match config.output {
                    LogOutput::Stdout => registry.with(fmt_layer.with_writer(std::io::stdout)).try_init()?,
                    LogOutput::Stderr => registry.with(fmt_layer.with_writer(std::io::stderr)).try_init()?,
                }
            }
        }

        Ok(())
    }

    /// Build a logging configuration from `WARBOT_LOG_*` environment variables
    pub fn config_from_env() -> LoggingConfig {
        let level = env::var("WARBOT_LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string())
            .parse::<Level>()
            .unwrap_or(Level::INFO);

        let format = match env::var("WARBOT_LOG_FORMAT").as_ref().map(|s| s.as_str()) {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Human,
        };

        let output = match env::var("WARBOT_LOG_OUTPUT").as_ref().map(|s| s.as_str()) {
            Ok("stdout") => LogOutput::Stdout,
            _ => LogOutput::Stderr,
        };

        LoggingConfig { level, format, output }
    }

    /// Initialize logging with environment-based configuration
    pub fn init_from_env() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        init_logging(config_from_env())
    }
}
