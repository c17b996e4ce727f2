//! Structured logging and security-focused trace utilities.
//!
//! This module configures the `tracing` ecosystem for the application and
//! provides helpers that keep API keys and bulky image payloads out of logs.
//! All log output goes to stderr; stdout is reserved for extracted text.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{ExtractError, Result};
use regex::{Captures, Regex};
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for machine ingestion.
/// - `pretty`: Multi-line, human-readable output.
/// - `compact` (default): One line per event.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ExtractError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let fmt = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let result = match config.format.as_str() {
        "json" => registry.with(fmt.json()).try_init(),
        "pretty" => registry.with(fmt.pretty()).try_init(),
        _ => registry.with(fmt.compact()).try_init(),
    };

    result.map_err(|e| ExtractError::Internal(format!("Failed to initialize logging: {}", e)))
}

fn api_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"AIza[0-9A-Za-z_\-]{20,}").expect("valid regex"))
}

fn bearer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"(?i)bearer\s+[^\s"']+"#).expect("valid regex"))
}

fn data_uri_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"data:([A-Za-z]+/[A-Za-z0-9.+\-]+);base64,([A-Za-z0-9+/=]*)").expect("valid regex")
    })
}

/// Sanitizes sensitive information from log messages.
///
/// Replaces Google API keys (`AIza...`) and bearer tokens with
/// `\[REDACTED\]` placeholders.
pub fn sanitize(input: &str) -> String {
    let result = api_key_pattern().replace_all(input, "[REDACTED_API_KEY]");
    bearer_pattern()
        .replace_all(&result, "Bearer [REDACTED_TOKEN]")
        .into_owned()
}

/// Shortens inline `data:` URIs to their MIME type and payload length.
pub fn abbreviate_data_uris(input: &str) -> String {
    data_uri_pattern()
        .replace_all(input, |caps: &Captures| {
            format!("data:{};base64,<{} chars>", &caps[1], caps[2].len())
        })
        .into_owned()
}
