//! Configuration data structures for img2text.
//!
//! This module defines the schema for the application settings: the
//! upstream Gemini endpoint and logging output.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Environment variable consulted when no key is configured explicitly.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Instruction sent alongside every image.
pub const DEFAULT_PROMPT: &str =
    "Extract all text from this image. Return only the text content, nothing else.";

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Upstream Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the upstream Gemini API connection.
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL of the OpenAI-compatible API; `/chat/completions` is appended.
    /// Default: `https://generativelanguage.googleapis.com/v1beta/openai`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Model identifier sent with every request.
    /// Default: `gemini-1.5-flash`
    #[serde(default = "default_model")]
    pub model: String,

    /// Instruction text placed before the image.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// API key. When unset, `GEMINI_API_KEY` is read at client construction.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Whole-request timeout in seconds. Unset or `0` means no timeout.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl GeminiConfig {
    /// Pick the credential to use: configured key first, then `env_value`.
    ///
    /// Blank values are treated as absent.
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| env_value.filter(|k| !k.trim().is_empty()))
    }

    /// Request timeout to apply, if any. `0` is treated like unset.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Same as [`resolve_api_key`](Self::resolve_api_key) using the process environment.
    pub fn resolve_api_key_from_env(&self) -> Option<String> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }
}

// Custom Debug impl that never logs the key
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_base_url", &self.api_base_url)
            .field("model", &self.model)
            .field("prompt", &self.prompt)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `warn`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `compact`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            model: default_model(),
            prompt: default_prompt(),
            api_key: None,
            timeout_seconds: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/openai".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}
