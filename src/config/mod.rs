// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{ExtractError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments (highest, applied by the caller)
    /// 2. Environment variables (`IMG2TEXT_GEMINI__MODEL`, ...)
    /// 3. Config file
    /// 4. Defaults (lowest)
    ///
    /// An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::from(Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix("IMG2TEXT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ExtractError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ExtractError::Config(e.to_string()))
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".img2text")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut temp = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            temp,
            "[gemini]\nmodel = \"gemini-2.0-flash\"\ntimeout_seconds = 30\n\n[logging]\nformat = \"json\"\n"
        )
        .unwrap();

        let config = AppConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.gemini.timeout_seconds, Some(30));
        assert_eq!(config.logging.format, "json");
        // Untouched fields keep their defaults
        assert_eq!(config.gemini.prompt, DEFAULT_PROMPT);
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/img2text.toml")));
        assert!(matches!(result, Err(ExtractError::Config(_))));
    }
}
