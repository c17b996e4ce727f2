// CLI module for img2text
// Author: kelexine (https://github.com/kelexine)

use crate::error::ExtractError;
use clap::Parser;
use std::path::{Path, PathBuf};

const SEPARATOR_WIDTH: usize = 50;

/// img2text - Extract text from an image with Gemini
#[derive(Parser, Debug)]
#[command(name = "img2text", version, about, long_about = None)]
pub struct Args {
    /// Path to the image file (png, jpg, jpeg, webp, gif)
    pub image: PathBuf,

    /// Gemini API key (defaults to config, then GEMINI_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Model identifier to use instead of the configured one
    #[arg(long)]
    pub model: Option<String>,

    /// Path to a TOML config file (default: ~/.img2text/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Render extracted text framed by separator lines.
pub fn format_success(text: &str) -> String {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    format!("Extracted Text:\n{separator}\n{text}\n{separator}")
}

/// Render a failure: missing files get their own message, everything else
/// is shown as `Error: <message>`.
pub fn format_failure(image: &Path, err: &ExtractError) -> String {
    if err.is_file_not_found() {
        format!("Error: Image file '{}' not found.", image.display())
    } else {
        format!("Error: {}", err)
    }
}
