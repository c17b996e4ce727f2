// img2text - Extract text from images with Gemini
// Author: kelexine (https://github.com/kelexine)

pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod models;
pub mod utils;
pub mod vision;

pub use error::{ExtractError, Result};
pub use gemini::{ApiKey, ExtractionClient};
