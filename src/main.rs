// img2text - Extract text from images with Gemini
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use img2text::cli::{self, Args};
use img2text::config::AppConfig;
use img2text::gemini::ExtractionClient;
use img2text::utils::logging;
use std::process::ExitCode;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration, CLI flags take precedence
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(model) = args.model.clone() {
        config.gemini.model = model;
    }

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting img2text v{}", env!("CARGO_PKG_VERSION"));
    debug!("Effective configuration: {:?}", config);

    // Phase 3: Build client and run the extraction
    let mut client = ExtractionClient::new(&config.gemini)?;
    let result = client
        .extract_with_key(&args.image, args.api_key.as_deref())
        .await;

    match result {
        Ok(text) => {
            println!("{}", cli::format_success(&text));
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            println!("{}", cli::format_failure(&args.image, &err));
            Ok(ExitCode::FAILURE)
        }
    }
}
