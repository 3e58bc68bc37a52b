use std::process::ExitCode;
use anyhow::Context;
use dotenv::dotenv;
use log::{error, info};
use simplelog::{ColorChoice, Config as LogConfig, TermLogger, TerminalMode};
use registration_scraper::config::Config;
use registration_scraper::{extract_record, retrieve_registration_page, AcademicRecord, ScrapeError, ScrapeResponse};

// Fetches the registration page (or reads a saved copy) and extracts the record.
async fn run(config: &Config) -> Result<AcademicRecord, ScrapeError> {
    let markup = match &config.html_file {
        Some(path) => {
            info!("Reading registration page from {}", path.display());
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => retrieve_registration_page(&config.base_url, &config.credentials).await?,
    };

    extract_record(&markup)
}

// Entry point for the async main function, powered by tokio runtime.
#[tokio::main]
async fn main() -> ExitCode {
    // Loads environment variables from a `.env` file, if present.
    dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr, stdout carries only the JSON response.
    if let Err(e) = TermLogger::init(config.log_level, LogConfig::default(), TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let (response, code) = match run(&config).await {
        Ok(record) => {
            info!("Registration record extracted: {} semesters", record.semesters.len());
            (ScrapeResponse::success(record), ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("Error extracting registration record ({}): {:#}", e.status_code(), e);
            (ScrapeResponse::failure(e.to_string()), ExitCode::FAILURE)
        }
    };

    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            return ExitCode::FAILURE;
        }
    }

    code
}
