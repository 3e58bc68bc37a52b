use std::path::PathBuf;
use std::str::FromStr;
use anyhow::{Context, Result};
use simplelog::LevelFilter;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://iulms.edu.pk";

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub credentials: Credentials,
    // Saved registration page to extract instead of logging in.
    pub html_file: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Config {
    // Reads the configuration from environment variables. Missing credentials are
    // left empty so the session can report them as a validation error.
    pub fn from_env() -> Result<Config> {
        let base_url = std::env::var("PORTAL_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url).with_context(|| format!("PORTAL_BASE_URL is not a valid URL: {}", base_url))?;

        let log_level = match std::env::var("LOG_LEVEL") {
            Ok(level) => LevelFilter::from_str(&level).map_err(|_| anyhow::anyhow!("LOG_LEVEL is not a valid level: {}", level))?,
            Err(_) => LevelFilter::Info,
        };

        Ok(Config {
            base_url,
            credentials: Credentials {
                username: std::env::var("PORTAL_USERNAME").unwrap_or_default(),
                password: std::env::var("PORTAL_PASSWORD").unwrap_or_default(),
            },
            html_file: std::env::var_os("PORTAL_HTML_FILE").map(PathBuf::from),
            log_level,
        })
    }
}
