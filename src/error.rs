use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid credentials")]
    Authentication,
    #[error("Failed to parse document: {0}")]
    Parse(String),
    #[error(transparent)]
    Request(#[from] anyhow::Error),
}

impl ScrapeError {
    // HTTP status a hosting wrapper answers with for this kind of failure. A wrong
    // request method (405) is rejected by the wrapper itself before any scraping.
    pub fn status_code(&self) -> u16 {
        match self {
            ScrapeError::Validation(_) => 400,
            ScrapeError::Authentication => 401,
            ScrapeError::Parse(_) | ScrapeError::Request(_) => 500,
        }
    }
}
