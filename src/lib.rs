pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use error::ScrapeError;
pub use models::{AcademicRecord, ScrapeResponse};
pub use utils::portal::retrieve_registration_page;
pub use utils::record::extract_record;
