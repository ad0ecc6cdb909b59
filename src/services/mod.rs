// Service exports
pub mod loader;

pub use loader::{load_request, load_score_rows, load_survey, LoaderError};
