use thiserror::Error;

use super::DorkCategory;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Dork catalog '{category}' unavailable: {reason}")]
    Unavailable {
        category: DorkCategory,
        reason: String,
    },

    #[error("Invalid template #{index} in dork catalog '{category}': {reason}")]
    InvalidTemplate {
        category: DorkCategory,
        index: usize,
        reason: String,
    },
}
