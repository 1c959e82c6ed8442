use thiserror::Error;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    HttpRequestError(#[from] reqwest::Error),

    #[error("Search engine challenge was not solved")]
    ChallengeUnsolved,

    #[error("Failed to parse JSON response: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Search API error: {0}")]
    Api(String),

    #[error("Interrupted by user")]
    Interrupted,
}
