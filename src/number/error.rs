use thiserror::Error;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NumberError {
    #[error("Not a valid phone number: {0}")]
    InvalidNumber(String),

    #[error("Unable to parse {input}: {reason}")]
    Unparseable { input: String, reason: String },

    #[error("Country code {country_code} is not a prefix of {number}")]
    Inconsistent { number: String, country_code: String },

    #[error("Missing country for {0}")]
    MissingCountry(String),
}
