use thiserror::Error;

use crate::io::prompt::PromptError;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum ReconError {
    #[error("Scan stopped by the operator")]
    UserAbort,

    #[error("Interrupted by user")]
    Interrupted,

    #[error("Failed to read operator input: {0}")]
    Prompt(PromptError),
}

impl From<PromptError> for ReconError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Interrupted => Self::Interrupted,
            other => Self::Prompt(other),
        }
    }
}
