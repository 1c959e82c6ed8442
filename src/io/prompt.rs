use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::{io::interrupt::Interrupt, log_question};

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Interactive prompts are unavailable")]
    Unavailable,

    #[error("Interrupted by user")]
    Interrupted,

    #[error("Failed to read operator input: {0}")]
    Io(#[from] io::Error),
}

/// Source of operator answers for the interactive checkpoints of a scan.
pub trait Prompter {
    fn is_interactive(&self) -> bool {
        true
    }

    /// Shows `question` and returns the trimmed answer.
    fn ask(&mut self, question: &str) -> Result<String, PromptError>;
}

pub struct TerminalPrompter {
    interrupt: Interrupt,
}

impl TerminalPrompter {
    pub const fn new(interrupt: Interrupt) -> Self {
        Self { interrupt }
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        log_question!(question);
        io::stdout().flush()?;

        let mut line = String::new();
        let read = {
            let _guard = self.interrupt.awaiting_input();
            io::stdin().lock().read_line(&mut line)?
        };

        if self.interrupt.is_set() {
            return Err(PromptError::Interrupted);
        }
        // stdin closed, nobody is left to answer
        if read == 0 {
            return Err(PromptError::Unavailable);
        }

        Ok(line.trim().to_string())
    }
}

/// Used when results are redirected to a file: every prompt is unavailable.
pub struct NonInteractivePrompter;

impl Prompter for NonInteractivePrompter {
    fn is_interactive(&self) -> bool {
        false
    }

    fn ask(&mut self, _question: &str) -> Result<String, PromptError> {
        Err(PromptError::Unavailable)
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

pub fn is_negative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "n" | "no")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affirmative_answers() {
        for answer in ["y", "Y", "yes", "YES", " yes "] {
            assert!(is_affirmative(answer), "{answer}");
        }
        for answer in ["", "n", "yep", "no"] {
            assert!(!is_affirmative(answer), "{answer}");
        }
    }

    #[test]
    fn negative_answers() {
        assert!(is_negative("N"));
        assert!(is_negative("no"));
        assert!(!is_negative(""));
        assert!(!is_negative("y"));
    }

    #[test]
    fn non_interactive_prompter_never_answers() {
        let mut prompter = NonInteractivePrompter;
        assert!(!prompter.is_interactive());
        assert!(matches!(
            prompter.ask("Continue scanning ? (y/N) "),
            Err(PromptError::Unavailable)
        ));
    }
}
