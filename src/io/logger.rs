use colored::{ColoredString, Colorize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Info,
    Question,
    Section,
    Success,
    Warning,
    Error,
}

impl Status {
    fn symbol(self) -> ColoredString {
        match self {
            Self::Info => "~".cyan(),
            Self::Question => "?".cyan(),
            Self::Section => "*".blue(),
            Self::Success => "+".green(),
            Self::Warning => "!".yellow(),
            Self::Error => "!".red(),
        }
    }

    /// Uncoloured symbol, used when writing to a file.
    pub const fn plain_symbol(self) -> char {
        match self {
            Self::Info => '~',
            Self::Question => '?',
            Self::Section => '*',
            Self::Success => '+',
            Self::Warning | Self::Error => '!',
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

pub fn status(status: Status, message: &impl Display, newline: bool) {
    let clear_line = "\r\x1b[2K";
    let leading = if newline { "\n" } else { "" };
    let prefix = format!("{clear_line}[{status}] ");

    match status {
        Status::Error => eprintln!("{leading}{prefix}{message}"),
        Status::Question => print!("{leading}{prefix}{message}"),
        Status::Section => println!("{leading}{prefix}{}", message.to_string().bold()),
        _ => println!("{leading}{prefix}{message}"),
    }
}

/// Clears the current line in the terminal
pub fn clear_line() {
    print!("\r\x1b[2K");
}

#[doc(hidden)]
#[macro_export]
macro_rules! log_status {
    ($status:ident, $message:expr) => {
        $crate::io::logger::status(
            $crate::io::logger::Status::$status,
            &$message.to_string(),
            false,
        )
    };
    ($status:ident, $message:expr, $newline:expr) => {
        $crate::io::logger::status(
            $crate::io::logger::Status::$status,
            &$message.to_string(),
            $newline,
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:expr),+ $(,)?) => {
        $crate::log_status!(Info, $($arg),+)
    };
}

#[macro_export]
macro_rules! log_question {
    ($($arg:expr),+ $(,)?) => {
        $crate::log_status!(Question, $($arg),+)
    };
}

#[macro_export]
macro_rules! log_section {
    ($($arg:expr),+ $(,)?) => {
        $crate::log_status!(Section, $($arg),+)
    };
}

#[macro_export]
macro_rules! log_success {
    ($($arg:expr),+ $(,)?) => {
        $crate::log_status!(Success, $($arg),+)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:expr),+ $(,)?) => {
        $crate::log_status!(Warning, $($arg),+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:expr),+ $(,)?) => {
        $crate::log_status!(Error, $($arg),+)
    };
}
