use std::{
    fs::File,
    io::{BufWriter, Write},
};

use anyhow::{Context, Result};

use crate::{
    io::logger::Status, log_error, log_info, log_section, log_success, log_warn,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Section,
    Info,
    Found,
    Warning,
    Error,
}

impl ReportKind {
    const fn status(self) -> Status {
        match self {
            Self::Section => Status::Section,
            Self::Info => Status::Info,
            Self::Found => Status::Success,
            Self::Warning => Status::Warning,
            Self::Error => Status::Error,
        }
    }
}

/// Presentation sink for everything a scan wants the operator to see.
pub trait Reporter {
    fn report(&mut self, kind: ReportKind, message: &str);
}

pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&mut self, kind: ReportKind, message: &str) {
        match kind {
            ReportKind::Section => log_section!(format!("---- {message} ----")),
            ReportKind::Info => log_info!(message),
            ReportKind::Found => log_success!(message),
            ReportKind::Warning => log_warn!(message),
            ReportKind::Error => log_error!(message),
        }
    }
}

/// Writes uncoloured report lines to the `--output` file.
pub struct FileReporter {
    path: String,
    writer: BufWriter<File>,
    failed: bool,
}

impl FileReporter {
    pub fn create(path: &str) -> Result<Self> {
        let file = File::create(path).with_context(|| format!("Failed to create output file {path}"))?;
        log_info!(format!("Writing results to: {path}"));
        Ok(Self {
            path: path.to_string(),
            writer: BufWriter::new(file),
            failed: false,
        })
    }
}

impl Reporter for FileReporter {
    fn report(&mut self, kind: ReportKind, message: &str) {
        // Errors stay visible on the terminal even when redirected.
        if kind == ReportKind::Error {
            log_error!(message);
        }

        let line = format_line(kind, message);
        let written = writeln!(self.writer, "{line}").and_then(|()| self.writer.flush());
        if let Err(err) = written
            && !self.failed
        {
            self.failed = true;
            log_error!(format!("Unable to write to {}: {err}", self.path));
        }
    }
}

fn format_line(kind: ReportKind, message: &str) -> String {
    match kind {
        ReportKind::Section => format!("[{}] ---- {message} ----", kind.status().plain_symbol()),
        _ => format!("[{}] {message}", kind.status().plain_symbol()),
    }
}

#[cfg(test)]
pub mod testing {
    use super::{ReportKind, Reporter};

    #[derive(Default)]
    pub struct RecordingReporter {
        pub lines: Vec<(ReportKind, String)>,
    }

    impl RecordingReporter {
        pub fn found(&self) -> Vec<&str> {
            self.of_kind(ReportKind::Found)
        }

        pub fn of_kind(&self, kind: ReportKind) -> Vec<&str> {
            self.lines
                .iter()
                .filter(|(k, _)| *k == kind)
                .map(|(_, line)| line.as_str())
                .collect()
        }
    }

    impl Reporter for RecordingReporter {
        fn report(&mut self, kind: ReportKind, message: &str) {
            self.lines.push((kind, message.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_lines_are_plain() {
        assert_eq!(
            format_line(ReportKind::Found, "URL: https://example.com"),
            "[+] URL: https://example.com"
        );
        assert_eq!(
            format_line(ReportKind::Section, "Web pages footprints"),
            "[*] ---- Web pages footprints ----"
        );
        assert_eq!(format_line(ReportKind::Error, "boom"), "[!] boom");
    }
}
