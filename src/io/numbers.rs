use std::fs::File;
use std::io::{self, BufRead, BufReader};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Input file not found: {0}")]
    FileNotFound(String),

    #[error("Error reading file: {0}")]
    ReadError(String),
}

/// Reads one phone number per line, skipping blank lines and `#` comments.
pub fn read_from_file(file_path: &str) -> Result<Vec<String>, Error> {
    let file = File::open(file_path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            Error::FileNotFound(file_path.to_string())
        } else {
            Error::ReadError(file_path.to_string())
        }
    })?;

    read_numbers(BufReader::new(file)).map_err(|_| Error::ReadError(file_path.to_string()))
}

fn read_numbers(reader: impl BufRead) -> io::Result<Vec<String>> {
    let mut numbers = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        numbers.push(entry.to_string());
    }
    Ok(numbers)
}
