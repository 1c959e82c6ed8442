use anyhow::{Result, anyhow, ensure};
use regex::Regex;
use std::{path::Path, sync::LazyLock};

static PHONE_INPUT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ()./-]+$").unwrap());

const MIN_DIGITS: usize = 3;
const MAX_DIGITS: usize = 17;

pub fn validate_phone_input(input: &str) -> Result<String> {
    let input = input.trim();

    ensure!(
        PHONE_INPUT_REGEX.is_match(input),
        "Invalid phone number: {input}. Only digits, spaces and +-()./ are allowed"
    );

    let digit_count = input.chars().filter(char::is_ascii_digit).count();
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&digit_count) {
        return Err(anyhow!(
            "Invalid phone number: {input}. Expected between {MIN_DIGITS} and {MAX_DIGITS} digits"
        ));
    }

    Ok(input.to_string())
}

pub fn validate_directory(input: &str) -> Result<String> {
    ensure!(Path::new(input).is_dir(), "Not a directory: {input}");
    Ok(input.to_string())
}
