pub mod error;
pub mod formats;
pub mod profile;

pub use error::NumberError;
pub use profile::NumberProfile;

/// Removes everything that is not an ASCII digit.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::digits_only;

    #[test]
    fn strips_separators() {
        assert_eq!(digits_only("+33 6 51-58.00/74"), "33651580074");
        assert_eq!(digits_only("(202) 555-0143"), "2025550143");
        assert_eq!(digits_only("no digits"), "");
    }
}
