use isocountry::CountryCode;
use phonenumber::Mode;
use serde::Serialize;

use super::{NumberError, digits_only};

/// Canonical representations of a single phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberProfile {
    pub input: String,
    /// Digits only, country calling code included.
    pub default: String,
    /// Digits only, without the country calling code.
    pub local: String,
    /// Spaced international format, e.g. `+33 6 51 58 00 74`.
    pub international: String,
    /// Calling code with its leading `+`.
    pub country_code: String,
    pub country_iso_code: String,
    /// English country name, empty when the ISO code is unknown.
    pub country: String,
    /// Whether the international format has a plausible shape and length.
    pub possible: bool,
}

impl NumberProfile {
    /// Normalizes a raw input into a profile. Any separator is accepted; the
    /// digits are always read as an international number.
    pub fn parse(input: &str) -> Result<Self, NumberError> {
        let digits = digits_only(input);
        if digits.is_empty() {
            return Err(NumberError::InvalidNumber(input.to_string()));
        }

        let number = phonenumber::parse(None, format!("+{digits}")).map_err(|err| {
            NumberError::Unparseable {
                input: input.to_string(),
                reason: err.to_string(),
            }
        })?;

        if !phonenumber::is_valid(&number) {
            return Err(NumberError::InvalidNumber(input.to_string()));
        }

        let country_iso_code = number
            .country()
            .id()
            .map(|id| format!("{id:?}"))
            .ok_or_else(|| NumberError::MissingCountry(input.to_string()))?;

        Self::from_parts(
            input,
            &digits_only(&number.format().mode(Mode::E164).to_string()),
            &format!("+{}", number.code().value()),
            &number.format().mode(Mode::International).to_string(),
            &country_iso_code,
        )
    }

    /// Builds a profile from already normalized parts, deriving `local`.
    pub fn from_parts(
        input: &str,
        default: &str,
        country_code: &str,
        international: &str,
        country_iso_code: &str,
    ) -> Result<Self, NumberError> {
        let code_digits = digits_only(country_code);
        let local = default
            .strip_prefix(code_digits.as_str())
            .filter(|local| !code_digits.is_empty() && !local.is_empty())
            .ok_or_else(|| NumberError::Inconsistent {
                number: default.to_string(),
                country_code: country_code.to_string(),
            })?;

        if country_iso_code.is_empty() {
            return Err(NumberError::MissingCountry(input.to_string()));
        }

        Ok(Self {
            input: input.to_string(),
            default: default.to_string(),
            local: local.to_string(),
            international: international.to_string(),
            country_code: format!("+{code_digits}"),
            country_iso_code: country_iso_code.to_uppercase(),
            country: country_name(country_iso_code),
            possible: phonenumber::is_viable(international),
        })
    }

    pub fn is_north_american(&self) -> bool {
        matches!(self.country_iso_code.as_str(), "US" | "CA")
    }

    /// International format with the calling-code group removed.
    pub fn national_groups(&self) -> Vec<&str> {
        self.international
            .split_whitespace()
            .filter(|group| *group != self.country_code)
            .collect()
    }
}

fn country_name(country_iso_code: &str) -> String {
    CountryCode::for_alpha2(&country_iso_code.to_uppercase())
        .map(|country| country.name().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_french_mobile() {
        let profile = NumberProfile::parse("+33 6 51 58 00 74").unwrap();
        assert_eq!(profile.input, "+33 6 51 58 00 74");
        assert_eq!(profile.default, "33651580074");
        assert_eq!(profile.local, "651580074");
        assert_eq!(profile.international, "+33 6 51 58 00 74");
        assert_eq!(profile.country_code, "+33");
        assert_eq!(profile.country_iso_code, "FR");
        assert_eq!(profile.country, "France");
        assert!(profile.possible);
    }

    #[test]
    fn country_name_follows_iso_code() {
        let profile = NumberProfile::from_parts("+49 30 123456", "4930123456", "+49", "+49 30 123456", "de")
            .unwrap();
        assert_eq!(profile.country_iso_code, "DE");
        assert_eq!(profile.country, "Germany");

        let profile = NumberProfile::from_parts("+999 1234", "9991234", "+999", "+999 1234", "ZZ").unwrap();
        assert_eq!(profile.country, "");
    }

    #[test]
    fn parse_without_plus_or_spaces() {
        let profile = NumberProfile::parse("33651580074").unwrap();
        assert_eq!(profile.default, "33651580074");
        assert_eq!(profile.international, "+33 6 51 58 00 74");
    }

    #[test]
    fn invalid_inputs_fail_entirely() {
        assert!(NumberProfile::parse("").is_err());
        assert!(NumberProfile::parse("abc").is_err());
        assert!(NumberProfile::parse("123").is_err());
    }

    #[test]
    fn default_is_code_followed_by_local() {
        let profiles = [
            NumberProfile::parse("+33 6 51 58 00 74").unwrap(),
            NumberProfile::from_parts("+1 202-555-0143", "12025550143", "+1", "+1 202-555-0143", "US")
                .unwrap(),
            NumberProfile::from_parts("+44 20 7946 0958", "442079460958", "+44", "+44 20 7946 0958", "gb")
                .unwrap(),
        ];
        for profile in profiles {
            let code = profile.country_code.trim_start_matches('+');
            assert_eq!(profile.default, format!("{code}{}", profile.local));
        }
    }

    #[test]
    fn from_parts_rejects_foreign_prefix() {
        let result = NumberProfile::from_parts("x", "33651580074", "+44", "+33 6 51 58 00 74", "FR");
        assert_eq!(
            result,
            Err(NumberError::Inconsistent {
                number: "33651580074".to_string(),
                country_code: "+44".to_string(),
            })
        );
    }

    #[test]
    fn from_parts_requires_country() {
        let result = NumberProfile::from_parts("x", "33651580074", "+33", "+33 6 51 58 00 74", "");
        assert!(matches!(result, Err(NumberError::MissingCountry(_))));
    }

    #[test]
    fn national_groups_drop_calling_code() {
        let profile = NumberProfile::parse("+33 6 51 58 00 74").unwrap();
        assert_eq!(profile.national_groups(), vec!["6", "51", "58", "00", "74"]);
        assert!(!profile.is_north_american());
    }
}
