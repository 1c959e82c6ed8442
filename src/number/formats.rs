//! Alternative human-written representations of a number, used to widen
//! search recall beyond the canonical formats.

use super::{NumberError, NumberProfile};

const NANP_SUBSCRIBER_LEN: usize = 4;
const NANP_EXCHANGE_LEN: usize = 3;

/// Every written variant of `profile` worth searching, most common first.
pub fn generate(profile: &NumberProfile) -> Result<Vec<String>, NumberError> {
    if profile.country_iso_code.is_empty() {
        return Err(NumberError::MissingCountry(profile.input.clone()));
    }

    let formats = if profile.is_north_american() {
        north_american_formats(profile)
    } else {
        international_formats(profile)
    };

    let mut unique = Vec::with_capacity(formats.len());
    for format in formats {
        if !unique.contains(&format) {
            unique.push(format);
        }
    }
    Ok(unique)
}

/// Formats offered to the operator when asked for a custom format.
pub fn recommended(profile: &NumberProfile) -> [String; 2] {
    let without_code = profile
        .international
        .replacen(&format!("{} ", profile.country_code), "", 1);
    [profile.international.clone(), without_code]
}

/// Splits the local digits into area code, exchange and subscriber number.
fn nanp_segments(local: &str) -> (&str, &str, &str) {
    let subscriber_start = local.len().saturating_sub(NANP_SUBSCRIBER_LEN);
    let exchange_start = subscriber_start.saturating_sub(NANP_EXCHANGE_LEN);
    (
        &local[..exchange_start],
        &local[exchange_start..subscriber_start],
        &local[subscriber_start..],
    )
}

fn north_american_formats(profile: &NumberProfile) -> Vec<String> {
    let (area, exchange, subscriber) = nanp_segments(&profile.local);
    let code = &profile.country_code;
    let code_digits = code.trim_start_matches('+');

    vec![
        format!("{area}{exchange}{subscriber}"),
        format!("{area} {exchange} {subscriber}"),
        format!("{area}-{exchange}-{subscriber}"),
        format!("{area}.{exchange}.{subscriber}"),
        format!("{area} {exchange}{subscriber}"),
        format!("{area}-{exchange}{subscriber}"),
        format!("({area}) {exchange}-{subscriber}"),
        format!("({area}){exchange}-{subscriber}"),
        format!("({area}) {exchange} {subscriber}"),
        format!("{code}{area}{exchange}{subscriber}"),
        format!("{code} {area} {exchange} {subscriber}"),
        format!("{code} {area}-{exchange}-{subscriber}"),
        format!("{code} ({area}) {exchange}-{subscriber}"),
        format!("{code}-{area}-{exchange}-{subscriber}"),
        format!("{code_digits}-{area}-{exchange}-{subscriber}"),
    ]
}

fn international_formats(profile: &NumberProfile) -> Vec<String> {
    let code_digits = profile.country_code.trim_start_matches('+');
    let groups = profile.national_groups();
    let groups = if groups.is_empty() {
        vec![profile.local.as_str()]
    } else {
        groups
    };

    let prefixes = [
        format!("+{code_digits}"),
        format!("+{code_digits}/"),
        format!("(00{code_digits})"),
        format!("(+{code_digits})"),
    ];

    let mut formats = Vec::with_capacity(prefixes.len() * 3);
    for prefix in &prefixes {
        for separator in ["", " ", "-"] {
            formats.push(format!("{prefix}0{}", groups.join(separator)));
        }
    }
    formats
}
