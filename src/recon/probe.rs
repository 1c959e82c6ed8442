use std::time::Duration;

use rand::seq::IndexedRandom;
use reqwest::{StatusCode, blocking::Client, header::USER_AGENT};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::{
    number::{NumberProfile, digits_only},
    search::session::DEFAULT_USER_AGENTS,
};

const TEMPOPHONE_API_URL: &str = "https://tempophone.com/api/v1/phones";
const TEMPOPHONE_WEBSITE: &str = "https://tempophone.com";
const PROBE_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("HTTP request failed: {0}")]
    HttpRequestError(#[from] reqwest::Error),

    #[error("Received non-success status code: {0}")]
    NonSuccessStatus(StatusCode),
}

/// A provider publishing the disposable numbers it currently hands out.
pub trait DisposableProbe {
    /// Provider name used in reports.
    fn provider(&self) -> &str;

    fn website(&self) -> &str;

    fn phones(&self) -> Result<Vec<String>, ProbeError>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PhonesPayload {
    Wrapped { objects: Vec<PhoneEntry> },
    List(Vec<PhoneEntry>),
}

#[derive(Deserialize)]
struct PhoneEntry {
    phone: Value,
}

impl PhonesPayload {
    fn into_phones(self) -> Vec<String> {
        let (Self::Wrapped { objects: entries } | Self::List(entries)) = self;
        entries
            .into_iter()
            .filter_map(|entry| match entry.phone {
                Value::String(phone) => Some(phone),
                Value::Number(phone) => Some(phone.to_string()),
                _ => None,
            })
            .collect()
    }
}

pub struct TempophoneProbe {
    client: Client,
    url: String,
}

impl TempophoneProbe {
    pub fn new() -> Result<Self, ProbeError> {
        let client = Client::builder().timeout(PROBE_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: TEMPOPHONE_API_URL.to_string(),
        })
    }
}

impl DisposableProbe for TempophoneProbe {
    fn provider(&self) -> &str {
        "tempophone.com"
    }

    fn website(&self) -> &str {
        TEMPOPHONE_WEBSITE
    }

    fn phones(&self) -> Result<Vec<String>, ProbeError> {
        let user_agent = DEFAULT_USER_AGENTS
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or_default();
        let response = self.client.get(&self.url).header(USER_AGENT, user_agent).send()?;

        if !response.status().is_success() {
            return Err(ProbeError::NonSuccessStatus(response.status()));
        }

        Ok(response.json::<PhonesPayload>()?.into_phones())
    }
}

/// Whether any listed phone has exactly the profile's digits.
pub fn is_listed(phones: &[String], profile: &NumberProfile) -> bool {
    phones
        .iter()
        .any(|phone| digits_only(phone) == profile.default)
}
