pub mod engine;
pub mod error;
pub mod probe;

pub use engine::ReconEngine;
pub use error::ReconError;
pub use probe::{DisposableProbe, TempophoneProbe};

use serde::Serialize;

/// Where a footprint was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FootprintKind {
    General,
    WebPages,
    Documents,
    Reputation,
    TemporaryProviders,
    SocialMedia,
    PhoneBooks,
    Formats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footprint {
    pub category: FootprintKind,
    pub source: String,
    pub url: String,
}
