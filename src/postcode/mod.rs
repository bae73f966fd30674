//! Postcode service
//!
//! Autocomplete, lookup and validation of UK postcodes. The service trait is
//! deliberately lenient: failures are logged and surface as "nothing found".

pub mod client;

use crate::coord::Coordinates;
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub use client::PostcodesIoClient;

/// How an autocomplete query is prepared before it goes on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Drop every non-alphanumeric character ("SW1A 1" -> "SW1A1")
    #[default]
    Stripped,
    /// Send the text as typed, minus surrounding whitespace (URL-escaped)
    Verbatim,
}

impl QueryMode {
    /// Prepare a raw query according to this mode
    pub fn apply(&self, raw: &str) -> String {
        match self {
            Self::Stripped => strip_non_alphanumeric(raw),
            Self::Verbatim => raw.trim().to_string(),
        }
    }
}

impl std::fmt::Display for QueryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stripped => write!(f, "stripped"),
            Self::Verbatim => write!(f, "verbatim"),
        }
    }
}

impl std::str::FromStr for QueryMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stripped" | "strip" => Ok(Self::Stripped),
            "verbatim" | "raw" => Ok(Self::Verbatim),
            _ => Err(format!("Unknown query mode: {}", s)),
        }
    }
}

/// Remove every character that is not a letter or digit
pub fn strip_non_alphanumeric(raw: &str) -> String {
    raw.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Trait for postcode backends
pub trait PostcodeService: Send + Sync {
    /// Candidate postcodes for a partial input, in service order
    ///
    /// Any failure yields an empty list.
    fn autocomplete(&self, partial: &str) -> impl std::future::Future<Output = Vec<String>> + Send;

    /// Coordinate of a full postcode, or None if it can't be resolved
    fn lookup(&self, code: &str) -> impl std::future::Future<Output = Option<Coordinates>> + Send;

    /// Whether the service recognises the postcode
    ///
    /// Any failure counts as invalid.
    fn validate(&self, code: &str) -> impl std::future::Future<Output = bool> + Send;
}

/// Build the postcode client configured for this installation
pub fn get_postcode_client(config: &crate::config::Config) -> Result<PostcodesIoClient> {
    Ok(
        PostcodesIoClient::new(&config.api.postcodes_url, &config.api.user_agent)?
            .with_query_mode(config.query_mode()?),
    )
}
