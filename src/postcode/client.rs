//! postcodes.io client
//!
//! Plain unauthenticated GETs against the public API:
//! - `/postcodes/{q}/autocomplete` -> list of postcodes
//! - `/postcodes/{code}` -> postcode record with latitude/longitude
//! - `/postcodes/{code}/validate` -> boolean
//!
//! Every body carries `{"status": <int>, "result": ...}`; the status in the
//! body is authoritative, so bodies are parsed even on HTTP errors.

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::postcode::{strip_non_alphanumeric, PostcodeService, QueryMode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

/// postcodes.io API client
#[derive(Debug, Clone)]
pub struct PostcodesIoClient {
    client: reqwest::Client,
    base_url: String,
    query_mode: QueryMode,
}

/// Common response envelope
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: i64,
    result: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

/// The part of a postcode record we use
#[derive(Debug, Deserialize)]
struct PostcodeRecord {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl PostcodesIoClient {
    /// Create a client against `base_url` (no trailing slash)
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            query_mode: QueryMode::default(),
        })
    }

    /// Set how autocomplete queries are prepared
    pub fn with_query_mode(mut self, query_mode: QueryMode) -> Self {
        self.query_mode = query_mode;
        self
    }

    /// Current autocomplete query mode
    pub fn query_mode(&self) -> QueryMode {
        self.query_mode
    }

    fn postcode_url(&self, segment: &str, suffix: &str) -> String {
        format!(
            "{}/postcodes/{}{}",
            self.base_url,
            urlencoding::encode(segment),
            suffix
        )
    }

    /// GET `url` and unwrap the envelope, requiring `status == 200`
    async fn get_result<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let http_status = response.status();

        let envelope: Envelope<T> = response.json().await.map_err(|e| {
            Error::Postcode(format!(
                "Failed to parse response (HTTP {}): {}",
                http_status, e
            ))
        })?;

        if envelope.status != 200 {
            return Err(Error::Postcode(format!(
                "API returned status {}: {}",
                envelope.status,
                envelope.error.as_deref().unwrap_or("no details")
            )));
        }

        Ok(envelope.result)
    }

    /// Autocomplete a partial postcode
    ///
    /// An input that is empty after preparation makes no request.
    pub async fn try_autocomplete(&self, partial: &str) -> Result<Vec<String>> {
        let query = self.query_mode.apply(partial);
        if query.trim().is_empty() {
            debug!("Autocomplete query is empty, skipping request");
            return Ok(Vec::new());
        }

        let url = self.postcode_url(&query, "/autocomplete");
        let codes: Option<Vec<String>> = self.get_result(&url).await?;

        Ok(codes.unwrap_or_default())
    }

    /// Resolve a full postcode to its coordinate
    pub async fn try_lookup(&self, code: &str) -> Result<Coordinates> {
        let code = code.trim();
        if code.is_empty() {
            return Err(Error::Postcode("Postcode is empty".to_string()));
        }

        let url = self.postcode_url(code, "");
        let record: Option<PostcodeRecord> = self.get_result(&url).await?;

        match record {
            Some(PostcodeRecord {
                latitude: Some(lat),
                longitude: Some(lng),
            }) => Ok(Coordinates::new(lat, lng)),
            _ => Err(Error::Postcode(format!("No coordinates for {}", code))),
        }
    }

    /// Check whether a postcode exists
    ///
    /// An input that is empty after stripping is invalid without a request.
    pub async fn try_validate(&self, code: &str) -> Result<bool> {
        let code = strip_non_alphanumeric(code);
        if code.is_empty() {
            debug!("Postcode is empty, treating as invalid");
            return Ok(false);
        }

        let url = self.postcode_url(&code, "/validate");
        let valid: Option<bool> = self.get_result(&url).await?;

        Ok(valid.unwrap_or(false))
    }
}

impl PostcodeService for PostcodesIoClient {
    async fn autocomplete(&self, partial: &str) -> Vec<String> {
        match self.try_autocomplete(partial).await {
            Ok(codes) => {
                debug!("Autocomplete for {:?}: {:?}", partial, codes);
                codes
            }
            Err(e) => {
                warn!("Autocomplete for {:?} failed: {}", partial, e);
                Vec::new()
            }
        }
    }

    async fn lookup(&self, code: &str) -> Option<Coordinates> {
        match self.try_lookup(code).await {
            Ok(coords) => Some(coords),
            Err(e) => {
                warn!("Lookup for {:?} failed: {}", code, e);
                None
            }
        }
    }

    async fn validate(&self, code: &str) -> bool {
        match self.try_validate(code).await {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Validation of {:?} failed: {}", code, e);
                false
            }
        }
    }
}
