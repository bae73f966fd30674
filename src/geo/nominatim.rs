//! Nominatim reverse geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim API.
//! Rate limit: 1 request per second, and a User-Agent is mandatory.

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{ResolvedAddress, ReverseGeocoder};
use serde::Deserialize;
use tracing::debug;

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

/// Nominatim reverse response
///
/// Unknown points come back as `{"error": "Unable to geocode"}` with a 200.
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<AddressDetails>,
}

#[derive(Debug, Default, Deserialize)]
struct AddressDetails {
    house_number: Option<String>,
    road: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    hamlet: Option<String>,
    suburb: Option<String>,
    postcode: Option<String>,
    state: Option<String>,
    county: Option<String>,
}

impl NominatimGeocoder {
    /// Create a geocoder against `base_url` (no trailing slash)
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Map a Nominatim response onto the address components we display
    fn into_address(response: ReverseResponse) -> Option<ResolvedAddress> {
        if let Some(err) = response.error {
            debug!("Nominatim has no placemark: {}", err);
            return None;
        }

        let details = response.address.unwrap_or_default();
        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());

        let street = match (non_empty(details.house_number), non_empty(details.road)) {
            (Some(number), Some(road)) => Some(format!("{} {}", number, road)),
            (None, Some(road)) => Some(road),
            _ => None,
        };

        Some(ResolvedAddress {
            name: non_empty(response.name).or(street),
            locality: non_empty(details.city)
                .or(non_empty(details.town))
                .or(non_empty(details.village))
                .or(non_empty(details.hamlet))
                .or(non_empty(details.suburb)),
            postal_code: non_empty(details.postcode),
            administrative_area: non_empty(details.state).or(non_empty(details.county)),
        })
    }
}

impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse_geocode(&self, coords: Coordinates) -> Result<Option<ResolvedAddress>> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=jsonv2&addressdetails=1",
            self.base_url, coords.lat, coords.lng
        );
        debug!("Reverse geocoding {}", coords);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Geocoding(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Ok(None);
            }
            return Err(Error::Geocoding(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let result: ReverseResponse = response
            .json()
            .await
            .map_err(|e| Error::Geocoding(format!("Failed to parse Nominatim response: {}", e)))?;

        Ok(Self::into_address(result))
    }
}
