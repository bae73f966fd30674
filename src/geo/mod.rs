//! Geocoding gateway
//!
//! Resolves a coordinate to a structured postal address.

pub mod nominatim;

use crate::coord::Coordinates;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Structured address for a coordinate (the first placemark only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    /// Place or street name
    pub name: Option<String>,
    /// City, town or village
    pub locality: Option<String>,
    /// Postal code, if the service knows one
    pub postal_code: Option<String>,
    /// State, region or county
    pub administrative_area: Option<String>,
}

impl ResolvedAddress {
    /// Join the present components with ", " for display
    ///
    /// Order: name, locality, postal code, administrative area.
    pub fn display_address(&self) -> String {
        [
            &self.name,
            &self.locality,
            &self.postal_code,
            &self.administrative_area,
        ]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Trait for reverse geocoding backends
pub trait ReverseGeocoder: Send + Sync {
    /// Reverse geocode a coordinate to an address
    ///
    /// Returns None when the service has no placemark for the point.
    fn reverse_geocode(
        &self,
        coords: Coordinates,
    ) -> impl std::future::Future<Output = Result<Option<ResolvedAddress>>> + Send;
}

/// Build the geocoder configured for this installation
pub fn get_geocoder(config: &crate::config::Config) -> Result<nominatim::NominatimGeocoder> {
    nominatim::NominatimGeocoder::new(&config.api.nominatim_url, &config.api.user_agent)
}
