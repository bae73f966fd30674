//! Resolved place
//!
//! A `Place` is built once from a reverse geocoding result and never mutated;
//! a new result replaces it wholesale.

use crate::coord::Coordinates;
use crate::geo::ResolvedAddress;
use serde::Serialize;

/// One resolved location
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Place {
    address: Option<String>,
    /// `Some("")` means the geocoder had no postcode for this point
    post_code: Option<String>,
    /// Latitude and longitude are set together or not at all
    #[serde(flatten)]
    coordinates: Option<Coordinates>,
}

impl Place {
    pub fn new(
        address: Option<String>,
        post_code: Option<String>,
        coordinates: Option<Coordinates>,
    ) -> Self {
        Self {
            address,
            post_code,
            coordinates,
        }
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn post_code(&self) -> Option<&str> {
        self.post_code.as_deref()
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.lat)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.lng)
    }

    /// Render the populated fields as "Label: value" lines
    ///
    /// Order is address, postcode, latitude, longitude; absent fields are
    /// omitted and there is no trailing newline.
    pub fn describe(&self) -> String {
        let mut lines = Vec::with_capacity(4);

        if let Some(address) = &self.address {
            lines.push(format!("Address: {}", address));
        }
        if let Some(post_code) = &self.post_code {
            lines.push(format!("PostCode: {}", post_code));
        }
        if let Some(coords) = &self.coordinates {
            lines.push(format!("Lat: {:.6}", coords.lat));
            lines.push(format!("Lng: {:.6}", coords.lng));
        }

        lines.join("\n")
    }
}

/// Assemble a place from a reverse geocoding result
///
/// A missing postal code becomes the empty string, never an error.
pub fn build_place(resolved: &ResolvedAddress, coords: Coordinates) -> Place {
    Place {
        address: Some(resolved.display_address()),
        post_code: Some(resolved.postal_code.clone().unwrap_or_default()),
        coordinates: Some(coords),
    }
}
