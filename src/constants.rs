//! Centralized constants for the postcode-picker crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Meters per degree of latitude (approximate, varies slightly with latitude)
    pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

    /// Fallback coordinate used before any device location is known
    /// (London Bridge).
    pub const FALLBACK_LAT: f64 = 51.504831314;
    pub const FALLBACK_LNG: f64 = -0.085999656;

    /// Region span used when centering the map on a coordinate
    pub const REGION_SPAN_METERS: f64 = 1000.0;
}

/// External API endpoints
pub mod api {
    /// postcodes.io public UK postcode API
    pub const POSTCODES_IO_URL: &str = "https://api.postcodes.io";

    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// User agent sent with every request (Nominatim rejects anonymous clients)
    pub const USER_AGENT: &str = concat!("postcode-picker/", env!("CARGO_PKG_VERSION"));
}

/// Persisted settings
pub mod settings {
    /// Settings key for the last known latitude
    pub const LAT_KEY: &str = "lat";

    /// Settings key for the last known longitude
    pub const LNG_KEY: &str = "lng";

    /// Settings file name (in the XDG data directory)
    pub const SETTINGS_FILE_NAME: &str = "settings.json";
}
