//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::{api, geo};

/// Default postcode API base URL
pub const DEFAULT_POSTCODES_URL: &str = api::POSTCODES_IO_URL;

/// Default reverse geocoding base URL
pub const DEFAULT_NOMINATIM_URL: &str = api::NOMINATIM_URL;

/// Default autocomplete query handling
pub const DEFAULT_QUERY_MODE: &str = "stripped";

/// Shortest query (in characters) that triggers an autocomplete request
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Default latitude when nothing has been persisted yet
pub const DEFAULT_LAT: f64 = geo::FALLBACK_LAT;

/// Default longitude when nothing has been persisted yet
pub const DEFAULT_LNG: f64 = geo::FALLBACK_LNG;

/// Default map region span in meters
pub const DEFAULT_REGION_SPAN_METERS: f64 = geo::REGION_SPAN_METERS;

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "openstreetmap";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "postcode-picker";
