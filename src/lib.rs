//! postcode-picker: location picking with UK postcode cross-checks
//!
//! A library and CLI tool for resolving a map pin to a postal address and
//! for finding, validating and locating UK postcodes through postcodes.io.
//!
//! ## Features
//!
//! - Reverse geocoding behind the `ReverseGeocoder` trait (Nominatim backend)
//! - postcodes.io autocomplete, lookup and validation
//! - Immutable `Place` records with a confirmation-style description
//! - Persisted last known location with explicit default seeding
//! - A `PickerController` that drives any `PickerView` front end
//!
//! ## Quick Start
//!
//! ```rust
//! use postcode_picker::coord::Coordinates;
//! use postcode_picker::geo::ResolvedAddress;
//! use postcode_picker::place::build_place;
//!
//! let resolved = ResolvedAddress {
//!     name: Some("Buckingham Palace".to_string()),
//!     locality: Some("London".to_string()),
//!     postal_code: None,
//!     administrative_area: Some("England".to_string()),
//! };
//!
//! let place = build_place(&resolved, Coordinates::new(51.501, -0.1415));
//! assert_eq!(place.post_code(), Some(""));
//! println!("{}", place.describe());
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod picker;
pub mod place;
pub mod postcode;
pub mod settings;

// Re-export commonly used types
pub use config::Config;
pub use coord::{Coordinates, LocationFix, MapRegion};
pub use error::{Error, Result};
pub use geo::{ResolvedAddress, ReverseGeocoder};
pub use picker::{PickerController, PickerOptions, PickerView};
pub use place::{build_place, Place};
pub use postcode::{PostcodeService, PostcodesIoClient, QueryMode};
