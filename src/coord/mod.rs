//! Coordinates, device location fixes and map regions

use crate::constants::geo::METERS_PER_DEGREE_LAT;
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// One location delivered by the device location service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub coords: Coordinates,
    /// Reported horizontal accuracy in meters, smaller is better
    pub horizontal_accuracy: f64,
}

impl LocationFix {
    pub fn new(coords: Coordinates, horizontal_accuracy: f64) -> Self {
        Self {
            coords,
            horizontal_accuracy,
        }
    }
}

/// Pick the most accurate fix in an update batch
///
/// Returns the first of equally accurate fixes, or None for an empty batch.
pub fn best_fix(batch: &[LocationFix]) -> Option<&LocationFix> {
    batch
        .iter()
        .min_by(|a, b| a.horizontal_accuracy.total_cmp(&b.horizontal_accuracy))
}

/// A square map region around a center point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub center: Coordinates,
    pub span_meters: f64,
}

impl MapRegion {
    /// Region spanning `span_meters` north-south and east-west
    pub fn around(center: Coordinates, span_meters: f64) -> Self {
        Self {
            center,
            span_meters,
        }
    }

    /// North-south extent in degrees
    pub fn latitude_delta(&self) -> f64 {
        self.span_meters / METERS_PER_DEGREE_LAT
    }

    /// East-west extent in degrees
    pub fn longitude_delta(&self) -> f64 {
        let cos_lat = self.center.lat.to_radians().cos();
        if cos_lat.abs() < f64::EPSILON {
            return 360.0;
        }
        (self.span_meters / (METERS_PER_DEGREE_LAT * cos_lat)).min(360.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validate_ranges() {
        assert!(Coordinates::new(51.5, -0.1).validate().is_ok());
        assert!(Coordinates::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(90.1, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -180.5).validate().is_err());
    }

    #[test]
    fn test_best_fix_picks_smallest_accuracy() {
        let batch = [
            LocationFix::new(Coordinates::new(51.0, -0.1), 65.0),
            LocationFix::new(Coordinates::new(51.1, -0.2), 5.0),
            LocationFix::new(Coordinates::new(51.2, -0.3), 30.0),
        ];
        let best = best_fix(&batch).unwrap();
        assert_eq!(best.coords, Coordinates::new(51.1, -0.2));
    }

    #[test]
    fn test_best_fix_first_on_tie() {
        let batch = [
            LocationFix::new(Coordinates::new(1.0, 1.0), 10.0),
            LocationFix::new(Coordinates::new(2.0, 2.0), 10.0),
        ];
        assert_eq!(best_fix(&batch).unwrap().coords, Coordinates::new(1.0, 1.0));
    }

    #[test]
    fn test_best_fix_empty_batch() {
        assert!(best_fix(&[]).is_none());
    }

    #[test]
    fn test_region_deltas() {
        let region = MapRegion::around(Coordinates::new(0.0, 0.0), 1000.0);
        assert_relative_eq!(region.latitude_delta(), 1000.0 / 111_320.0);
        assert_relative_eq!(region.longitude_delta(), 1000.0 / 111_320.0);

        let london = MapRegion::around(Coordinates::new(51.501, -0.1415), 1000.0);
        assert!(london.longitude_delta() > london.latitude_delta());
    }

    #[test]
    fn test_region_at_pole_is_clamped() {
        let region = MapRegion::around(Coordinates::new(90.0, 0.0), 1000.0);
        assert!(region.longitude_delta() <= 360.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Coordinates::new(51.501, -0.1415).to_string(),
            "51.501000, -0.141500"
        );
    }
}
