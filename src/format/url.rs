//! URL output formatter

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::OutputFormatter;
use crate::place::Place;

/// URL formatter - outputs a map URL for the place
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format URL with optional provider override
    pub fn format_with_provider(
        &self,
        place: &Place,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        let coords = place
            .coordinates()
            .ok_or_else(|| Error::Config("Place has no coordinates".to_string()))?;
        config.format_url(provider, coords.lat, coords.lng)
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &'static str {
        "url"
    }

    fn description(&self) -> &'static str {
        "Map URL for the place"
    }

    fn format(&self, place: &Place, config: &Config) -> Result<String> {
        self.format_with_provider(place, config, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;

    fn place() -> Place {
        Place::new(None, None, Some(Coordinates::new(51.501, -0.1415)))
    }

    #[test]
    fn test_url_format_default_provider() {
        let output = UrlFormatter.format(&place(), &Config::default()).unwrap();
        assert_eq!(output, "https://www.openstreetmap.org/#map=17/51.501/-0.1415");
    }

    #[test]
    fn test_url_format_with_provider() {
        let output = UrlFormatter
            .format_with_provider(&place(), &Config::default(), Some("apple"))
            .unwrap();
        assert!(output.contains("maps.apple.com"));
    }

    #[test]
    fn test_url_format_without_coordinates() {
        assert!(UrlFormatter
            .format(&Place::default(), &Config::default())
            .is_err());
    }
}
