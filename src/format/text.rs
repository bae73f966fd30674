//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::place::Place;

/// Text formatter - the same "Label: value" lines shown on confirmation
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn description(&self) -> &'static str {
        "Human-readable text"
    }

    fn format(&self, place: &Place, _config: &Config) -> Result<String> {
        Ok(place.describe())
    }
}
