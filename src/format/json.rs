//! JSON output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::place::Place;

/// JSON formatter - outputs the place as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn description(&self) -> &'static str {
        "Place as JSON"
    }

    fn format(&self, place: &Place, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(place)?)
    }
}
