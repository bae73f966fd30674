//! Place renderers for the CLI

pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::error::Result;
use crate::place::Place;
use serde::Serialize;

/// Name and one-line summary of a renderer, for `--list-formats`
#[derive(Debug, Clone, Serialize)]
pub struct FormatInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Renders a resolved place as a string
pub trait OutputFormatter: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Render `place`; `config` supplies map provider settings
    fn format(&self, place: &Place, config: &Config) -> Result<String>;
}

static FORMATTERS: [&dyn OutputFormatter; 3] = [
    &text::TextFormatter,
    &json::JsonFormatter,
    &url::UrlFormatter,
];

/// Look up a renderer by name (case-insensitive)
pub fn get_formatter(name: &str) -> Option<&'static dyn OutputFormatter> {
    FORMATTERS
        .iter()
        .copied()
        .find(|f| f.name().eq_ignore_ascii_case(name))
}

pub fn available_formats() -> Vec<FormatInfo> {
    FORMATTERS
        .iter()
        .map(|f| FormatInfo {
            name: f.name(),
            description: f.description(),
        })
        .collect()
}
