//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/postcode-picker/config.toml

pub mod defaults;

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::postcode::QueryMode;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// External API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Autocomplete behaviour
    #[serde(default)]
    pub autocomplete: AutocompleteConfig,

    /// Location settings
    #[serde(default)]
    pub location: LocationConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// URL generation settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// External API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// postcodes.io base URL
    #[serde(default = "default_postcodes_url")]
    pub postcodes_url: String,

    /// Nominatim base URL
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    /// User agent for outgoing requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Autocomplete behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteConfig {
    /// "stripped" removes non-alphanumeric characters, "verbatim" keeps them
    #[serde(default = "default_query_mode")]
    pub query_mode: String,

    /// Shortest query that triggers a request
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

/// Location settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Latitude seeded into settings on first run
    #[serde(default = "default_lat")]
    pub default_lat: f64,

    /// Longitude seeded into settings on first run
    #[serde(default = "default_lng")]
    pub default_lng: f64,

    /// Region span in meters when centering the map
    #[serde(default = "default_region_span")]
    pub region_span_meters: f64,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// URL generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_postcodes_url() -> String {
    DEFAULT_POSTCODES_URL.to_string()
}
fn default_nominatim_url() -> String {
    DEFAULT_NOMINATIM_URL.to_string()
}
fn default_user_agent() -> String {
    crate::constants::api::USER_AGENT.to_string()
}
fn default_query_mode() -> String {
    DEFAULT_QUERY_MODE.to_string()
}
fn default_min_query_len() -> usize {
    DEFAULT_MIN_QUERY_LEN
}
fn default_lat() -> f64 {
    DEFAULT_LAT
}
fn default_lng() -> f64 {
    DEFAULT_LNG
}
fn default_region_span() -> f64 {
    DEFAULT_REGION_SPAN_METERS
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},17z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map=17/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}".to_string(),
    );
    providers
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            postcodes_url: default_postcodes_url(),
            nominatim_url: default_nominatim_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            query_mode: default_query_mode(),
            min_query_len: default_min_query_len(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            default_lat: default_lat(),
            default_lng: default_lng(),
            region_span_meters: default_region_span(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "postcodes_url"] => Some(self.api.postcodes_url.clone()),
            ["api", "nominatim_url"] => Some(self.api.nominatim_url.clone()),
            ["api", "user_agent"] => Some(self.api.user_agent.clone()),

            ["autocomplete", "query_mode"] => Some(self.autocomplete.query_mode.clone()),
            ["autocomplete", "min_query_len"] => {
                Some(self.autocomplete.min_query_len.to_string())
            }

            ["location", "default_lat"] => Some(self.location.default_lat.to_string()),
            ["location", "default_lng"] => Some(self.location.default_lng.to_string()),
            ["location", "region_span_meters"] => {
                Some(self.location.region_span_meters.to_string())
            }

            ["output", "format"] => Some(self.output.format.clone()),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "postcodes_url"] => {
                self.api.postcodes_url = value.trim_end_matches('/').to_string();
            }
            ["api", "nominatim_url"] => {
                self.api.nominatim_url = value.trim_end_matches('/').to_string();
            }
            ["api", "user_agent"] => {
                self.api.user_agent = value.to_string();
            }

            ["autocomplete", "query_mode"] => {
                QueryMode::from_str(value).map_err(Error::Config)?;
                self.autocomplete.query_mode = value.to_lowercase();
            }
            ["autocomplete", "min_query_len"] => {
                self.autocomplete.min_query_len = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid length value: {}", value))
                })?;
            }

            ["location", "default_lat"] => {
                self.location.default_lat = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid latitude value: {}", value))
                })?;
            }
            ["location", "default_lng"] => {
                self.location.default_lng = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid longitude value: {}", value))
                })?;
            }
            ["location", "region_span_meters"] => {
                self.location.region_span_meters = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid span value: {}", value))
                })?;
            }

            ["output", "format"] => {
                self.output.format = value.to_string();
            }

            ["url", "default"] => {
                self.url.default = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "api.postcodes_url",
            "api.nominatim_url",
            "api.user_agent",
            "autocomplete.query_mode",
            "autocomplete.min_query_len",
            "location.default_lat",
            "location.default_lng",
            "location.region_span_meters",
            "output.format",
            "url.default",
        ]
    }

    /// Parsed autocomplete query mode
    pub fn query_mode(&self) -> Result<QueryMode> {
        QueryMode::from_str(&self.autocomplete.query_mode).map_err(Error::Config)
    }

    /// Coordinate seeded into settings when nothing is stored yet
    pub fn default_coordinates(&self) -> Coordinates {
        Coordinates::new(self.location.default_lat, self.location.default_lng)
    }

    /// Format a URL using the specified provider
    ///
    /// Replaces {lat} and {lng} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self.url.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string()))
    }
}
