//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "autocomplete.query_mode")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long, conflicts_with_all = ["key", "reset", "keys"])]
    pub path: bool,

    /// List settable keys
    #[arg(long, conflicts_with_all = ["key", "reset"])]
    pub keys: bool,

    /// Reset config to defaults
    #[arg(long, conflicts_with = "key")]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        println!("{}", Config::config_path()?.display());
        return Ok(());
    }

    if args.keys {
        for key in Config::available_keys() {
            println!("{}", key);
        }
        return Ok(());
    }

    if args.reset {
        Config::default().save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (args.key.as_deref(), args.value.as_deref()) {
        (None, _) => show_all_config(&config),
        (Some(key), None) => {
            let value = config.get(key).ok_or_else(|| {
                Error::Config(format!(
                    "Unknown config key: {} (see --keys for the full list)",
                    key
                ))
            })?;
            println!("{}", value);
        }
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, config.get(key).unwrap_or_default());
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[api]");
    println!("postcodes_url = \"{}\"", config.api.postcodes_url);
    println!("nominatim_url = \"{}\"", config.api.nominatim_url);
    println!("user_agent = \"{}\"", config.api.user_agent);
    println!();

    println!("[autocomplete]");
    println!("query_mode = \"{}\"", config.autocomplete.query_mode);
    println!("min_query_len = {}", config.autocomplete.min_query_len);
    println!();

    println!("[location]");
    println!("default_lat = {}", config.location.default_lat);
    println!("default_lng = {}", config.location.default_lng);
    println!("region_span_meters = {}", config.location.region_span_meters);
    println!();

    println!("[output]");
    println!("format = \"{}\"", config.output.format);
    println!();

    println!("[url]");
    println!("default = \"{}\"", config.url.default);
    println!();

    println!("[url.providers]");
    let mut providers: Vec<_> = config.url.providers.iter().collect();
    providers.sort();
    for (name, template) in providers {
        println!("{} = \"{}\"", name, template);
    }
}
