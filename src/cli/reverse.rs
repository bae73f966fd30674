//! Reverse command handler
//!
//! Resolves a coordinate to a place and prints it.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::format::url::UrlFormatter;
use crate::format::{available_formats, get_formatter};
use crate::geo::{get_geocoder, ReverseGeocoder};
use crate::place::build_place;
use clap::Args;

/// Reverse command arguments
#[derive(Args)]
pub struct ReverseArgs {
    /// Latitude
    #[arg(long, allow_negative_numbers = true, required_unless_present = "list_formats")]
    pub lat: Option<f64>,

    /// Longitude
    #[arg(long, allow_negative_numbers = true, required_unless_present = "list_formats")]
    pub lng: Option<f64>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Map provider for the url format
    #[arg(long)]
    pub provider: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the reverse command
pub async fn run(args: ReverseArgs) -> Result<()> {
    if args.list_formats {
        println!("Available output formats:");
        for format in available_formats() {
            println!("  {:5} - {}", format.name, format.description);
        }
        return Ok(());
    }

    let (Some(lat), Some(lng)) = (args.lat, args.lng) else {
        return Err(Error::InvalidCoordinates(
            "Both --lat and --lng are required".to_string(),
        ));
    };

    let config = Config::load()?;

    let coords = Coordinates::new(lat, lng);
    coords.validate()?;

    let format = args.format.unwrap_or_else(|| config.output.format.clone());
    let formatter = get_formatter(&format).ok_or_else(|| {
        Error::Config(format!("Unknown format: {}", format))
    })?;

    let geocoder = get_geocoder(&config)?;
    let Some(resolved) = geocoder.reverse_geocode(coords).await? else {
        eprintln!("No address found for {}", coords);
        std::process::exit(1);
    };

    let place = build_place(&resolved, coords);

    let output = if args.provider.is_some() {
        UrlFormatter.format_with_provider(&place, &config, args.provider.as_deref())?
    } else {
        formatter.format(&place, &config)?
    };
    println!("{}", output);

    Ok(())
}
