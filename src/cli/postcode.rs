//! Postcode command handlers
//!
//! Thin wrappers over the strict postcodes.io calls so failures are
//! reported instead of swallowed.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::postcode::{get_postcode_client, QueryMode};
use clap::Args;
use std::str::FromStr;

/// Lookup command arguments
#[derive(Args)]
pub struct LookupArgs {
    /// Full postcode (e.g. "SW1A 1AA")
    pub postcode: String,

    /// Print a map URL instead of the coordinate
    #[arg(long)]
    pub url: bool,
}

/// Validate command arguments
#[derive(Args)]
pub struct ValidateArgs {
    /// Postcode to check
    pub postcode: String,
}

/// Autocomplete command arguments
#[derive(Args)]
pub struct AutocompleteArgs {
    /// Partial postcode
    pub partial: String,

    /// Query mode override: stripped or verbatim
    #[arg(long, short = 'm')]
    pub mode: Option<String>,
}

/// Run the lookup command
pub async fn lookup(args: LookupArgs) -> Result<()> {
    let config = Config::load()?;
    let client = get_postcode_client(&config)?;

    let coords = client.try_lookup(&args.postcode).await?;

    if args.url {
        println!("{}", config.format_url(None, coords.lat, coords.lng)?);
    } else {
        println!("{}", coords);
    }

    Ok(())
}

/// Run the validate command
pub async fn validate(args: ValidateArgs) -> Result<()> {
    let config = Config::load()?;
    let client = get_postcode_client(&config)?;

    let valid = client.try_validate(&args.postcode).await?;
    println!("{}", if valid { "valid" } else { "invalid" });

    if !valid {
        std::process::exit(1);
    }
    Ok(())
}

/// Run the autocomplete command
pub async fn autocomplete(args: AutocompleteArgs) -> Result<()> {
    let config = Config::load()?;
    let mut client = get_postcode_client(&config)?;

    if let Some(mode) = &args.mode {
        client = client.with_query_mode(QueryMode::from_str(mode).map_err(Error::Config)?);
    }

    let codes = client.try_autocomplete(&args.partial).await?;
    if codes.is_empty() {
        eprintln!("No postcodes match '{}'", args.partial);
    }
    for code in codes {
        println!("{}", code);
    }

    Ok(())
}
