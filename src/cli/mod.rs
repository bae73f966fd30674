//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod location;
pub mod pick;
pub mod postcode;
pub mod reverse;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Pick a location and cross-check UK postcodes
#[derive(Parser)]
#[command(name = "postcode-picker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reverse geocode a coordinate into a place
    Reverse(reverse::ReverseArgs),

    /// Look up the coordinate of a postcode
    Lookup(postcode::LookupArgs),

    /// Check whether a postcode exists
    Validate(postcode::ValidateArgs),

    /// Suggest postcodes for a partial input
    Autocomplete(postcode::AutocompleteArgs),

    /// Show or change the last known location
    Location(location::LocationArgs),

    /// Interactive picker session
    Pick(pick::PickArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Initialize logging to stderr
///
/// RUST_LOG wins over the verbosity flag.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "postcode_picker=debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Reverse(args) => reverse::run(args).await,
        Commands::Lookup(args) => postcode::lookup(args).await,
        Commands::Validate(args) => postcode::validate(args).await,
        Commands::Autocomplete(args) => postcode::autocomplete(args).await,
        Commands::Location(args) => location::run(args),
        Commands::Pick(args) => pick::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}
