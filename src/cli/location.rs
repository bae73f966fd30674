//! Location command handler
//!
//! Shows or changes the persisted last known location.

use crate::config::Config;
use crate::coord::{best_fix, Coordinates, LocationFix};
use crate::error::Result;
use crate::settings::{self, FileSettings};
use clap::Args;

/// Location command arguments
#[derive(Args)]
pub struct LocationArgs {
    /// Store an exact coordinate
    #[arg(long, num_args = 2, value_names = ["LAT", "LNG"], allow_negative_numbers = true)]
    pub set: Option<Vec<f64>>,

    /// Feed a batch of fixes as LAT,LNG,ACCURACY; the most accurate is kept
    #[arg(long, value_parser = parse_fix, allow_hyphen_values = true, conflicts_with = "set")]
    pub fix: Vec<LocationFix>,

    /// Forget the stored location
    #[arg(long, conflicts_with_all = ["set", "fix"])]
    pub reset: bool,

    /// Show settings file path
    #[arg(long)]
    pub path: bool,
}

/// Parse "LAT,LNG,ACCURACY" into a fix
pub fn parse_fix(s: &str) -> std::result::Result<LocationFix, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [lat, lng, accuracy] = parts.as_slice() else {
        return Err(format!("Expected LAT,LNG,ACCURACY but got '{}'", s));
    };

    let parse = |v: &str, what: &str| {
        v.parse::<f64>()
            .map_err(|_| format!("Invalid {}: '{}'", what, v))
    };

    let coords = Coordinates::new(parse(*lat, "latitude")?, parse(*lng, "longitude")?);
    coords.validate().map_err(|e| e.to_string())?;

    Ok(LocationFix::new(coords, parse(*accuracy, "accuracy")?))
}

/// Run the location command
pub fn run(args: LocationArgs) -> Result<()> {
    let mut store = FileSettings::load()?;

    if args.path {
        println!("{}", store.path().display());
        return Ok(());
    }

    if args.reset {
        store.clear()?;
        println!("Stored location cleared");
        return Ok(());
    }

    if let Some(values) = &args.set {
        let coords = Coordinates::new(values[0], values[1]);
        coords.validate()?;
        settings::remember(&mut store, coords)?;
    } else if let Some(best) = best_fix(&args.fix) {
        settings::remember(&mut store, best.coords)?;
        eprintln!(
            "Kept fix with accuracy {}m of {} supplied",
            best.horizontal_accuracy,
            args.fix.len()
        );
    }

    let config = Config::load()?;
    let coords = settings::last_known(&store, config.default_coordinates());
    println!("{}", coords);
    if let Some(updated) = store.updated_at() {
        println!("Updated: {}", updated.to_rfc3339());
    } else {
        println!("(default location, nothing stored yet)");
    }

    Ok(())
}
