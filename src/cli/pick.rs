//! Pick command handler
//!
//! Runs a picker session in the terminal. Each stdin line is one UI event;
//! the terminal view prints what a map screen would display.

use crate::cli::location::parse_fix;
use crate::config::Config;
use crate::coord::{Coordinates, LocationFix, MapRegion};
use crate::error::Result;
use crate::geo::{get_geocoder, ReverseGeocoder};
use crate::picker::{PickerController, PickerOptions, PickerView};
use crate::place::Place;
use crate::postcode::{get_postcode_client, PostcodeService};
use crate::settings::{FileSettings, MemorySettings, SettingsStore};
use clap::Args;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Pick command arguments
#[derive(Args)]
pub struct PickArgs {
    /// Keep the last known location in memory only
    #[arg(long)]
    pub ephemeral: bool,
}

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Move the map so the pin sits on a coordinate
    Pan(Coordinates),
    /// Replace the postcode field text
    Type(String),
    /// Pick a suggestion (1-based)
    Select(usize),
    /// Submit the given text, or the current field text
    Submit(Option<String>),
    /// Re-center on the last known location
    Here,
    /// Deliver a batch of device locations
    Fix(Vec<LocationFix>),
    /// Confirm the current place
    Done,
    Help,
    Quit,
}

impl SessionCommand {
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "pan" => {
                let parts: Vec<&str> = rest.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|p| !p.is_empty())
                    .collect();
                let [lat, lng] = parts.as_slice() else {
                    return Err("usage: pan <lat> <lng>".to_string());
                };
                let lat: f64 = lat.parse().map_err(|_| format!("Invalid latitude: {}", lat))?;
                let lng: f64 = lng.parse().map_err(|_| format!("Invalid longitude: {}", lng))?;
                let coords = Coordinates::new(lat, lng);
                coords.validate().map_err(|e| e.to_string())?;
                Ok(Self::Pan(coords))
            }
            "type" => Ok(Self::Type(rest.to_string())),
            "select" => {
                let index: usize = rest
                    .parse()
                    .map_err(|_| "usage: select <number>".to_string())?;
                if index == 0 {
                    return Err("Suggestions are numbered from 1".to_string());
                }
                Ok(Self::Select(index))
            }
            "submit" => Ok(Self::Submit(
                (!rest.is_empty()).then(|| rest.to_string()),
            )),
            "here" => Ok(Self::Here),
            "fix" => {
                let fixes = rest
                    .split_whitespace()
                    .map(parse_fix)
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                if fixes.is_empty() {
                    return Err("usage: fix <lat,lng,accuracy>...".to_string());
                }
                Ok(Self::Fix(fixes))
            }
            "done" => Ok(Self::Done),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            "" => Err(String::new()),
            other => Err(format!("Unknown command: {} (try 'help')", other)),
        }
    }
}

/// Picker view that prints to the terminal
#[derive(Debug, Default)]
pub struct TerminalView {
    pin: Option<Coordinates>,
    moved: bool,
    postcode_text: String,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of the postcode field
    pub fn postcode_text(&self) -> &str {
        &self.postcode_text
    }

    /// Edit the field as the user would, without echoing it back
    pub fn set_field_text(&mut self, text: &str) {
        self.postcode_text = text.to_string();
    }

    /// Pan the map without going through the controller
    pub fn pan_to(&mut self, coords: Coordinates) {
        self.pin = Some(coords);
        self.moved = true;
    }

    /// Whether the map moved since the last call
    pub fn take_moved(&mut self) -> bool {
        std::mem::take(&mut self.moved)
    }
}

impl PickerView for TerminalView {
    fn pin_coordinate(&self) -> Option<Coordinates> {
        self.pin
    }

    fn center_on(&mut self, region: MapRegion) {
        println!(
            "Map: {} (span {}m)",
            region.center, region.span_meters
        );
        self.pan_to(region.center);
    }

    fn show_address(&mut self, address: &str) {
        println!("Address: {}", address);
    }

    fn set_postcode_text(&mut self, text: &str) {
        self.postcode_text = text.to_string();
        println!("Postcode field: {}", text);
    }

    fn show_suggestions(&mut self, suggestions: &[String]) {
        if suggestions.is_empty() {
            println!("No suggestions");
            return;
        }
        for (i, code) in suggestions.iter().enumerate() {
            println!("  {}. {}", i + 1, code);
        }
    }

    fn clear_suggestions(&mut self) {}

    fn show_invalid_postcode(&mut self) {
        println!("Not a valid UK postcode. Please enter a valid UK postcode.");
    }

    fn show_place(&mut self, place: &Place) {
        println!("--- Place ---\n{}\n-------------", place.describe());
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            eprintln!("...");
        }
    }
}

const HELP: &str = "\
Commands:
  pan <lat> <lng>        move the map pin
  type <text>            edit the postcode field (autocompletes)
  select <n>             pick suggestion n
  submit [postcode]      validate and jump to a postcode
  here                   center on the last known location
  fix <lat,lng,acc>...   deliver device locations
  done                   show the chosen place
  quit                   leave";

/// Run the pick command
pub async fn run(args: PickArgs) -> Result<()> {
    let config = Config::load()?;

    if args.ephemeral {
        session(&config, MemorySettings::new()).await
    } else {
        session(&config, FileSettings::load()?).await
    }
}

async fn session<S: SettingsStore>(config: &Config, settings: S) -> Result<()> {
    let mut picker = PickerController::new(
        get_geocoder(config)?,
        get_postcode_client(config)?,
        settings,
        TerminalView::new(),
        PickerOptions::from_config(config),
    );

    println!("Type 'help' for commands.");
    picker.start();
    picker.on_map_loaded().await;
    picker.view_mut().take_moved();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match SessionCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                if !message.is_empty() {
                    println!("{}", message);
                }
                continue;
            }
        };
        debug!("Session command: {:?}", command);

        if !dispatch(&mut picker, command).await {
            break;
        }
    }

    Ok(())
}

/// Apply one command to the picker; false means the session is over
async fn dispatch<G, P, S>(
    picker: &mut PickerController<G, P, S, TerminalView>,
    command: SessionCommand,
) -> bool
where
    G: ReverseGeocoder,
    P: PostcodeService,
    S: SettingsStore,
{
    match command {
        SessionCommand::Pan(coords) => picker.view_mut().pan_to(coords),
        SessionCommand::Type(text) => {
            picker.view_mut().set_field_text(&text);
            picker.on_query_changed(&text).await;
        }
        SessionCommand::Select(n) => picker.on_suggestion_selected(n - 1).await,
        SessionCommand::Submit(text) => {
            let text = text.unwrap_or_else(|| picker.view().postcode_text().to_string());
            picker.on_postcode_submitted(&text).await;
        }
        SessionCommand::Here => {
            picker.on_my_location();
        }
        SessionCommand::Fix(batch) => {
            if let Some(kept) = picker.on_location_update(&batch) {
                println!("Last known location: {}", kept);
            }
        }
        SessionCommand::Done => picker.on_done(),
        SessionCommand::Help => println!("{}", HELP),
        SessionCommand::Quit => return false,
    }

    // A moved map settles and triggers a reverse geocode
    if picker.view_mut().take_moved() {
        picker.on_region_changed().await;
    }
    true
}
