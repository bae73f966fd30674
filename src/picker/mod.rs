//! Location picker controller
//!
//! Owns the state of one picker screen (the current place and the postcode
//! suggestions) and reacts to map, text and location events. Rendering is
//! left to a `PickerView`, so the same controller drives any front end.
//!
//! Requests are never cancelled or coalesced. Each event handler runs to
//! completion on the owning context and whatever finishes last is what the
//! view shows.


use crate::config::Config;
use crate::coord::{best_fix, Coordinates, LocationFix, MapRegion};
use crate::geo::ReverseGeocoder;
use crate::place::{build_place, Place};
use crate::postcode::PostcodeService;
use crate::settings::{self, SettingsStore};
use tracing::{debug, info, warn};

/// The UI surface the controller drives
pub trait PickerView {
    /// Map coordinate under the pin, None until the map has been laid out
    fn pin_coordinate(&self) -> Option<Coordinates>;

    /// Move the map to show `region`
    fn center_on(&mut self, region: MapRegion);

    /// Show the human-readable address of the pinned place
    fn show_address(&mut self, address: &str);

    /// Replace the text of the postcode field
    fn set_postcode_text(&mut self, text: &str);

    /// Show the suggestion list (replaces any previous one)
    fn show_suggestions(&mut self, suggestions: &[String]);

    /// Hide the suggestion list
    fn clear_suggestions(&mut self);

    /// Tell the user a submitted postcode was rejected
    fn show_invalid_postcode(&mut self);

    /// Confirm the chosen place
    fn show_place(&mut self, place: &Place);

    /// Toggle the loading indicator
    fn set_loading(&mut self, loading: bool);
}

/// Tunables for a picker session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerOptions {
    /// Span of the region shown when centering the map
    pub region_span_meters: f64,
    /// Shortest query that triggers autocomplete
    pub min_query_len: usize,
    /// Coordinate used when nothing is persisted
    pub fallback: Coordinates,
}

impl PickerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            region_span_meters: config.location.region_span_meters,
            min_query_len: config.autocomplete.min_query_len,
            fallback: config.default_coordinates(),
        }
    }
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Controller for one picker screen
pub struct PickerController<G, P, S, V> {
    geocoder: G,
    postcodes: P,
    settings: S,
    view: V,
    options: PickerOptions,
    current_place: Option<Place>,
    suggestions: Vec<String>,
}

impl<G, P, S, V> PickerController<G, P, S, V>
where
    G: ReverseGeocoder,
    P: PostcodeService,
    S: SettingsStore,
    V: PickerView,
{
    pub fn new(geocoder: G, postcodes: P, settings: S, view: V, options: PickerOptions) -> Self {
        Self {
            geocoder,
            postcodes,
            settings,
            view,
            options,
            current_place: None,
            suggestions: Vec::new(),
        }
    }

    /// Place resolved by the last successful reverse geocode
    pub fn current_place(&self) -> Option<&Place> {
        self.current_place.as_ref()
    }

    /// Suggestions from the last autocomplete
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    fn region(&self, center: Coordinates) -> MapRegion {
        MapRegion::around(center, self.options.region_span_meters)
    }

    fn last_known(&self) -> Coordinates {
        settings::last_known(&self.settings, self.options.fallback)
    }

    /// Seed settings and center the map on the last known coordinate
    pub fn start(&mut self) -> Coordinates {
        if let Err(e) = settings::seed_defaults(&mut self.settings, self.options.fallback) {
            warn!("Failed to seed default location: {}", e);
        }

        let center = self.last_known();
        info!("Starting picker at {}", center);
        let region = self.region(center);
        self.view.center_on(region);
        center
    }

    /// The map finished its first load
    pub async fn on_map_loaded(&mut self) {
        self.refresh_address("map loaded").await;
    }

    /// The map stopped moving
    pub async fn on_region_changed(&mut self) {
        self.refresh_address("region changed").await;
    }

    async fn refresh_address(&mut self, trigger: &str) {
        let Some(pin) = self.view.pin_coordinate() else {
            debug!("{}: pin position unknown, skipping reverse geocode", trigger);
            return;
        };

        self.view.set_loading(true);

        match self.geocoder.reverse_geocode(pin).await {
            Ok(Some(resolved)) => {
                let place = build_place(&resolved, pin);
                self.view.set_postcode_text(place.post_code().unwrap_or_default());
                if let Some(address) = place.address() {
                    self.view.show_address(address);
                }
                debug!("Resolved {} to {:?}", pin, place.address());
                self.current_place = Some(place);
            }
            Ok(None) => {
                debug!("No placemark for {}", pin);
            }
            Err(e) => {
                warn!("Reverse geocode of {} failed: {}", pin, e);
            }
        }

        self.view.set_loading(false);
    }

    fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.view.clear_suggestions();
    }

    /// The postcode field text changed
    pub async fn on_query_changed(&mut self, text: &str) {
        if text.chars().count() < self.options.min_query_len {
            self.clear_suggestions();
            return;
        }

        let codes = self.postcodes.autocomplete(text).await;
        self.suggestions = codes;
        self.view.show_suggestions(&self.suggestions);
    }

    /// A suggestion was picked from the list
    pub async fn on_suggestion_selected(&mut self, index: usize) {
        let Some(code) = self.suggestions.get(index).cloned() else {
            debug!("Suggestion {} out of range", index);
            return;
        };

        self.view.set_postcode_text(&code);
        self.clear_suggestions();
        self.lookup_and_center(&code).await;
    }

    /// The postcode field was submitted
    ///
    /// Validates first; only a valid postcode is looked up.
    pub async fn on_postcode_submitted(&mut self, text: &str) {
        self.clear_suggestions();

        if text.trim().is_empty() {
            debug!("Submitted postcode is empty");
            return;
        }

        self.view.set_loading(true);
        let valid = self.postcodes.validate(text).await;
        self.view.set_loading(false);

        debug!("Postcode {:?} valid = {}", text, valid);
        if valid {
            self.lookup_and_center(text).await;
        } else {
            self.view.show_invalid_postcode();
        }
    }

    async fn lookup_and_center(&mut self, code: &str) {
        self.view.set_loading(true);
        let found = self.postcodes.lookup(code).await;
        self.view.set_loading(false);

        match found {
            Some(coords) => {
                let region = self.region(coords);
                self.view.center_on(region);
            }
            None => debug!("No coordinate for {:?}, map stays put", code),
        }
    }

    /// The user confirmed the current place
    pub fn on_done(&mut self) {
        match &self.current_place {
            Some(place) => self.view.show_place(place),
            None => info!("Place not set"),
        }
    }

    /// Re-center on the last known device location
    pub fn on_my_location(&mut self) -> Coordinates {
        let center = self.last_known();
        let region = self.region(center);
        self.view.center_on(region);
        center
    }

    /// A batch of device locations arrived
    ///
    /// Persists the most accurate one and returns it.
    pub fn on_location_update(&mut self, batch: &[LocationFix]) -> Option<Coordinates> {
        let best = best_fix(batch)?.coords;

        if let Err(e) = settings::remember(&mut self.settings, best) {
            warn!("Failed to persist location {}: {}", best, e);
        }
        debug!("Last known location is now {}", best);
        Some(best)
    }
}
