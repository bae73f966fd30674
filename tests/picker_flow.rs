//! End-to-end picker flows against mocked postcodes.io and Nominatim.
//!
//! The controller is wired to the real HTTP clients; only the view is a
//! recording stand-in.

use serde_json::json;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use postcode_picker::geo::nominatim::NominatimGeocoder;
use postcode_picker::settings::MemorySettings;
use postcode_picker::{
    Coordinates, Error, MapRegion, Place, PickerController, PickerOptions, PickerView,
    PostcodesIoClient, ReverseGeocoder,
};

#[derive(Default)]
struct Screen {
    pin: Option<Coordinates>,
    centers: Vec<MapRegion>,
    address: Option<String>,
    postcode_text: Option<String>,
    suggestions: Vec<String>,
    invalid_notices: usize,
    loading: bool,
}

impl PickerView for Screen {
    fn pin_coordinate(&self) -> Option<Coordinates> {
        self.pin
    }

    fn center_on(&mut self, region: MapRegion) {
        self.centers.push(region);
    }

    fn show_address(&mut self, address: &str) {
        self.address = Some(address.to_string());
    }

    fn set_postcode_text(&mut self, text: &str) {
        self.postcode_text = Some(text.to_string());
    }

    fn show_suggestions(&mut self, suggestions: &[String]) {
        self.suggestions = suggestions.to_vec();
    }

    fn clear_suggestions(&mut self) {
        self.suggestions.clear();
    }

    fn show_invalid_postcode(&mut self) {
        self.invalid_notices += 1;
    }

    fn show_place(&mut self, _place: &Place) {}

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

type Picker = PickerController<NominatimGeocoder, PostcodesIoClient, MemorySettings, Screen>;

fn picker(server: &MockServer, screen: Screen) -> Picker {
    PickerController::new(
        NominatimGeocoder::new(&server.uri(), "postcode-picker-test/0.1").unwrap(),
        PostcodesIoClient::new(&server.uri(), "postcode-picker-test/0.1").unwrap(),
        MemorySettings::new(),
        screen,
        PickerOptions::default(),
    )
}

#[tokio::test]
async fn submitting_a_valid_postcode_centers_the_map() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postcodes/SW1A1AA/validate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": 200, "result": true})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/postcodes/SW1A1AA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "result": {"latitude": 51.5010, "longitude": -0.1415}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut picker = picker(&server, Screen::default());
    picker.on_postcode_submitted("SW1A1AA").await;

    let screen = picker.view();
    assert_eq!(
        screen.centers,
        vec![MapRegion::around(Coordinates::new(51.5010, -0.1415), 1000.0)]
    );
    assert_eq!(screen.invalid_notices, 0);
    assert!(!screen.loading);
}

#[tokio::test]
async fn submitting_an_invalid_postcode_never_looks_it_up() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postcodes/XX11XX/validate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": 200, "result": false})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/postcodes/XX11XX"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut picker = picker(&server, Screen::default());
    picker.on_postcode_submitted("XX1 1XX").await;

    assert_eq!(picker.view().invalid_notices, 1);
    assert!(picker.view().centers.is_empty());
}

#[tokio::test]
async fn typing_shows_autocomplete_suggestions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postcodes/SW1A/autocomplete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "result": ["SW1A 0AA", "SW1A 1AA"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut picker = picker(&server, Screen::default());
    picker.on_query_changed("S").await;
    picker.on_query_changed("SW1A").await;

    assert_eq!(picker.suggestions(), ["SW1A 0AA", "SW1A 1AA"]);
    assert_eq!(picker.view().suggestions, vec!["SW1A 0AA", "SW1A 1AA"]);
}

#[tokio::test]
async fn not_found_everywhere_leaves_state_unchanged() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": 404,
            "error": "Not found"
        })))
        .mount(&server)
        .await;

    let screen = Screen {
        pin: Some(Coordinates::new(51.5, -0.14)),
        ..Default::default()
    };
    let mut picker = picker(&server, screen);

    picker.on_query_changed("SW1A").await;
    picker.on_postcode_submitted("SW1A1AA").await;
    picker.on_region_changed().await;

    let screen = picker.view();
    assert!(screen.suggestions.is_empty());
    assert!(screen.centers.is_empty());
    assert!(screen.address.is_none());
    assert_eq!(screen.invalid_notices, 1);
    assert!(!screen.loading);
    assert!(picker.current_place().is_none());
}

#[tokio::test]
async fn region_change_reverse_geocodes_the_pin() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("format", "jsonv2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Buckingham Palace",
            "display_name": "Buckingham Palace, The Mall, London, SW1A 1AA, United Kingdom",
            "address": {
                "road": "The Mall",
                "city": "London",
                "postcode": "SW1A 1AA",
                "state": "England"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let screen = Screen {
        pin: Some(Coordinates::new(51.501, -0.1415)),
        ..Default::default()
    };
    let mut picker = picker(&server, screen);
    picker.on_region_changed().await;

    assert_eq!(
        picker.view().address.as_deref(),
        Some("Buckingham Palace, London, SW1A 1AA, England")
    );
    assert_eq!(picker.view().postcode_text.as_deref(), Some("SW1A 1AA"));
    assert_eq!(
        picker.current_place().unwrap().describe(),
        "Address: Buckingham Palace, London, SW1A 1AA, England\n\
         PostCode: SW1A 1AA\n\
         Lat: 51.501000\n\
         Lng: -0.141500"
    );
}

#[tokio::test]
async fn nominatim_unknown_point_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": "Unable to geocode"})),
        )
        .mount(&server)
        .await;

    let geocoder = NominatimGeocoder::new(&server.uri(), "postcode-picker-test/0.1").unwrap();
    let result = geocoder.reverse_geocode(Coordinates::new(0.0, 0.0)).await;

    assert!(matches!(result, Ok(None)), "expected Ok(None), got: {result:?}");
}

#[tokio::test]
async fn nominatim_server_error_is_a_geocoding_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let geocoder = NominatimGeocoder::new(&server.uri(), "postcode-picker-test/0.1").unwrap();
    let result = geocoder.reverse_geocode(Coordinates::new(51.5, -0.1)).await;

    assert!(
        matches!(result, Err(Error::Geocoding(ref msg)) if msg.contains("503")),
        "expected Geocoding error, got: {result:?}"
    );
}
