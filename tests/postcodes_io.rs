//! Integration tests for `PostcodesIoClient`.
//!
//! Each test stands up a local `wiremock` server so no real network traffic
//! is made. The strict `try_*` calls are checked for typed errors and the
//! lenient `PostcodeService` calls for their "nothing found" fallbacks.

use serde_json::json;
use wiremock::matchers::{any, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use postcode_picker::{Coordinates, Error, PostcodeService, PostcodesIoClient, QueryMode};

fn client(server: &MockServer) -> PostcodesIoClient {
    PostcodesIoClient::new(&server.uri(), "postcode-picker-test/0.1")
        .expect("failed to build test client")
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "status": 404,
        "error": "Postcode not found"
    }))
}

// ---------------------------------------------------------------------------
// autocomplete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn autocomplete_returns_suggestions_in_service_order() {
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

    let codes = client(&server).autocomplete("SW1A").await;

    assert_eq!(codes, vec!["SW1A 0AA", "SW1A 1AA"]);
}

#[tokio::test]
async fn autocomplete_strips_punctuation_by_default() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postcodes/SW1A1/autocomplete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "result": ["SW1A 1AA", "SW1A 1AB"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let codes = client(&server).autocomplete("SW1A-1 ").await;

    assert_eq!(codes, vec!["SW1A 1AA", "SW1A 1AB"]);
}

#[tokio::test]
async fn autocomplete_verbatim_mode_keeps_the_space() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/postcodes/SW1A(%20| )1/autocomplete$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "result": ["SW1A 1AA"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let codes = client(&server)
        .with_query_mode(QueryMode::Verbatim)
        .autocomplete(" SW1A 1 ")
        .await;

    assert_eq!(codes, vec!["SW1A 1AA"]);
}

#[tokio::test]
async fn autocomplete_null_result_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postcodes/ZZ9/autocomplete"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": 200, "result": null})),
        )
        .mount(&server)
        .await;

    let result = client(&server).try_autocomplete("ZZ9").await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert!(result.unwrap().is_empty());
}

#[tokio::test]
async fn autocomplete_non_200_is_an_error_and_an_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postcodes/QQ/autocomplete"))
        .respond_with(not_found())
        .mount(&server)
        .await;

    let client = client(&server);

    let strict = client.try_autocomplete("QQ").await;
    assert!(
        matches!(strict, Err(Error::Postcode(ref msg)) if msg.contains("404")),
        "expected Postcode error, got: {strict:?}"
    );
    assert!(client.autocomplete("QQ").await.is_empty());
}

#[tokio::test]
async fn autocomplete_blank_query_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.autocomplete("").await.is_empty());
    assert!(client.autocomplete(" - ").await.is_empty());
}

// ---------------------------------------------------------------------------
// lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lookup_returns_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postcodes/SW1A1AA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "result": {
                "postcode": "SW1A 1AA",
                "latitude": 51.5010,
                "longitude": -0.1415,
                "country": "England"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let coords = client(&server).lookup("SW1A1AA").await;

    assert_eq!(coords, Some(Coordinates::new(51.5010, -0.1415)));
}

#[tokio::test]
async fn lookup_escapes_the_postcode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/postcodes/SW1A(%20| )1AA$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "result": {"latitude": 51.5010, "longitude": -0.1415}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let coords = client(&server).try_lookup(" SW1A 1AA ").await;

    assert!(coords.is_ok(), "expected Ok, got: {coords:?}");
}

#[tokio::test]
async fn lookup_not_found_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postcodes/ZZ999ZZ"))
        .respond_with(not_found())
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.lookup("ZZ999ZZ").await.is_none());
    assert!(matches!(
        client.try_lookup("ZZ999ZZ").await,
        Err(Error::Postcode(_))
    ));
}

#[tokio::test]
async fn lookup_without_coordinates_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postcodes/JE24WD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "result": {"postcode": "JE2 4WD", "latitude": null, "longitude": null}
        })))
        .mount(&server)
        .await;

    assert!(client(&server).lookup("JE24WD").await.is_none());
}

#[tokio::test]
async fn lookup_empty_code_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    assert!(client(&server).lookup("  ").await.is_none());
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validate_reads_the_result_flag() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postcodes/SW1A1AA/validate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": 200, "result": true})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/postcodes/NOPE/validate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": 200, "result": false})),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.validate("SW1A 1AA").await);
    assert!(!client.validate("NOPE").await);
}

#[tokio::test]
async fn validate_server_error_counts_as_invalid() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postcodes/SW1A1AA/validate"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(!client.validate("SW1A1AA").await);

    let strict = client.try_validate("SW1A1AA").await;
    assert!(
        matches!(strict, Err(Error::Postcode(ref msg)) if msg.contains("502")),
        "expected Postcode error naming the HTTP status, got: {strict:?}"
    );
}

#[tokio::test]
async fn validate_empty_code_is_false_without_request() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let result = client(&server).try_validate("!!").await;
    assert!(matches!(result, Ok(false)), "expected Ok(false), got: {result:?}");
}

// ---------------------------------------------------------------------------
// transport failure
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_server_degrades_to_nothing_found() {
    // Nothing listens on port 1
    let client = PostcodesIoClient::new("http://127.0.0.1:1", "postcode-picker-test/0.1").unwrap();

    assert!(client.autocomplete("SW1A").await.is_empty());
    assert!(client.lookup("SW1A1AA").await.is_none());
    assert!(!client.validate("SW1A1AA").await);
    assert!(matches!(
        client.try_lookup("SW1A1AA").await,
        Err(Error::Http(_))
    ));
}
