// Integration tests for `LocationsClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use secrecy::SecretString;
use skyfare_api::{Error, LocationsClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, LocationsClient) {
    let server = MockServer::start().await;
    let base = format!("{}/api", server.uri());
    let client = LocationsClient::from_reqwest(&base, reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Happy path ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_search_locations_parses_groups() {
    let (server, client) = setup().await;

    let body = json!({
        "locationResponses": [
            {
                "id": "1", "name": "Paris", "iata": "PAR",
                "group_data": { "simpleAirports": [
                    { "id": "2", "name": "Charles de Gaulle", "iata": "CDG" },
                    { "id": "3", "name": "Orly", "iata": "ORY" }
                ] }
            },
            { "id": "4", "name": "Paro", "iata": "PBH", "group_data": { "simpleAirports": [] } }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/locations/search"))
        .and(query_param("keyword", "Par"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.search_locations("Par").await.unwrap();

    assert_eq!(resp.location_responses.len(), 2);
    assert_eq!(resp.location_responses[0].iata, "PAR");
    assert_eq!(resp.location_responses[0].group_data.simple_airports.len(), 2);
    assert_eq!(
        resp.location_responses[0].group_data.simple_airports[1].name,
        "Orly"
    );
    assert!(resp.location_responses[1].group_data.simple_airports.is_empty());
}

#[tokio::test]
async fn test_keyword_is_percent_encoded() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/locations/search"))
        .and(query_param("keyword", "São Paulo & co"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "locationResponses": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.search_locations("São Paulo & co").await.unwrap();
    assert!(resp.location_responses.is_empty());
}

#[tokio::test]
async fn test_api_key_header_is_sent() {
    let server = MockServer::start().await;
    let transport =
        TransportConfig::default().with_api_key(SecretString::from("test-key".to_string()));
    let client = LocationsClient::new(&server.uri(), &transport).unwrap();

    Mock::given(method("GET"))
        .and(path("/locations/search"))
        .and(header("X-API-KEY", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "locationResponses": [] })))
        .expect(1)
        .mount(&server)
        .await;

    client.search_locations("Ber").await.unwrap();
}

// ── Error paths ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/locations/search"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.search_locations("Par").await.unwrap_err();
    assert!(matches!(err, Error::Authentication { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/locations/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client.search_locations("Par").await.unwrap_err();
    match err {
        Error::Api { status, ref message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_malformed_body_keeps_raw_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/locations/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.search_locations("Par").await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_server_maps_to_timeout() {
    let server = MockServer::start().await;
    let transport = TransportConfig::default().with_timeout(std::time::Duration::from_millis(100));
    let client = LocationsClient::new(&server.uri(), &transport).unwrap();

    Mock::given(method("GET"))
        .and(path("/locations/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "locationResponses": [] }))
                .set_delay(std::time::Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = client.search_locations("Par").await.unwrap_err();
    assert!(matches!(err, Error::Timeout { timeout_secs: 0 }), "got {err:?}");
}
