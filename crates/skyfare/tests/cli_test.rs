//! Integration tests for the `skyfare` CLI binary.
//!
//! Argument parsing, help output, completions and validation run without a
//! network; the lookup tests talk to a wiremock location service.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use chrono::{Days, Local};
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `skyfare` binary with env isolation.
///
/// Clears all `SKYFARE_*` overrides, disables the keyring and points the
/// config directory at a nonexistent path.
fn skyfare_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("skyfare");
    cmd.env("HOME", "/tmp/skyfare-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/skyfare-cli-test-nonexistent")
        .env("SKYFARE_API__KEYRING", "false")
        .env("SKYFARE_SEARCH__STUB_DELAY", "10ms")
        .env_remove("SKYFARE_CONFIG")
        .env_remove("SKYFARE_API_URL")
        .env_remove("SKYFARE_API_KEY")
        .env_remove("SKYFARE_OUTPUT")
        .env_remove("SKYFARE_TIMEOUT");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn days_from_now(days: u64) -> String {
    Local::now()
        .date_naive()
        .checked_add_days(Days::new(days))
        .unwrap()
        .format("%Y-%m-%d")
        .to_string()
}

const OFFERS: &str = r#"[{
    "currencyCode": "EUR",
    "totalPrice": "412.30",
    "basePrice": 350,
    "totalTravelers": 1,
    "trips": [{
        "tripNo": 1, "from": "JFK", "to": "CDG", "tripType": "ONE_WAY",
        "stops": 0, "totalFlightDuration": "7h 20m",
        "legs": [{
            "legNo": 1, "departureAirport": "JFK", "arrivalAirport": "CDG",
            "departureDateTime": "2025-05-01T18:30:00",
            "arrivalDateTime": "2025-05-02T07:50:00",
            "carrierCode": "AF", "carrierName": "Air France",
            "flightNumber": 7, "aircraftCode": "77W", "duration": "7h 20m"
        }]
    }]
}]"#;

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = skyfare_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_commands() {
    skyfare_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("locations")
            .and(predicate::str::contains("search"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    skyfare_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("skyfare"));
}

#[test]
fn test_completions_zsh() {
    skyfare_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_config_path_honors_flag() {
    skyfare_cmd()
        .args(["config", "path", "--config", "/tmp/elsewhere/skyfare.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/elsewhere/skyfare.toml"));
}

#[test]
fn test_config_init_needs_terminal() {
    skyfare_cmd()
        .args(["config", "init"])
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("interactive terminal"));
}

// ── Locations ───────────────────────────────────────────────────────

#[test]
fn test_short_keyword_is_rejected_without_request() {
    // Nothing listens on port 9; a request would fail with a connection error
    skyfare_cmd()
        .args(["locations", "Pa", "--api-url", "http://127.0.0.1:9/api"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("too short"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_locations_prints_flattened_suggestions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/locations/search"))
        .and(query_param("keyword", "Par"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "locationResponses": [{
                "id": 1, "name": "Paris", "iata": "PAR",
                "group_data": { "simpleAirports": [
                    { "id": 2, "name": "Charles de Gaulle", "iata": "CDG" },
                    { "id": 3, "name": "Orly", "iata": "ORY" }
                ] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api_url = format!("{}/api", server.uri());
    let output = tokio::task::spawn_blocking(move || {
        skyfare_cmd()
            .args(["locations", "Par", "--output", "plain", "--api-url", &api_url])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "PAR\nCDG\nORY\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lookup_failure_exits_nonzero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/locations/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let api_url = format!("{}/api", server.uri());
    let output = tokio::task::spawn_blocking(move || {
        skyfare_cmd()
            .args(["locations", "Lisbon", "--api-url", &api_url])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("Location service error"));
}

// ── Search ──────────────────────────────────────────────────────────

#[test]
fn test_search_reports_missing_fields() {
    skyfare_cmd()
        .args(["search", "--from", "JFK"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "Please fill all required fields: destination, departure date, cabin class",
        ));
}

#[test]
fn test_search_rejects_past_departure() {
    skyfare_cmd()
        .args([
            "search", "--from", "JFK", "--to", "CDG", "--depart", "2001-01-01", "--class",
            "economy",
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("in the past"));
}

#[test]
fn test_search_prints_fixture_offers() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = dir.path().join("offers.json");
    std::fs::write(&fixture, OFFERS).unwrap();

    let output = skyfare_cmd()
        .env("SKYFARE_SEARCH__OFFERS_FIXTURE", &fixture)
        .args([
            "search",
            "--from",
            "JFK",
            "--to",
            "CDG",
            "--trip",
            "one-way",
            "--depart",
            &days_from_now(14),
            "--class",
            "business",
            "--output",
            "json-compact",
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let offers: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(offers.as_array().unwrap().len(), 1);
    assert_eq!(offers[0]["totalPrice"], "412.30");
}
