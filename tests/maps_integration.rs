//! Google Maps adapter against a WireMock container standing in for the API.

use std::time::{Duration, Instant};

use serde_json::json;
use testcontainers::core::IntoContainerPort;
use testcontainers::runners::SyncRunner;
use testcontainers::{Container, GenericImage, ImageExt, TestcontainersError};

use fleet_dispatch::config::MapsConfig;
use fleet_dispatch::directions::RoadDistanceGateway;
use fleet_dispatch::error::MapsError;
use fleet_dispatch::google::GoogleMapsClient;
use fleet_dispatch::haversine::path_miles;
use fleet_dispatch::traits::DirectionsProvider;

const API_KEY: &str = "test-key";

fn wiremock_container() -> Result<(Container<GenericImage>, String), TestcontainersError> {
    let image = GenericImage::new("wiremock/wiremock", "3.9.1")
        .with_exposed_port(8080.tcp())
        .with_startup_timeout(Duration::from_secs(60));

    let container = image.start()?;
    let port = container.get_host_port_ipv4(8080.tcp())?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let http = reqwest::blocking::Client::new();
    let start = Instant::now();
    while start.elapsed() < Duration::from_secs(30) {
        let ready = http
            .get(format!("{}/__admin/mappings", base_url))
            .send()
            .map(|resp| resp.status().is_success())
            .unwrap_or(false);
        if ready {
            return Ok((container, base_url));
        }
        std::thread::sleep(Duration::from_millis(250));
    }
    Err(TestcontainersError::other("wiremock admin API never came up"))
}

/// Registers a GET stub that only matches the given query values.
fn stub(base_url: &str, endpoint: &str, query: &[(&str, &str)], body: serde_json::Value) {
    let mut matchers = serde_json::Map::new();
    matchers.insert("key".to_string(), json!({ "equalTo": API_KEY }));
    for (name, value) in query {
        matchers.insert(name.to_string(), json!({ "equalTo": value }));
    }

    let mapping = json!({
        "request": {
            "method": "GET",
            "urlPath": format!("/{}/json", endpoint),
            "queryParameters": matchers
        },
        "response": { "status": 200, "jsonBody": body }
    });
    reqwest::blocking::Client::new()
        .post(format!("{}/__admin/mappings", base_url))
        .json(&mapping)
        .send()
        .and_then(|resp| resp.error_for_status())
        .expect("register stub");
}

fn client(base_url: &str) -> GoogleMapsClient {
    let config = MapsConfig {
        base_url: base_url.to_string(),
        api_key: Some(API_KEY.to_string()),
        timeout_secs: 5,
    };
    GoogleMapsClient::new(&config, API_KEY).expect("build maps client")
}

#[test]
#[ignore = "requires docker"]
fn directions_and_matrix_round_trip() {
    let (_container, base_url) = wiremock_container().expect("start wiremock container");

    stub(
        &base_url,
        "directions",
        &[
            ("origin", "45.5152,-122.6784"),
            ("destination", "45.5898,-122.5951"),
            ("waypoints", "45.5287,-122.6819"),
        ],
        json!({
            "status": "OK",
            "routes": [{
                "overview_polyline": { "points": "_p~iF~ps|U_ulLnnqC_mqNvxq`@" },
                "legs": [
                    { "distance": { "value": 1609.344 } },
                    { "distance": { "value": 3218.688 } }
                ]
            }]
        }),
    );
    stub(
        &base_url,
        "distancematrix",
        &[
            ("origins", "45.5152,-122.6784"),
            ("destinations", "45.5287,-122.6819|45.5898,-122.5951"),
        ],
        json!({
            "status": "OK",
            "rows": [{
                "elements": [
                    { "status": "OK", "distance": { "value": 16093.44 }, "duration": { "value": 900 } },
                    { "status": "ZERO_RESULTS" }
                ]
            }]
        }),
    );

    let maps = client(&base_url);
    let waypoints = [(45.5152, -122.6784), (45.5287, -122.6819), (45.5898, -122.5951)];

    let route = maps.directions(&waypoints).expect("directions");
    assert_eq!(route.polyline.len(), 3);
    assert!((route.distance_meters - 4828.032).abs() < 1e-6);

    let matrix = maps
        .distance_matrix(&waypoints[..1], &waypoints[1..])
        .expect("matrix");
    assert_eq!(matrix.len(), 1);
    assert!((matrix[0][0].distance_miles - 10.0).abs() < 1e-9);
    assert!((matrix[0][0].duration_minutes - 15.0).abs() < 1e-9);
    assert_eq!(matrix[0][1].distance_miles, 0.0);

    let gateway = RoadDistanceGateway::new(maps);
    let (polyline, miles) = gateway.route_polyline(&waypoints);
    assert_eq!(polyline.len(), 3);
    assert!((miles - 3.0).abs() < 1e-9);
}

#[test]
#[ignore = "requires docker"]
fn denied_request_falls_back_to_straight_lines() {
    let (_container, base_url) = wiremock_container().expect("start wiremock container");

    stub(
        &base_url,
        "directions",
        &[("origin", "45.5152,-122.6784"), ("destination", "45.5898,-122.5951")],
        json!({ "status": "REQUEST_DENIED", "error_message": "The provided API key is invalid." }),
    );

    let maps = client(&base_url);
    let waypoints = [(45.5152, -122.6784), (45.5898, -122.5951)];

    match maps.directions(&waypoints) {
        Err(MapsError::Status { status, message }) => {
            assert_eq!(status, "REQUEST_DENIED");
            assert!(message.contains("invalid"));
        }
        other => panic!("expected status error, got {:?}", other),
    }

    let gateway = RoadDistanceGateway::new(maps);
    let (polyline, miles) = gateway.route_polyline(&waypoints);
    assert_eq!(polyline.points(), &waypoints[..]);
    assert_eq!(miles, path_miles(&waypoints));
}
