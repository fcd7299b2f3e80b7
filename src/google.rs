//! Google Maps HTTP adapter for directions and distance matrices.

use serde::Deserialize;
use tracing::debug;

use crate::config::MapsConfig;
use crate::error::MapsError;
use crate::model::Coord;
use crate::polyline::Polyline;
use crate::traits::{DirectionsProvider, DistanceMatrix, MatrixCell, RoadRoute};

pub const METERS_PER_MILE: f64 = 1609.344;

#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl GoogleMapsClient {
    pub fn new(config: &MapsConfig, api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    fn get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, MapsError> {
        let url = format!("{}/{}/json", self.base_url, endpoint);
        debug!(%url, "calling maps provider");

        let body = self
            .client
            .get(url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .and_then(|resp| resp.error_for_status())?
            .text()?;

        parse_body(&body)
    }
}

impl DirectionsProvider for GoogleMapsClient {
    fn directions(&self, waypoints: &[Coord]) -> Result<RoadRoute, MapsError> {
        let params = directions_params(waypoints)
            .ok_or_else(|| MapsError::MalformedPayload("no waypoints".to_string()))?;

        let body: DirectionsResponse = self.get("directions", &params)?;
        road_route(body)
    }

    fn distance_matrix(
        &self,
        origins: &[Coord],
        destinations: &[Coord],
    ) -> Result<DistanceMatrix, MapsError> {
        let params = [
            ("origins", join_coords(origins)),
            ("destinations", join_coords(destinations)),
        ];

        let body: MatrixResponse = self.get("distancematrix", &params)?;
        check_status(&body.status, body.error_message)?;

        Ok(body
            .rows
            .into_iter()
            .map(|row| row.elements.into_iter().map(MatrixElement::into_cell).collect())
            .collect())
    }
}

/// Query parameters for a directions call: first waypoint as origin, last
/// as destination, interior points in order.
fn directions_params(waypoints: &[Coord]) -> Option<Vec<(&'static str, String)>> {
    let (origin, destination) = (waypoints.first()?, waypoints.last()?);

    let mut params = vec![
        ("origin", format_coord(*origin)),
        ("destination", format_coord(*destination)),
    ];
    if waypoints.len() > 2 {
        params.push(("waypoints", join_coords(&waypoints[1..waypoints.len() - 1])));
    }
    Some(params)
}

fn road_route(body: DirectionsResponse) -> Result<RoadRoute, MapsError> {
    check_status(&body.status, body.error_message)?;

    let route = body
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| MapsError::MalformedPayload("no routes in response".to_string()))?;

    let polyline = Polyline::decode(&route.overview_polyline.points)
        .ok_or_else(|| MapsError::MalformedPayload("corrupt overview polyline".to_string()))?;

    Ok(RoadRoute {
        polyline,
        distance_meters: route.legs.iter().map(|leg| leg.distance.value).sum(),
    })
}

fn parse_body<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T, MapsError> {
    serde_json::from_str(body).map_err(|err| MapsError::MalformedPayload(err.to_string()))
}

fn check_status(status: &str, message: Option<String>) -> Result<(), MapsError> {
    if status == "OK" {
        Ok(())
    } else {
        Err(MapsError::Status {
            status: status.to_string(),
            message: message.unwrap_or_default(),
        })
    }
}

fn format_coord((lat, lng): Coord) -> String {
    format!("{},{}", lat, lng)
}

fn join_coords(coords: &[Coord]) -> String {
    coords
        .iter()
        .map(|coord| format_coord(*coord))
        .collect::<Vec<_>>()
        .join("|")
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    overview_polyline: EncodedPolyline,
    legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Deserialize)]
struct EncodedPolyline {
    points: String,
}

#[derive(Debug, Deserialize)]
struct DirectionsLeg {
    distance: ValueField,
}

#[derive(Debug, Deserialize)]
struct ValueField {
    value: f64,
}

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    distance: Option<ValueField>,
    duration: Option<ValueField>,
}

impl MatrixElement {
    /// Elements the provider could not route come back as zero cells.
    fn into_cell(self) -> MatrixCell {
        match (self.status.as_str(), self.distance, self.duration) {
            ("OK", Some(distance), Some(duration)) => MatrixCell {
                distance_miles: distance.value / METERS_PER_MILE,
                duration_minutes: duration.value / 60.0,
            },
            _ => MatrixCell {
                distance_miles: 0.0,
                duration_minutes: 0.0,
            },
        }
    }
}
