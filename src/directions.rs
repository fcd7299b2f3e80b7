//! Road-distance gateway with straight-line fallback.
//!
//! Wraps an optional [`DirectionsProvider`]. Without one, or whenever the
//! provider fails, routes degrade to straight segments between the
//! waypoints and haversine mileage. Callers never see a maps error.

use tracing::warn;

use crate::config::MapsConfig;
use crate::google::{GoogleMapsClient, METERS_PER_MILE};
use crate::haversine::path_miles;
use crate::model::Coord;
use crate::polyline::Polyline;
use crate::traits::{DirectionsProvider, DistanceMatrix};

#[derive(Debug, Clone)]
pub struct RoadDistanceGateway<P = GoogleMapsClient> {
    provider: Option<P>,
}

impl RoadDistanceGateway<GoogleMapsClient> {
    /// Builds the gateway from config; a missing key or a client that
    /// cannot be built selects the fallback.
    pub fn from_config(config: &MapsConfig) -> Self {
        let provider = match &config.api_key {
            Some(key) => match GoogleMapsClient::new(config, key.clone()) {
                Ok(client) => Some(client),
                Err(err) => {
                    warn!(error = %err, "failed to build maps client, using straight lines");
                    None
                }
            },
            None => None,
        };
        Self { provider }
    }
}

impl<P: DirectionsProvider> RoadDistanceGateway<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Gateway that always uses the straight-line estimate.
    pub fn straight_line() -> Self {
        Self { provider: None }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    /// Road geometry and mileage through `waypoints` in order.
    pub fn route_polyline(&self, waypoints: &[Coord]) -> (Polyline, f64) {
        if waypoints.len() < 2 {
            return (Polyline::new(waypoints.to_vec()), 0.0);
        }

        let Some(provider) = &self.provider else {
            return straight_line_fallback(waypoints);
        };

        match provider.directions(waypoints) {
            Ok(route) => (route.polyline, route.distance_meters / METERS_PER_MILE),
            Err(err) => {
                warn!(error = %err, waypoints = waypoints.len(), "directions failed, using straight lines");
                straight_line_fallback(waypoints)
            }
        }
    }

    /// Drive distance/time between every origin and destination.
    ///
    /// `None` means the provider could not be consulted; it is never
    /// replaced with estimated values.
    pub fn distance_matrix(
        &self,
        origins: &[Coord],
        destinations: &[Coord],
    ) -> Option<DistanceMatrix> {
        let provider = self.provider.as_ref()?;
        match provider.distance_matrix(origins, destinations) {
            Ok(matrix) => Some(matrix),
            Err(err) => {
                warn!(error = %err, "distance matrix unavailable");
                None
            }
        }
    }
}

fn straight_line_fallback(waypoints: &[Coord]) -> (Polyline, f64) {
    (Polyline::new(waypoints.to_vec()), path_miles(waypoints))
}
