//! Test fixtures for fleet-dispatch.
//!
//! Provides:
//! - Builders for rides and vehicles with sensible defaults
//! - Stub maps and optimizer providers

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use fleet_dispatch::error::{CompletionError, MapsError};
use fleet_dispatch::model::{
    Coord, Priority, Ride, ServiceType, Vehicle, VehicleStatus, VehicleType,
};
use fleet_dispatch::polyline::Polyline;
use fleet_dispatch::traits::{
    CompletionProvider, DirectionsProvider, DistanceMatrix, MatrixCell, RoadRoute,
};

// ============================================================================
// Builders
// ============================================================================

/// Builder for test rides with sensible defaults.
#[derive(Clone, Debug)]
pub struct TestRide {
    ride: Ride,
}

impl TestRide {
    pub fn new(id: &str) -> Self {
        Self {
            ride: Ride {
                id: id.to_string(),
                pickup_lat: 45.5152,
                pickup_lng: -122.6784,
                dropoff_lat: 45.5287,
                dropoff_lng: -122.6819,
                time_window_start: "2026-02-28T09:00:00".to_string(),
                time_window_end: "2026-02-28T09:30:00".to_string(),
                passenger_count: 1,
                priority: Priority::Medium,
                pickup_label: String::new(),
                dropoff_label: String::new(),
                service_type: ServiceType::Transfer,
                luggage_count: 0,
                notes: String::new(),
            },
        }
    }

    pub fn pickup(mut self, lat: f64, lng: f64) -> Self {
        self.ride.pickup_lat = lat;
        self.ride.pickup_lng = lng;
        self
    }

    pub fn dropoff(mut self, lat: f64, lng: f64) -> Self {
        self.ride.dropoff_lat = lat;
        self.ride.dropoff_lng = lng;
        self
    }

    pub fn window_start(mut self, start: &str) -> Self {
        self.ride.time_window_start = start.to_string();
        self
    }

    pub fn passengers(mut self, count: u32) -> Self {
        self.ride.passenger_count = count;
        self
    }

    pub fn luggage(mut self, count: u32) -> Self {
        self.ride.luggage_count = count;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.ride.priority = priority;
        self
    }

    pub fn build(self) -> Ride {
        self.ride
    }
}

/// Builder for test vehicles with sensible defaults.
#[derive(Clone, Debug)]
pub struct TestVehicle {
    vehicle: Vehicle,
}

impl TestVehicle {
    pub fn new(id: &str) -> Self {
        Self {
            vehicle: Vehicle {
                id: id.to_string(),
                name: format!("Vehicle {}", id),
                current_lat: 45.5189,
                current_lng: -122.6793,
                capacity: 4,
                status: VehicleStatus::Available,
                vehicle_type: VehicleType::Sedan,
                luggage_capacity: 4,
            },
        }
    }

    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.vehicle.current_lat = lat;
        self.vehicle.current_lng = lng;
        self
    }

    pub fn capacity(mut self, capacity: u32) -> Self {
        self.vehicle.capacity = capacity;
        self
    }

    pub fn luggage_capacity(mut self, capacity: u32) -> Self {
        self.vehicle.luggage_capacity = capacity;
        self
    }

    pub fn status(mut self, status: VehicleStatus) -> Self {
        self.vehicle.status = status;
        self
    }

    pub fn build(self) -> Vehicle {
        self.vehicle
    }
}

/// Eight rides across downtown Portland, one hour apart from 06:00.
///
/// R1 is urgent and R2 high; the rest are medium or low.
pub fn eight_rides() -> Vec<Ride> {
    let priorities = [
        Priority::Urgent,
        Priority::High,
        Priority::Medium,
        Priority::Low,
        Priority::Medium,
        Priority::Low,
        Priority::Medium,
        Priority::Low,
    ];
    priorities
        .iter()
        .enumerate()
        .map(|(i, priority)| {
            let offset = i as f64 * 0.005;
            TestRide::new(&format!("R{}", i + 1))
                .pickup(45.51 + offset, -122.68 + offset)
                .dropoff(45.53 + offset, -122.65 + offset)
                .window_start(&format!("2026-02-28T{:02}:00:00", 6 + i))
                .passengers(1 + (i as u32 % 3))
                .priority(*priority)
                .build()
        })
        .collect()
}

pub fn three_vehicles() -> Vec<Vehicle> {
    vec![
        TestVehicle::new("V1").at(45.52, -122.68).build(),
        TestVehicle::new("V2").at(45.53, -122.65).capacity(6).build(),
        TestVehicle::new("V3").at(45.59, -122.59).capacity(10).build(),
    ]
}

// ============================================================================
// Stub providers
// ============================================================================

/// Maps provider returning a fixed route and counting calls.
#[derive(Debug)]
pub struct StubDirections {
    result: Result<(Vec<Coord>, f64), String>,
    calls: AtomicUsize,
}

impl StubDirections {
    pub fn with_route(points: Vec<Coord>, distance_meters: f64) -> Self {
        Self {
            result: Ok((points, distance_meters)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(status: &str) -> Self {
        Self {
            result: Err(status.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DirectionsProvider for StubDirections {
    fn directions(&self, _waypoints: &[Coord]) -> Result<RoadRoute, MapsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.result {
            Ok((points, meters)) => Ok(RoadRoute {
                polyline: Polyline::new(points.clone()),
                distance_meters: *meters,
            }),
            Err(status) => Err(MapsError::Status {
                status: status.clone(),
                message: String::new(),
            }),
        }
    }

    fn distance_matrix(
        &self,
        origins: &[Coord],
        destinations: &[Coord],
    ) -> Result<DistanceMatrix, MapsError> {
        match &self.result {
            Ok(_) => Ok(vec![
                vec![
                    MatrixCell {
                        distance_miles: 1.0,
                        duration_minutes: 2.0,
                    };
                    destinations.len()
                ];
                origins.len()
            ]),
            Err(status) => Err(MapsError::Status {
                status: status.clone(),
                message: String::new(),
            }),
        }
    }
}

/// Optimizer that replays canned text in fixed chunks.
#[derive(Debug, Clone)]
pub struct StubOptimizer {
    chunks: Vec<String>,
    fail: bool,
}

impl StubOptimizer {
    /// Replays `text` split into chunks of at most `chunk_len` characters.
    pub fn replying(text: &str, chunk_len: usize) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let chunks = chars
            .chunks(chunk_len.max(1))
            .map(|chunk| chunk.iter().collect())
            .collect();
        Self {
            chunks,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            chunks: Vec::new(),
            fail: true,
        }
    }
}

impl CompletionProvider for StubOptimizer {
    fn complete(
        &self,
        _prompt: &str,
        on_text: &mut dyn FnMut(&str),
    ) -> Result<String, CompletionError> {
        if self.fail {
            return Err(CompletionError::Api {
                status: 529,
                body: "overloaded".to_string(),
            });
        }
        for chunk in &self.chunks {
            on_text(chunk);
        }
        Ok(self.chunks.concat())
    }
}
