//! Ride, vehicle and assignment records exchanged with the dispatch pipeline.
//!
//! Field names match the JSON wire shape accepted from the HTTP layer and
//! returned to the frontend.

use serde::{Deserialize, Serialize};

use crate::polyline::Polyline;

/// A (latitude, longitude) pair in degrees.
pub type Coord = (f64, f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Ordering rank, most urgent first: urgent 0, high 1, medium 2, low 3.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Urgent => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    #[default]
    Transfer,
    AirportArrival,
    AirportDeparture,
    Hourly,
    PointToPoint,
}

impl ServiceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceType::Transfer => "transfer",
            ServiceType::AirportArrival => "airport_arrival",
            ServiceType::AirportDeparture => "airport_departure",
            ServiceType::Hourly => "hourly",
            ServiceType::PointToPoint => "point_to_point",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    EnRoute,
    OnTrip,
    OffDuty,
}

impl VehicleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::EnRoute => "en_route",
            VehicleStatus::OnTrip => "on_trip",
            VehicleStatus::OffDuty => "off_duty",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    #[default]
    Sedan,
    Suv,
    Van,
    Sprinter,
}

impl VehicleType {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Sedan => "sedan",
            VehicleType::Suv => "suv",
            VehicleType::Van => "van",
            VehicleType::Sprinter => "sprinter",
        }
    }
}

/// A ride request. Immutable once it is part of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    pub id: String,
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    pub dropoff_lat: f64,
    pub dropoff_lng: f64,
    /// ISO-8601 timestamp; compared lexicographically.
    pub time_window_start: String,
    pub time_window_end: String,
    pub passenger_count: u32,
    pub priority: Priority,
    #[serde(default)]
    pub pickup_label: String,
    #[serde(default)]
    pub dropoff_label: String,
    #[serde(default)]
    pub service_type: ServiceType,
    #[serde(default)]
    pub luggage_count: u32,
    #[serde(default)]
    pub notes: String,
}

impl Ride {
    pub fn pickup(&self) -> Coord {
        (self.pickup_lat, self.pickup_lng)
    }

    pub fn dropoff(&self) -> Coord {
        (self.dropoff_lat, self.dropoff_lng)
    }
}

fn default_luggage_capacity() -> u32 {
    4
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    pub current_lat: f64,
    pub current_lng: f64,
    pub capacity: u32,
    pub status: VehicleStatus,
    #[serde(default)]
    pub vehicle_type: VehicleType,
    #[serde(default = "default_luggage_capacity")]
    pub luggage_capacity: u32,
}

impl Vehicle {
    pub fn position(&self) -> Coord {
        (self.current_lat, self.current_lng)
    }

    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }
}

/// One vehicle's ordered ride sequence.
///
/// `polyline` and `route_miles` stay empty until the assignment has been
/// enriched; enrichment builds a new value rather than mutating this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAssignment {
    pub vehicle_id: String,
    pub ride_ids_in_order: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub polyline: Polyline,
    #[serde(default)]
    pub route_miles: f64,
}

impl RouteAssignment {
    pub fn new(
        vehicle_id: impl Into<String>,
        ride_ids_in_order: Vec<String>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            ride_ids_in_order,
            reasoning: reasoning.into(),
            polyline: Polyline::default(),
            route_miles: 0.0,
        }
    }

    /// Returns a copy carrying the given road geometry and mileage.
    pub fn with_route(&self, polyline: Polyline, route_miles: f64) -> Self {
        Self {
            polyline,
            route_miles,
            ..self.clone()
        }
    }
}

/// Assignment set produced by the external optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub assignments: Vec<RouteAssignment>,
    #[serde(default)]
    pub overall_strategy: String,
    #[serde(default)]
    pub unassigned_rides: Vec<String>,
}

/// Inbound request: the rides to place and the fleet to place them on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub rides: Vec<Ride>,
    pub vehicles: Vec<Vehicle>,
}
