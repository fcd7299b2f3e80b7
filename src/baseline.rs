//! Naive round-robin assignment used as the comparison floor.
//!
//! No geographic reasoning: rides are ordered by pickup window and dealt
//! across the available vehicles in turn.

use tracing::debug;

use crate::error::PlanError;
use crate::haversine::haversine_miles;
use crate::model::{Ride, RouteAssignment, Vehicle};

pub const BASELINE_REASONING: &str = "Naive round-robin assignment (no optimization)";

#[derive(Debug, Clone, PartialEq)]
pub struct BaselinePlan {
    pub assignments: Vec<RouteAssignment>,
    /// Vehicle start -> pickup -> dropoff for each ride, as the crow flies.
    pub straight_line_miles: f64,
}

pub fn round_robin(rides: &[Ride], vehicles: &[Vehicle]) -> Result<BaselinePlan, PlanError> {
    let available: Vec<&Vehicle> = vehicles.iter().filter(|v| v.is_available()).collect();
    if available.is_empty() {
        return Err(PlanError::NoAvailableVehicles);
    }

    let mut ordered: Vec<&Ride> = rides.iter().collect();
    ordered.sort_by(|a, b| a.time_window_start.cmp(&b.time_window_start));

    let mut dealt: Vec<Vec<&Ride>> = vec![Vec::new(); available.len()];
    for (i, ride) in ordered.into_iter().enumerate() {
        dealt[i % available.len()].push(ride);
    }

    let mut assignments = Vec::new();
    let mut straight_line_miles = 0.0;
    for (vehicle, rides) in available.iter().zip(&dealt) {
        if rides.is_empty() {
            continue;
        }

        let mut position = vehicle.position();
        for ride in rides {
            straight_line_miles += haversine_miles(position, ride.pickup());
            straight_line_miles += haversine_miles(ride.pickup(), ride.dropoff());
            position = ride.dropoff();
        }

        assignments.push(RouteAssignment::new(
            vehicle.id.clone(),
            rides.iter().map(|ride| ride.id.clone()).collect(),
            BASELINE_REASONING,
        ));
    }

    debug!(
        vehicles = available.len(),
        routes = assignments.len(),
        straight_line_miles,
        "built round-robin baseline"
    );

    Ok(BaselinePlan {
        assignments,
        straight_line_miles,
    })
}
