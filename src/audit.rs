//! Constraint violation counting for any assignment set.
//!
//! Assignments naming a vehicle or ride that is not in the request are
//! skipped rather than counted: optimizer output is not validated upstream.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::model::{Ride, RouteAssignment, Vehicle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViolationCounts {
    /// Rides with more passengers than the vehicle seats.
    pub capacity: u32,
    /// Rides with more luggage than the vehicle holds.
    pub luggage: u32,
    /// Adjacent pairs where a less urgent ride runs before a more urgent one.
    pub priority_ordering: u32,
}

impl ViolationCounts {
    pub fn total(&self) -> u32 {
        self.capacity + self.luggage + self.priority_ordering
    }
}

pub fn count_violations(
    assignments: &[RouteAssignment],
    rides: &[Ride],
    vehicles: &[Vehicle],
) -> ViolationCounts {
    let rides_by_id: HashMap<&str, &Ride> = rides.iter().map(|r| (r.id.as_str(), r)).collect();
    let vehicles_by_id: HashMap<&str, &Vehicle> =
        vehicles.iter().map(|v| (v.id.as_str(), v)).collect();

    let mut counts = ViolationCounts::default();
    for assignment in assignments {
        let Some(vehicle) = vehicles_by_id.get(assignment.vehicle_id.as_str()) else {
            warn!(vehicle_id = %assignment.vehicle_id, "skipping assignment for unknown vehicle");
            continue;
        };

        let mut known = Vec::with_capacity(assignment.ride_ids_in_order.len());
        for ride_id in &assignment.ride_ids_in_order {
            match rides_by_id.get(ride_id.as_str()) {
                Some(ride) => known.push(*ride),
                None => warn!(%ride_id, "skipping unknown ride in assignment"),
            }
        }

        for ride in &known {
            if ride.passenger_count > vehicle.capacity {
                counts.capacity += 1;
            }
            if ride.luggage_count > vehicle.luggage_capacity {
                counts.luggage += 1;
            }
        }

        // Unknown rides are dropped first, so neighbours around a skipped id
        // are compared with each other.
        counts.priority_ordering += known
            .windows(2)
            .filter(|pair| pair[0].priority.rank() > pair[1].priority.rank())
            .count() as u32;
    }

    counts
}
