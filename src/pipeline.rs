//! One comparison pass: naive baseline versus optimizer output.
//!
//! Stages run in a fixed order: baseline and audit, optimizer call,
//! output parsing, then road enrichment of both assignment sets. The
//! streaming and non-streaming entry points share this sequence; they
//! differ only in the [`EventSink`] that observes it.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::audit::count_violations;
use crate::baseline::round_robin;
use crate::directions::RoadDistanceGateway;
use crate::error::PipelineError;
use crate::events::{NullSink, PipelineEvent, ROUTE_STATUS_MESSAGE};
use crate::llm::{build_prompt, parse_optimization};
use crate::model::{Coord, OptimizationResult, Ride, RouteAssignment, Vehicle};
use crate::traits::{CompletionProvider, DirectionsProvider, EventSink};

/// Final payload handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Optimizer output with road geometry attached.
    pub result: OptimizationResult,
    pub prompt_used: String,
    pub naive_assignments: Vec<RouteAssignment>,
    pub naive_miles: f64,
    pub optimized_miles: f64,
    pub naive_violations: u32,
    pub optimized_violations: u32,
}

pub struct Pipeline<'a, P, C> {
    gateway: &'a RoadDistanceGateway<P>,
    optimizer: &'a C,
}

impl<'a, P, C> Pipeline<'a, P, C>
where
    P: DirectionsProvider + Sync,
    C: CompletionProvider,
{
    pub fn new(gateway: &'a RoadDistanceGateway<P>, optimizer: &'a C) -> Self {
        Self { gateway, optimizer }
    }

    pub fn compare(&self, rides: &[Ride], vehicles: &[Vehicle]) -> Result<Comparison, PipelineError> {
        self.run(rides, vehicles, &mut NullSink)
    }

    /// Runs the pass and reports it as events: tokens while the optimizer
    /// generates, one status event, then exactly one result or error event.
    pub fn stream(&self, rides: &[Ride], vehicles: &[Vehicle], sink: &mut dyn EventSink) {
        match self.run(rides, vehicles, sink) {
            Ok(comparison) => sink.emit(PipelineEvent::Result {
                data: Box::new(comparison),
            }),
            Err(err) => sink.emit(PipelineEvent::Error {
                message: err.to_string(),
            }),
        }
    }

    fn run(
        &self,
        rides: &[Ride],
        vehicles: &[Vehicle],
        sink: &mut dyn EventSink,
    ) -> Result<Comparison, PipelineError> {
        info!(rides = rides.len(), vehicles = vehicles.len(), "starting comparison");

        let baseline = round_robin(rides, vehicles)?;
        let naive_violations = count_violations(&baseline.assignments, rides, vehicles);

        let prompt = build_prompt(rides, vehicles);
        let raw = self.optimizer.complete(&prompt, &mut |chunk: &str| {
            sink.emit(PipelineEvent::Token {
                text: chunk.to_string(),
            })
        })?;
        let optimized = parse_optimization(&raw)?;

        sink.emit(PipelineEvent::Status {
            message: ROUTE_STATUS_MESSAGE.to_string(),
        });

        let gateway = self.gateway;
        let (naive_assignments, optimized_assignments) = rayon::join(
            || enrich(gateway, &baseline.assignments, rides, vehicles),
            || enrich(gateway, &optimized.assignments, rides, vehicles),
        );
        let optimized_violations = count_violations(&optimized_assignments, rides, vehicles);

        let naive_miles = total_miles(&naive_assignments);
        let optimized_miles = total_miles(&optimized_assignments);
        info!(
            naive_miles,
            optimized_miles,
            straight_line_naive_miles = baseline.straight_line_miles,
            naive_violations = naive_violations.total(),
            optimized_violations = optimized_violations.total(),
            "comparison complete"
        );

        Ok(Comparison {
            result: OptimizationResult {
                assignments: optimized_assignments,
                ..optimized
            },
            prompt_used: prompt,
            naive_assignments,
            naive_miles: round_tenth(naive_miles),
            optimized_miles: round_tenth(optimized_miles),
            naive_violations: naive_violations.total(),
            optimized_violations: optimized_violations.total(),
        })
    }
}

/// Attaches road geometry to every assignment, one vehicle per task.
///
/// Assignments for unknown vehicles are returned unchanged, with no
/// geometry and zero miles.
pub fn enrich<P>(
    gateway: &RoadDistanceGateway<P>,
    assignments: &[RouteAssignment],
    rides: &[Ride],
    vehicles: &[Vehicle],
) -> Vec<RouteAssignment>
where
    P: DirectionsProvider + Sync,
{
    let rides_by_id: HashMap<&str, &Ride> = rides.iter().map(|r| (r.id.as_str(), r)).collect();
    let vehicles_by_id: HashMap<&str, &Vehicle> =
        vehicles.iter().map(|v| (v.id.as_str(), v)).collect();

    assignments
        .par_iter()
        .map(|assignment| {
            let Some(vehicle) = vehicles_by_id.get(assignment.vehicle_id.as_str()) else {
                warn!(vehicle_id = %assignment.vehicle_id, "no route for unknown vehicle");
                return assignment.clone();
            };
            let points = waypoints(vehicle, assignment, &rides_by_id);
            let (polyline, miles) = gateway.route_polyline(&points);
            assignment.with_route(polyline, miles)
        })
        .collect()
}

/// Vehicle position, then pickup and dropoff of each known ride in order.
pub fn waypoints(
    vehicle: &Vehicle,
    assignment: &RouteAssignment,
    rides_by_id: &HashMap<&str, &Ride>,
) -> Vec<Coord> {
    let mut points = vec![vehicle.position()];
    for ride_id in &assignment.ride_ids_in_order {
        match rides_by_id.get(ride_id.as_str()) {
            Some(ride) => {
                points.push(ride.pickup());
                points.push(ride.dropoff());
            }
            None => warn!(%ride_id, vehicle_id = %vehicle.id, "skipping unknown ride"),
        }
    }
    points
}

fn total_miles(assignments: &[RouteAssignment]) -> f64 {
    assignments.iter().map(|a| a.route_miles).sum()
}

fn round_tenth(miles: f64) -> f64 {
    (miles * 10.0).round() / 10.0
}
