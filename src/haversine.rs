//! Great-circle distance estimates.
//!
//! Ignores the road network, so it underestimates real driving distance,
//! but it is pure and always available. Used for the baseline mileage and
//! as the fallback when the maps provider cannot be reached.

use crate::model::Coord;

/// Earth radius in miles.
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Haversine distance between two (lat, lng) points in miles.
pub fn haversine_miles(from: Coord, to: Coord) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1.0 for antipodal points.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_MILES * c
}

/// Sum of haversine distances between consecutive points.
pub fn path_miles(points: &[Coord]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_miles(pair[0], pair[1]))
        .sum()
}
