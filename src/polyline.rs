//! Polyline representation for route geometries.
//!
//! Routes are kept as decoded coordinate sequences. Decoding from the
//! compact encoded format happens at the boundary, when a directions
//! response arrives from the maps provider.

use serde::{Deserialize, Serialize};

use crate::model::Coord;

/// A polyline representing a route geometry as decoded coordinates.
///
/// Serialises as a bare `[[lat, lng], ...]` list for map rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<Coord>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    ///
    /// Each point is a (latitude, longitude) tuple.
    pub fn new(points: Vec<Coord>) -> Self {
        Self { points }
    }

    /// Decodes an encoded polyline string (5-bit chunks, offset 63, 1e5 precision).
    ///
    /// Decoding stops at the first incomplete coordinate instead of reading
    /// past the end of the input. Returns `None` when the running
    /// coordinate overflows, which only happens for corrupt input.
    pub fn decode(encoded: &str) -> Option<Self> {
        let bytes = encoded.as_bytes();
        let mut index = 0;
        let mut lat: i64 = 0;
        let mut lng: i64 = 0;
        let mut points = Vec::new();

        while index < bytes.len() {
            let Some(delta_lat) = next_delta(bytes, &mut index) else {
                break;
            };
            let Some(delta_lng) = next_delta(bytes, &mut index) else {
                break;
            };
            lat = lat.checked_add(delta_lat)?;
            lng = lng.checked_add(delta_lng)?;
            points.push((lat as f64 / 1e5, lng as f64 / 1e5));
        }

        Some(Self { points })
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coord] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coord> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Reads one signed delta, advancing `index` past its chunks.
fn next_delta(bytes: &[u8], index: &mut usize) -> Option<i64> {
    let mut shift = 0;
    let mut result: i64 = 0;

    loop {
        let byte = i64::from(*bytes.get(*index)?) - 63;
        *index += 1;
        result |= (byte & 0x1f) << shift;
        shift += 5;
        if byte < 0x20 {
            break;
        }
        if shift > 60 {
            return None;
        }
    }

    if result & 1 == 1 {
        Some(!(result >> 1))
    } else {
        Some(result >> 1)
    }
}
