//! Seams between the dispatch core and its external collaborators.
//!
//! Concrete HTTP adapters live in `google` and `llm`; tests substitute
//! in-process stubs.

use crate::error::{CompletionError, MapsError};
use crate::events::PipelineEvent;
use crate::model::Coord;
use crate::polyline::Polyline;

/// A road route as reported by the maps provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadRoute {
    pub polyline: Polyline,
    /// Sum of all leg distances.
    pub distance_meters: f64,
}

/// One origin/destination cell of a distance matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixCell {
    pub distance_miles: f64,
    pub duration_minutes: f64,
}

/// Indexed `[origin][destination]`.
pub type DistanceMatrix = Vec<Vec<MatrixCell>>;

/// Provides road routes and distance matrices.
pub trait DirectionsProvider {
    /// Route from the first to the last waypoint via every interior one, in order.
    fn directions(&self, waypoints: &[Coord]) -> Result<RoadRoute, MapsError>;

    fn distance_matrix(
        &self,
        origins: &[Coord],
        destinations: &[Coord],
    ) -> Result<DistanceMatrix, MapsError>;
}

/// Single-prompt text generation.
pub trait CompletionProvider {
    /// Generates a completion for `prompt`, handing each text chunk to
    /// `on_text` as it arrives, and returns the full text.
    fn complete(&self, prompt: &str, on_text: &mut dyn FnMut(&str))
    -> Result<String, CompletionError>;
}

/// Receives the intermediate and terminal events of a pipeline run.
pub trait EventSink {
    fn emit(&mut self, event: PipelineEvent);
}
