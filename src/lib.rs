//! fleet-dispatch core
//!
//! Compares optimizer-proposed ride assignments for a small fleet against a
//! naive round-robin baseline, using road distances when a maps provider
//! is configured and great-circle estimates otherwise.

pub mod audit;
pub mod baseline;
pub mod config;
pub mod directions;
pub mod error;
pub mod events;
pub mod google;
pub mod haversine;
pub mod llm;
pub mod model;
pub mod pipeline;
pub mod polyline;
pub mod seed;
pub mod traits;
