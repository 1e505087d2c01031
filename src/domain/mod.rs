//! Domain layer: pure graph types and ports.

pub mod graph;
pub mod traits;
