//! Dependency-respecting task ordering over graphs that may contain cycles.
//!
//! Layers:
//! - domain: graph types and ports, no IO
//! - usecase: condensation, order derivation, plan validation + progress events
//! - infrastructure: SCC and topological sort adapters, serde + async IO
//! - interface: CLI wiring

pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod usecase;
