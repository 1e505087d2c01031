//! Binary entrypoint.
//!
//! Layers:
//! - domain: pure graph types and ports
//! - usecase: ordering pipeline + progress events
//! - infrastructure: algorithms, serde + async IO
//! - interface: CLI wiring

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    scc_task_order::interface::cli::run().await
}
