//! Usecase layer: application workflows + events.

pub mod event;
pub mod order;
pub mod stats;
pub mod validate;
