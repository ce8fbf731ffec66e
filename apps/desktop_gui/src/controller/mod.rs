//! Controller layer: UI events, status text, and command orchestration.

pub mod events;
pub mod orchestration;
