//! Plan creation and deterministic expansion into 12 weeks of 5 missions.

pub mod generator;
pub mod handlers;
pub mod templates;
