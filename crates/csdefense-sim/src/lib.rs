//! Simulation engine for csdefense.
//!
//! Owns the hecs-backed entity pool, runs systems in a fixed per-tick order,
//! and produces GameStateSnapshots for a frontend.

pub mod economy;
pub mod engine;
pub mod error;
pub mod pool;
pub mod systems;
pub mod world_setup;

pub use csdefense_core as core;
pub use engine::SimulationEngine;
pub use error::SetupError;

#[cfg(test)]
mod tests;
