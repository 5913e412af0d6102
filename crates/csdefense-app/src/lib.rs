//! csdefense headless runner.
//!
//! This crate wires the simulation crates into a paced game loop thread
//! driven over a command channel, plus a seeded autoplayer that stands in
//! for a player.

pub mod autoplay;
pub mod game_loop;
pub mod state;

pub use csdefense_core as core;
