//! Wave generation and the wave director for csdefense.
//!
//! Difficulty scaling, enemy unlocks, boss compositions and the
//! Idle/Spawning/Draining state machine that drip-feeds spawns.
//! No ECS dependency; operates on plain data.

pub mod composer;
pub mod director;

pub use csdefense_core as core;

pub use composer::{compose_wave, generate_schedule, SpawnGroup, WaveDefinition};
pub use director::{SpawnOrder, WaveCompletion, WaveDirector, WaveStart};
