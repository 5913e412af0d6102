//! ECS systems that operate on the entity pool each tick.
//!
//! Systems are plain functions over the pool and whatever explicit state they
//! need. They do not own state; the engine passes it in, in a fixed order.

pub mod cleanup;
pub mod ledger;
pub mod movement;
pub mod projectile;
pub mod snapshot;
pub mod targeting;
pub mod wave_spawner;
