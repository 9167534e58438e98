//! Headless simulation engine for LAST STAND.
//!
//! Owns the ECS world and runs every gameplay system in a fixed order each
//! tick. No rendering, audio or host dependency, so runs are reproducible
//! from a seed.

pub mod combat;
pub mod engine;
pub mod player;
pub mod systems;
pub mod upgrades;
pub mod weapon;
pub mod world_setup;
