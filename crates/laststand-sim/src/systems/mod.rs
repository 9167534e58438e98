//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` plus whatever engine state
//! they touch. They run in a fixed order, see `SimulationEngine::run_systems`.

pub mod cleanup;
pub mod collision;
pub mod effects;
pub mod enemy_ai;
pub mod hazards;
pub mod missiles;
pub mod pickups;
pub mod player_control;
pub mod projectiles;
pub mod snapshot;
pub mod wave_spawner;
