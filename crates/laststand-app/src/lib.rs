//! LAST STAND headless host.
//!
//! Wires the simulation engine to a fixed-rate game-loop thread, an
//! autopilot input source, a persisted high-score table and the CLI.

pub mod autopilot;
pub mod cli;
pub mod error;
pub mod game_loop;
pub mod highscores;
pub mod session;
pub mod state;

pub use laststand_core as core;
