//! Core types and definitions for the LAST STAND simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! vector math, entity components, commands, snapshots, events, tuning
//! constants and run configuration. It has no dependency on the ECS or
//! any host runtime.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod entity;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
