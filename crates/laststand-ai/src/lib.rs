//! Enemy AI for LAST STAND.
//!
//! Pure functions computing chase/attack transitions, movement intent and
//! miniboss ability plans. No ECS dependency: operates on plain data and
//! an injected RNG.

pub mod abilities;
pub mod fsm;
pub mod profiles;

#[cfg(test)]
mod tests;
