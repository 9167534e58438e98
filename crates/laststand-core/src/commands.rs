//! Inbound commands from input and UI collaborators.

use serde::{Deserialize, Serialize};

use crate::enums::UpgradeTrackId;

/// Commands consumed by the engine at the start of the next tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Begin a run from the main menu.
    StartGame,
    /// Tear the run down and start a fresh one (from any phase).
    Restart,
    ReturnToMenu,
    Pause,
    Resume,
    /// Movement intent. Clamped to unit length.
    SetMovement { x: f64, y: f64 },
    /// Aim at a world point.
    AimAt { x: f64, y: f64 },
    /// Trigger held or released. Fire is automatic while held.
    SetShooting { held: bool },
    UseSkill,
    Dash,
    Reload,
    /// Select an owned weapon by index.
    SwitchWeapon { slot: usize },
    /// Pick an offered upgrade. `None` resolves the offer like a timeout.
    SelectUpgrade { track: Option<UpgradeTrackId> },
    /// Simulation speed multiplier, clamped to [0, 4].
    SetTimeScale { scale: f64 },
}
