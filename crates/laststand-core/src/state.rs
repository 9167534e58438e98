//! Read-only snapshot handed to collaborators after every tick.

use serde::{Deserialize, Serialize};

use crate::components::EffectKind;
use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{SimTime, Vector2};

/// Complete observable state after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: WaveView,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub missiles: Vec<MissileView>,
    pub items: Vec<ItemView>,
    pub hazards: Vec<HazardView>,
    pub effects: Vec<EffectView>,
    pub upgrade_offer: Option<UpgradeOfferView>,
    /// Events emitted during this tick.
    pub events: Vec<GameEvent>,
    pub game_over: Option<RunSummary>,
}

/// Wave progress. `total` counts the quota plus the miniboss.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub number: u32,
    pub killed: u32,
    pub total: u32,
    pub boss_spawned: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vector2,
    pub aim: Vector2,
    pub health: f64,
    pub max_health: f64,
    pub score: u64,
    pub combo: u32,
    pub combo_multiplier: f64,
    pub weapon: WeaponView,
    /// 1.0 when the skill is ready.
    pub skill_ready: f64,
    pub skill_charges: u32,
    /// 1.0 when dash is ready.
    pub dash_ready: f64,
    pub dashing: bool,
    pub invulnerable: bool,
    pub buffs: BuffView,
    pub revives: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponView {
    pub kind: WeaponKind,
    pub slot: usize,
    pub current_ammo: u32,
    pub magazine_size: u32,
    /// `None` for infinite reserve.
    pub total_ammo: Option<u32>,
    pub reloading: bool,
    /// 0..1 while reloading, 0 otherwise.
    pub reload_progress: f64,
}

/// Remaining buff durations (zero when inactive).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuffView {
    pub speed_secs: f64,
    pub damage_secs: f64,
    pub shield_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: EnemyKind,
    pub position: Vector2,
    pub radius: f64,
    pub health_fraction: f64,
    pub state: AiState,
    pub charging: bool,
    pub shielded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Vector2,
    pub velocity: Vector2,
    pub radius: f64,
    pub faction: Faction,
    pub explosive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissileView {
    pub position: Vector2,
    pub velocity: Vector2,
    pub explosion_radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemView {
    pub kind: ItemKind,
    pub position: Vector2,
    pub remaining_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardView {
    pub position: Vector2,
    pub radius: f64,
    pub remaining_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectView {
    pub kind: EffectKind,
    pub position: Vector2,
    pub progress: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeOfferView {
    pub tracks: Vec<UpgradeChoiceView>,
    pub remaining_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeChoiceView {
    pub track: UpgradeTrackId,
    /// Level the track reaches if picked.
    pub next_level: u8,
}

/// What the host needs to record a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub wave: u32,
    pub kills: u32,
    pub elapsed_secs: f64,
}
