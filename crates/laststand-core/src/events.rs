//! Fire-and-forget signals for audio, screen-effect and UI collaborators.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Events emitted during a tick and drained into its snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    ShotFired { weapon: WeaponKind, pellets: u32 },
    ReloadStarted { weapon: WeaponKind },
    EnemyHit { enemy_id: u32, damage: f64, critical: bool },
    EnemyKilled { enemy_id: u32, kind: EnemyKind, score: u64, combo: u32 },
    PlayerHurt { damage: f64, health: f64 },
    PlayerRevived { health: f64 },
    WaveStarted { wave: u32, quota: u32 },
    WaveCompleted { wave: u32 },
    BossSpawned { boss_type: BossType, wave: u32 },
    BossAbility { boss_type: BossType, ability: BossAbility },
    MissileLaunched,
    Explosion { x: f64, y: f64, radius: f64 },
    SkillUsed { x: f64, y: f64, radius: f64, hits: u32 },
    ScreenShake { duration_secs: f64, intensity: f64 },
    ItemPicked { kind: ItemKind },
    UpgradeOffered { tracks: Vec<UpgradeTrackId> },
    UpgradeApplied { track: UpgradeTrackId, level: u8 },
    GameOver { score: u64, wave: u32 },
}
