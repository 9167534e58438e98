//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Current phase of the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Playing,
    Paused,
    /// Between waves; the world is frozen while an upgrade is chosen.
    UpgradeSelection,
    GameOver,
}

/// Enemy behaviour state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Idle,
    Chasing,
    Attacking,
}

/// Miniboss subtype. One is spawned at the end of every wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossType {
    /// Charges at the player.
    Brute,
    /// Teleports next to the player.
    Speed,
    /// Raises a damage-halving shield.
    Tank,
    /// Leaves poison clouds.
    Poison,
    /// Calls in minions.
    Summoner,
}

impl BossType {
    pub const ALL: [BossType; 5] = [
        BossType::Brute,
        BossType::Speed,
        BossType::Tank,
        BossType::Poison,
        BossType::Summoner,
    ];

    /// Subtype assigned to a wave number.
    pub fn for_wave(wave: u32) -> Self {
        match wave {
            0..=2 => BossType::Brute,
            3..=4 => BossType::Speed,
            5..=6 => BossType::Tank,
            7..=8 => BossType::Poison,
            _ => BossType::Summoner,
        }
    }
}

/// What kind of enemy an entity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "boss")]
pub enum EnemyKind {
    Zombie,
    MiniBoss(BossType),
}

impl EnemyKind {
    pub fn is_boss(&self) -> bool {
        matches!(self, EnemyKind::MiniBoss(_))
    }
}

/// Which side fired a projectile. Projectiles only hit the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// Collision layer of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionGroup {
    Player,
    Enemy,
    Projectile,
    Item,
}

/// Player weapon catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Pistol,
    Shotgun,
    AssaultRifle,
    Sniper,
    RocketLauncher,
}

/// Pickup dropped by a killed enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    HealthSmall,
    HealthLarge,
    Ammo,
    SpeedBoost,
    DamageBoost,
    Shield,
    Bomb,
}

impl ItemKind {
    pub const ALL: [ItemKind; 7] = [
        ItemKind::HealthSmall,
        ItemKind::HealthLarge,
        ItemKind::Ammo,
        ItemKind::SpeedBoost,
        ItemKind::DamageBoost,
        ItemKind::Shield,
        ItemKind::Bomb,
    ];
}

/// Upgrade tracks offered between waves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeTrackId {
    Vitality,
    Agility,
    Firepower,
    RateOfFire,
    SkillPower,
    Survivability,
}

impl UpgradeTrackId {
    pub const ALL: [UpgradeTrackId; 6] = [
        UpgradeTrackId::Vitality,
        UpgradeTrackId::Agility,
        UpgradeTrackId::Firepower,
        UpgradeTrackId::RateOfFire,
        UpgradeTrackId::SkillPower,
        UpgradeTrackId::Survivability,
    ];
}

/// Boss special ability that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossAbility {
    Charge,
    Teleport,
    Shield,
    PoisonCloud,
    Summon,
}
