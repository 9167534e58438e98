//! ECS components for hecs entities.
//!
//! Apart from the [`crate::entity`] base, components are plain data.
//! Enemies, projectiles, missiles, pickups, hazards and effects live in the
//! world; the player is held directly by the engine.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Vector2;

/// Handle to something an enemy or missile aims at. Resolved every tick
/// against the engine's player slot; never owns the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetRef {
    Player,
}

/// Fixed combat stats of an enemy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyStats {
    pub speed: f64,
    pub damage: f64,
    pub score: u64,
    pub attack_range: f64,
    pub attack_cooldown_secs: f64,
    /// Speed factor while in range but waiting on the attack cooldown.
    pub attack_speed_factor: f64,
}

/// Identity of an enemy entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    /// Stable id, exposed in snapshots and used for pierce bookkeeping.
    pub id: u32,
    pub kind: EnemyKind,
    pub stats: EnemyStats,
    /// Called in by a summoner; outside the wave quota.
    pub summoned: bool,
}

/// Chase/attack state machine data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyAi {
    pub state: AiState,
    pub target: Option<TargetRef>,
    /// Time until the next melee attack is allowed.
    pub attack_timer_secs: f64,
}

/// Miniboss-only state layered on top of [`EnemyAi`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossState {
    pub boss_type: BossType,
    pub special_cooldown_secs: f64,
    /// Counts down to the next special ability.
    pub special_timer_secs: f64,
    /// Counts down to the next periodic missile.
    pub missile_timer_secs: f64,
    pub charging: bool,
    pub charge_remaining_secs: f64,
    /// Transient melee bonus while charging. Never written into base stats.
    pub damage_bonus: f64,
    pub shield_remaining_secs: f64,
    pub minions_summoned: u32,
}

impl BossState {
    pub fn new(boss_type: BossType, special_cooldown_secs: f64, missile_cooldown_secs: f64) -> Self {
        Self {
            boss_type,
            special_cooldown_secs,
            special_timer_secs: special_cooldown_secs,
            missile_timer_secs: missile_cooldown_secs,
            charging: false,
            charge_remaining_secs: 0.0,
            damage_bonus: 0.0,
            shield_remaining_secs: 0.0,
            minions_summoned: 0,
        }
    }

    pub fn shield_active(&self) -> bool {
        self.shield_remaining_secs > 0.0
    }
}

/// Area damage carried by explosive rounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosive {
    pub radius: f64,
    pub damage: f64,
}

/// A straight-line bullet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub faction: Faction,
    pub damage: f64,
    /// Extra targets this bullet may pass through.
    pub penetration: u32,
    pub pierce_count: u32,
    pub lifetime_secs: f64,
    pub max_distance: f64,
    pub distance_traveled: f64,
    /// Enemies already damaged, so a piercing round hits each once.
    pub hit_ids: Vec<u32>,
    pub explosive: Option<Explosive>,
    pub critical: bool,
    pub alive: bool,
}

impl Projectile {
    /// Whether this round may damage something of `faction`.
    pub fn can_hit(&self, faction: Faction) -> bool {
        self.alive && self.faction != faction
    }

    /// Record a hit. Returns true when the bullet is now spent.
    pub fn on_hit(&mut self, enemy_id: u32) -> bool {
        self.hit_ids.push(enemy_id);
        self.pierce_count += 1;
        if self.pierce_count > self.penetration {
            self.alive = false;
        }
        !self.alive
    }
}

/// A homing boss missile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Missile {
    pub target: TargetRef,
    pub damage: f64,
    pub speed: f64,
    pub explosion_radius: f64,
    pub lifetime_secs: f64,
    pub homing_strength: f64,
    pub alive: bool,
}

/// A collectible dropped on the floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: ItemKind,
    pub lifetime_secs: f64,
    pub collected: bool,
}

/// Lingering damage-over-time area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoisonZone {
    pub position: Vector2,
    pub radius: f64,
    pub damage_per_sec: f64,
    pub remaining_secs: f64,
    /// Counts down to the next damage pulse.
    pub pulse_timer_secs: f64,
}

/// Visual effect variants. Positions are fixed at creation except sparks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EffectKind {
    Flash { radius: f64 },
    /// Expanding ring from zero to `max_radius`.
    Shockwave { max_radius: f64 },
    Ring { max_radius: f64 },
    Lightning { angle: f64, length: f64 },
    Distortion { radius: f64 },
    Spark { velocity: Vector2, size: f64 },
}

/// A timed visual effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub position: Vector2,
    pub duration_secs: f64,
    pub remaining_secs: f64,
}

impl Effect {
    pub fn new(kind: EffectKind, position: Vector2, duration_secs: f64) -> Self {
        Self {
            kind,
            position,
            duration_secs,
            remaining_secs: duration_secs,
        }
    }

    /// 0 at creation, 1 at expiry.
    pub fn progress(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 1.0;
        }
        (1.0 - self.remaining_secs / self.duration_secs).clamp(0.0, 1.0)
    }

    /// Radius to draw at the current progress.
    pub fn current_radius(&self) -> f64 {
        let t = self.progress();
        match &self.kind {
            EffectKind::Flash { radius } | EffectKind::Distortion { radius } => *radius,
            EffectKind::Shockwave { max_radius } | EffectKind::Ring { max_radius } => max_radius * t,
            EffectKind::Lightning { length, .. } => *length,
            EffectKind::Spark { size, .. } => size * (1.0 - t),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_secs <= 0.0
    }
}
