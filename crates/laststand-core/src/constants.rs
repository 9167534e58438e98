//! Simulation constants and tuning parameters.
//!
//! Durations are in seconds, distances in world units, speeds in units per
//! second. Orchestrator tunables that a run may override live in
//! [`crate::config::Tuning`]; the values here are the fixed rules.

/// Default simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the default tick rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World ---

/// Side length of the square arena.
pub const WORLD_SIZE: f64 = 4000.0;

/// Largest step a single tick may integrate.
pub const MAX_STEP_SECS: f64 = 0.05;

/// Velocity retained per integration step ("air drag").
pub const ENTITY_FRICTION: f64 = 0.98;

/// Window after a hit during which further damage is ignored.
pub const HIT_FLASH_SECS: f64 = 0.1;

// --- Player ---

pub const PLAYER_MAX_HEALTH: f64 = 100.0;
pub const PLAYER_SPEED: f64 = 300.0;
pub const PLAYER_RADIUS: f64 = 20.0;

pub const DASH_SPEED: f64 = 800.0;
pub const DASH_DURATION_SECS: f64 = 0.2;
pub const DASH_COOLDOWN_SECS: f64 = 2.0;

/// Post-hit invulnerability before upgrade scaling.
pub const PLAYER_INVULNERABILITY_SECS: f64 = 0.1;

pub const SKILL_COOLDOWN_SECS: f64 = 5.0;
pub const SKILL_RADIUS: f64 = 150.0;
pub const SKILL_DAMAGE: f64 = 100.0;

pub const COMBO_TIMEOUT_SECS: f64 = 2.0;

/// Score multiplier indexed by combo count; the last entry caps it.
pub const COMBO_MULTIPLIERS: [f64; 7] = [1.0, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0];

pub const SPEED_BOOST_MULT: f64 = 1.5;
pub const SPEED_BOOST_SECS: f64 = 5.0;
pub const DAMAGE_BOOST_MULT: f64 = 2.0;
pub const DAMAGE_BOOST_SECS: f64 = 5.0;
pub const SHIELD_SECS: f64 = 3.0;

/// Knockback impulse applied to the player by seeking enemies.
pub const KNOCKBACK_FORCE: f64 = 200.0;

/// Knockback velocity retained per step.
pub const KNOCKBACK_FRICTION: f64 = 0.9;

/// Multiplier applied to a critical bullet.
pub const CRIT_DAMAGE_MULT: f64 = 2.0;

/// Health fraction restored by a revive.
pub const REVIVE_HEALTH_FRACTION: f64 = 0.5;

// --- Projectiles ---

pub const BULLET_RADIUS: f64 = 3.0;
pub const BULLET_LIFETIME_SECS: f64 = 2.0;
pub const BULLET_MAX_DISTANCE: f64 = 1500.0;

/// Reserve ammo a finite weapon starts with, in magazines.
pub const RESERVE_MAGAZINES: u32 = 10;

pub const MISSILE_SPEED: f64 = 300.0;
pub const MISSILE_DAMAGE: f64 = 40.0;
pub const MISSILE_EXPLOSION_RADIUS: f64 = 80.0;
pub const MISSILE_LIFETIME_SECS: f64 = 4.0;
pub const MISSILE_RADIUS: f64 = 8.0;

/// Steering per second toward the predicted target position.
pub const MISSILE_HOMING_STRENGTH: f64 = 30.0;

/// Detonation distance from the target.
pub const MISSILE_PROXIMITY: f64 = 30.0;

/// Seconds of target motion the launch aim leads by.
pub const MISSILE_LEAD_SECS: f64 = 0.5;

// --- Zombie ---

pub const ZOMBIE_HEALTH: f64 = 25.0;
pub const ZOMBIE_SPEED: f64 = 120.0;
pub const ZOMBIE_DAMAGE: f64 = 10.0;
pub const ZOMBIE_SCORE: u64 = 10;
pub const ZOMBIE_RADIUS: f64 = 20.0;
pub const ZOMBIE_ATTACK_RANGE: f64 = 30.0;
pub const ZOMBIE_ATTACK_COOLDOWN_SECS: f64 = 1.0;
pub const ZOMBIE_ATTACK_SPEED_FACTOR: f64 = 0.8;

// --- Miniboss ---

pub const BOSS_ATTACK_RANGE: f64 = 35.0;
pub const BOSS_ATTACK_COOLDOWN_SECS: f64 = 1.0;
pub const BOSS_ATTACK_SPEED_FACTOR: f64 = 0.7;

/// Chance a special ability is followed by a missile launch.
pub const BOSS_MISSILE_CHANCE: f64 = 0.5;

/// Base period of the boss missile volley (divided by the player's fire rate).
pub const BOSS_MISSILE_COOLDOWN_SECS: f64 = 1.5;

pub const CHARGE_SPEED: f64 = 400.0;
pub const CHARGE_DURATION_SECS: f64 = 2.0;
pub const CHARGE_DAMAGE_BONUS: f64 = 25.0;

/// Fraction of velocity kept when a charge ends.
pub const CHARGE_END_SLOWDOWN: f64 = 0.1;

pub const TELEPORT_MIN_DISTANCE: f64 = 100.0;
pub const TELEPORT_MAX_DISTANCE: f64 = 200.0;

pub const TANK_SHIELD_SECS: f64 = 3.0;

/// Incoming damage factor while a tank's shield is up.
pub const TANK_SHIELD_FACTOR: f64 = 0.5;

pub const POISON_RADIUS: f64 = 80.0;
pub const POISON_DAMAGE_PER_SEC: f64 = 5.0;
pub const POISON_DURATION_SECS: f64 = 5.0;

pub const SUMMON_COUNT: u32 = 2;
pub const SUMMON_DISTANCE: f64 = 80.0;
pub const SUMMON_MAX_MINIONS: u32 = 3;

// --- Waves ---

/// Zombie quotas for the first five waves.
pub const EARLY_WAVE_QUOTAS: [u32; 5] = [14, 19, 24, 29, 34];

/// Quota growth per wave past the fifth.
pub const WAVE_QUOTA_STEP: u32 = 5;

/// Largest zombie batch a single spawn tick may produce.
pub const MAX_SPAWN_BATCH: u32 = 8;

// --- Items ---

pub const ITEM_RADIUS: f64 = 15.0;
pub const HEALTH_SMALL_AMOUNT: f64 = 20.0;
pub const HEALTH_LARGE_AMOUNT: f64 = 50.0;

/// Magazines of reserve ammo granted by an ammo pickup.
pub const AMMO_PICKUP_MAGAZINES: u32 = 2;

// --- Effects ---

pub const EXPLOSION_FLASH_SCALE: f64 = 1.5;
pub const EXPLOSION_FLASH_SECS: f64 = 0.15;
pub const EXPLOSION_SPARK_COUNT: u32 = 50;
pub const SHOCKWAVE_COUNT: u32 = 3;
pub const SKILL_LIGHTNING_COUNT: u32 = 8;
pub const SKILL_RING_COUNT: u32 = 5;
pub const SKILL_DISTORTION_SECS: f64 = 0.15;

pub const SKILL_SHAKE_SECS: f64 = 0.4;
pub const SKILL_SHAKE_INTENSITY: f64 = 12.0;
pub const MISSILE_SHAKE_SECS: f64 = 0.2;
pub const MISSILE_SHAKE_INTENSITY: f64 = 5.0;
pub const ROCKET_SHAKE_SECS: f64 = 0.3;
pub const ROCKET_SHAKE_INTENSITY: f64 = 8.0;

// --- Upgrades ---

/// Levels per upgrade track.
pub const MAX_UPGRADE_LEVEL: u8 = 3;
