//! Per-enemy stat profiles.

use laststand_core::components::EnemyStats;
use laststand_core::constants::*;
use laststand_core::enums::{BossType, EnemyKind};

/// Everything needed to spawn one enemy of a kind.
#[derive(Debug, Clone, Copy)]
pub struct EnemyProfile {
    pub kind: EnemyKind,
    pub health: f64,
    pub radius: f64,
    pub stats: EnemyStats,
    /// Miniboss special-ability period. Zero for zombies.
    pub special_cooldown_secs: f64,
}

pub fn zombie_profile() -> EnemyProfile {
    EnemyProfile {
        kind: EnemyKind::Zombie,
        health: ZOMBIE_HEALTH,
        radius: ZOMBIE_RADIUS,
        stats: EnemyStats {
            speed: ZOMBIE_SPEED,
            damage: ZOMBIE_DAMAGE,
            score: ZOMBIE_SCORE,
            attack_range: ZOMBIE_ATTACK_RANGE,
            attack_cooldown_secs: ZOMBIE_ATTACK_COOLDOWN_SECS,
            attack_speed_factor: ZOMBIE_ATTACK_SPEED_FACTOR,
        },
        special_cooldown_secs: 0.0,
    }
}

/// Miniboss stats by subtype.
pub fn boss_profile(boss_type: BossType) -> EnemyProfile {
    // (health, damage, speed, radius, score, special cooldown)
    let (health, damage, speed, radius, score, special) = match boss_type {
        BossType::Brute => (250.0, 25.0, 80.0, 35.0, 100, 4.0),
        BossType::Speed => (150.0, 15.0, 200.0, 25.0, 150, 3.0),
        BossType::Tank => (400.0, 35.0, 50.0, 45.0, 200, 5.0),
        BossType::Poison => (200.0, 20.0, 100.0, 30.0, 175, 3.5),
        BossType::Summoner => (300.0, 30.0, 120.0, 40.0, 250, 6.0),
    };
    EnemyProfile {
        kind: EnemyKind::MiniBoss(boss_type),
        health,
        radius,
        stats: EnemyStats {
            speed,
            damage,
            score,
            attack_range: BOSS_ATTACK_RANGE,
            attack_cooldown_secs: BOSS_ATTACK_COOLDOWN_SECS,
            attack_speed_factor: BOSS_ATTACK_SPEED_FACTOR,
        },
        special_cooldown_secs: special,
    }
}

pub fn profile_for(kind: EnemyKind) -> EnemyProfile {
    match kind {
        EnemyKind::Zombie => zombie_profile(),
        EnemyKind::MiniBoss(boss_type) => boss_profile(boss_type),
    }
}
