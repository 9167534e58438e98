//! Wave/spawn orchestration.
//!
//! A wave spawns its zombie quota in batches around the player. Once the
//! quota is out and the field is clear, a grace timer runs before the
//! miniboss appears. The wave completes when the miniboss has spawned and
//! no live enemies remain.

use hecs::World;
use rand::Rng;
use serde::{Deserialize, Serialize};

use laststand_ai::profiles::{profile_for, zombie_profile};
use laststand_core::components::Enemy;
use laststand_core::config::Tuning;
use laststand_core::constants::{EARLY_WAVE_QUOTAS, MAX_SPAWN_BATCH, WAVE_QUOTA_STEP};
use laststand_core::entity::Health;
use laststand_core::enums::{BossType, EnemyKind};
use laststand_core::events::GameEvent;
use laststand_core::types::{Bounds, Vector2, VectorExt};

use crate::world_setup;

/// Zombie quota for a wave (the miniboss comes on top).
pub fn quota(wave: u32) -> u32 {
    match wave {
        0 => 0,
        1..=5 => EARLY_WAVE_QUOTAS[(wave - 1) as usize],
        _ => EARLY_WAVE_QUOTAS[4] + (wave - 5) * WAVE_QUOTA_STEP,
    }
}

/// Zombies per spawn tick: `min(ceil(wave / 2) + 2, 8)`.
pub fn batch_size(wave: u32) -> u32 {
    (wave.div_ceil(2) + 2).min(MAX_SPAWN_BATCH)
}

/// Per-wave orchestration state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveState {
    pub number: u32,
    pub spawned: u32,
    pub killed: u32,
    pub boss_spawned: bool,
    pub spawn_delay_secs: f64,
    /// Counts down to the next batch; starts elapsed.
    pub spawn_timer_secs: f64,
    /// Time spent with the quota out and the field clear.
    pub boss_grace_elapsed_secs: f64,
    pub completed: bool,
}

impl WaveState {
    pub fn start(number: u32, tuning: &Tuning) -> Self {
        Self {
            number,
            spawn_delay_secs: tuning.spawn_delay_for_wave(number),
            ..Default::default()
        }
    }

    pub fn quota(&self) -> u32 {
        quota(self.number)
    }

    /// Quota plus the miniboss.
    pub fn total(&self) -> u32 {
        self.quota() + 1
    }
}

/// Count enemies still alive (dead ones linger until cleanup).
pub fn live_enemies(world: &World) -> usize {
    world
        .query::<(&Enemy, &Health)>()
        .iter()
        .filter(|(_, (_, health))| health.is_alive())
        .count()
}

/// Advance the wave. Returns true on the tick the wave completes.
pub fn run<R: Rng>(
    world: &mut World,
    wave: &mut WaveState,
    player_position: Vector2,
    tuning: &Tuning,
    bounds: &Bounds,
    dt: f64,
    rng: &mut R,
    next_enemy_id: &mut u32,
    events: &mut Vec<GameEvent>,
) -> bool {
    if wave.completed {
        return false;
    }
    let quota = wave.quota();

    if wave.spawned < quota {
        wave.spawn_timer_secs -= dt;
        if wave.spawn_timer_secs <= 0.0 {
            let count = batch_size(wave.number).min(quota - wave.spawned);
            let profile = zombie_profile();
            for _ in 0..count {
                let distance = tuning.spawn_distance + rng.gen_range(0.0..=tuning.spawn_jitter);
                let position = spawn_point(player_position, distance, profile.radius, bounds, rng);
                world_setup::spawn_enemy(world, &profile, position, *next_enemy_id, false);
                *next_enemy_id += 1;
            }
            wave.spawned += count;
            wave.spawn_timer_secs = wave.spawn_delay_secs;
            log::debug!("wave {}: spawned {}/{}", wave.number, wave.spawned, quota);
        }
        return false;
    }

    let live = live_enemies(world);

    if !wave.boss_spawned {
        if live == 0 {
            wave.boss_grace_elapsed_secs += dt;
            if wave.boss_grace_elapsed_secs >= tuning.boss_grace_secs {
                let boss_type = BossType::for_wave(wave.number);
                let profile = profile_for(EnemyKind::MiniBoss(boss_type));
                let distance = tuning.spawn_distance + tuning.boss_extra_distance;
                let position = spawn_point(player_position, distance, profile.radius, bounds, rng);
                world_setup::spawn_enemy(world, &profile, position, *next_enemy_id, false);
                *next_enemy_id += 1;
                wave.boss_spawned = true;
                events.push(GameEvent::BossSpawned {
                    boss_type,
                    wave: wave.number,
                });
                log::info!("wave {}: {:?} miniboss spawned", wave.number, boss_type);
            }
        }
        return false;
    }

    if live == 0 {
        wave.completed = true;
        events.push(GameEvent::WaveCompleted { wave: wave.number });
        log::info!("wave {} complete ({} killed)", wave.number, wave.killed);
        return true;
    }
    false
}

/// Random point `distance` from `center`, pulled inside the arena.
fn spawn_point<R: Rng>(center: Vector2, distance: f64, radius: f64, bounds: &Bounds, rng: &mut R) -> Vector2 {
    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    let point = center + Vector2::from_angle_rad(angle) * distance;
    let inset = Vector2::splat(radius);
    point.clamp(bounds.min + inset, bounds.max - inset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_formula() {
        let early: Vec<u32> = (1..=5).map(quota).collect();
        assert_eq!(early, vec![14, 19, 24, 29, 34]);
        assert_eq!(quota(6), 39);
        assert_eq!(quota(10), 59);
    }

    #[test]
    fn test_batch_size_caps_at_eight() {
        assert_eq!(batch_size(1), 3);
        assert_eq!(batch_size(2), 3);
        assert_eq!(batch_size(3), 4);
        assert_eq!(batch_size(12), 8);
        assert_eq!(batch_size(50), 8);
    }

    #[test]
    fn test_total_includes_miniboss() {
        let wave = WaveState::start(1, &Tuning::default());
        assert_eq!(wave.total(), 15);
    }
}
