//! Miniboss special abilities.
//!
//! Planning is pure: given the boss state, its position and the target,
//! produce what should happen. The simulation applies the plan to the world.

use glam::DVec2;
use rand::Rng;

use laststand_core::components::BossState;
use laststand_core::constants::*;
use laststand_core::enums::{BossAbility, BossType};
use laststand_core::types::VectorExt;

/// A decided special ability, ready to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum AbilityPlan {
    /// Lock velocity toward the target for the charge duration.
    Charge { velocity: DVec2 },
    Teleport { destination: DVec2 },
    Shield,
    PoisonCloud { position: DVec2 },
    Summon { positions: Vec<DVec2> },
}

impl AbilityPlan {
    pub fn ability(&self) -> BossAbility {
        match self {
            AbilityPlan::Charge { .. } => BossAbility::Charge,
            AbilityPlan::Teleport { .. } => BossAbility::Teleport,
            AbilityPlan::Shield => BossAbility::Shield,
            AbilityPlan::PoisonCloud { .. } => BossAbility::PoisonCloud,
            AbilityPlan::Summon { .. } => BossAbility::Summon,
        }
    }
}

/// Count down the special timer. Returns true when an ability is due, in
/// which case the timer is rearmed.
pub fn tick_special_timer(boss: &mut BossState, dt: f64) -> bool {
    boss.special_timer_secs -= dt;
    if boss.special_timer_secs > 0.0 {
        return false;
    }
    boss.special_timer_secs = boss.special_cooldown_secs;
    true
}

/// Decide the subtype ability. `None` when it has nothing to do
/// (a summoner at its minion cap).
pub fn plan_ability<R: Rng>(
    boss: &BossState,
    position: DVec2,
    target: DVec2,
    rng: &mut R,
) -> Option<AbilityPlan> {
    match boss.boss_type {
        BossType::Brute => Some(AbilityPlan::Charge {
            velocity: position.direction_to(target) * CHARGE_SPEED,
        }),
        BossType::Speed => {
            let angle = rng.gen_range(0.0..std::f64::consts::TAU);
            let distance = rng.gen_range(TELEPORT_MIN_DISTANCE..TELEPORT_MAX_DISTANCE);
            Some(AbilityPlan::Teleport {
                destination: target + DVec2::from_angle_rad(angle) * distance,
            })
        }
        BossType::Tank => Some(AbilityPlan::Shield),
        BossType::Poison => Some(AbilityPlan::PoisonCloud { position }),
        BossType::Summoner => {
            let count = SUMMON_COUNT.min(SUMMON_MAX_MINIONS.saturating_sub(boss.minions_summoned));
            if count == 0 {
                return None;
            }
            let step = std::f64::consts::TAU / count as f64;
            let positions = (0..count)
                .map(|i| position + DVec2::from_angle_rad(step * i as f64) * SUMMON_DISTANCE)
                .collect();
            Some(AbilityPlan::Summon { positions })
        }
    }
}

/// Record the plan's effect on the boss's own state.
pub fn apply_to_boss(boss: &mut BossState, plan: &AbilityPlan) {
    match plan {
        AbilityPlan::Charge { .. } => {
            boss.charging = true;
            boss.charge_remaining_secs = CHARGE_DURATION_SECS;
            boss.damage_bonus = CHARGE_DAMAGE_BONUS;
        }
        AbilityPlan::Shield => {
            boss.shield_remaining_secs = TANK_SHIELD_SECS;
        }
        AbilityPlan::Summon { positions } => {
            boss.minions_summoned += positions.len() as u32;
        }
        AbilityPlan::Teleport { .. } | AbilityPlan::PoisonCloud { .. } => {}
    }
}

/// Advance the boss's timed states. Returns true on the tick a charge ends,
/// so the caller can bleed off the charge velocity.
pub fn tick_timed_states(boss: &mut BossState, dt: f64) -> bool {
    boss.shield_remaining_secs = (boss.shield_remaining_secs - dt).max(0.0);
    if !boss.charging {
        return false;
    }
    boss.charge_remaining_secs -= dt;
    if boss.charge_remaining_secs > 0.0 {
        return false;
    }
    boss.charging = false;
    boss.charge_remaining_secs = 0.0;
    boss.damage_bonus = 0.0;
    true
}

/// Incoming damage after the tank shield.
pub fn shielded_damage(boss: &BossState, amount: f64) -> f64 {
    if boss.boss_type == BossType::Tank && boss.shield_active() {
        amount * TANK_SHIELD_FACTOR
    } else {
        amount
    }
}

/// Roll whether a special ability also launches a missile.
pub fn rolls_bonus_missile<R: Rng>(rng: &mut R) -> bool {
    rng.gen_bool(BOSS_MISSILE_CHANCE)
}

/// Count down the periodic missile timer. The period shrinks as the player's
/// fire-rate multiplier grows. Returns true when a missile is due.
pub fn tick_missile_timer(boss: &mut BossState, dt: f64, fire_rate_multiplier: f64) -> bool {
    boss.missile_timer_secs -= dt;
    if boss.missile_timer_secs > 0.0 {
        return false;
    }
    boss.missile_timer_secs = BOSS_MISSILE_COOLDOWN_SECS / fire_rate_multiplier.max(0.01);
    true
}

/// Launch direction toward where the target will be `MISSILE_LEAD_SECS` from now.
pub fn missile_aim(position: DVec2, target: DVec2, target_velocity: DVec2) -> DVec2 {
    let predicted = target + target_velocity * MISSILE_LEAD_SECS;
    let dir = position.direction_to(predicted);
    if dir == DVec2::ZERO {
        DVec2::X
    } else {
        dir
    }
}
