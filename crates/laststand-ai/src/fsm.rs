//! Enemy chase/attack finite state machine.
//!
//! `Idle -> Chasing <-> Attacking`. Death is handled outside the FSM via the
//! health component.

use glam::DVec2;

use laststand_core::components::EnemyStats;
use laststand_core::enums::AiState;
use laststand_core::types::VectorExt;

/// Input to the FSM for a single enemy.
pub struct EnemyContext {
    pub state: AiState,
    pub position: DVec2,
    /// Resolved target position; `None` when no target is acquired.
    pub target: Option<DVec2>,
    pub stats: EnemyStats,
    pub attack_timer_secs: f64,
    /// Set while an ability (a brute charge) owns the enemy's velocity.
    pub movement_locked: bool,
}

/// Output from the FSM.
pub struct EnemyUpdate {
    pub new_state: AiState,
    /// Velocity to adopt this tick, or `None` to leave it untouched.
    pub desired_velocity: Option<DVec2>,
    /// Whether a melee attack should land this tick.
    pub attack: bool,
    pub state_changed: bool,
}

/// Evaluate the FSM for one enemy.
pub fn evaluate(ctx: &EnemyContext) -> EnemyUpdate {
    let Some(target) = ctx.target else {
        return EnemyUpdate {
            new_state: AiState::Idle,
            desired_velocity: None,
            attack: false,
            state_changed: ctx.state != AiState::Idle,
        };
    };

    let distance = ctx.position.distance(target);
    let direction = ctx.position.direction_to(target);

    let (new_state, speed, attack) = if distance <= ctx.stats.attack_range {
        let ready = ctx.attack_timer_secs <= 0.0;
        (
            AiState::Attacking,
            ctx.stats.speed * ctx.stats.attack_speed_factor,
            ready,
        )
    } else {
        (AiState::Chasing, ctx.stats.speed, false)
    };

    let desired_velocity = if ctx.movement_locked {
        None
    } else {
        Some(direction * speed)
    };

    EnemyUpdate {
        new_state,
        desired_velocity,
        attack,
        state_changed: new_state != ctx.state,
    }
}

/// Knockback impulse pushing `target` away from `attacker`.
pub fn knockback(attacker: DVec2, target: DVec2, force: f64) -> DVec2 {
    let away = attacker.direction_to(target);
    if away == DVec2::ZERO {
        return DVec2::X * force;
    }
    away * force
}
