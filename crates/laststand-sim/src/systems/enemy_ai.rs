//! Enemy system: FSM evaluation, movement, melee attacks and boss abilities.

use hecs::{Entity, World};
use rand::Rng;

use laststand_ai::abilities::{self, AbilityPlan};
use laststand_ai::fsm::{self, EnemyContext};
use laststand_ai::profiles::zombie_profile;
use laststand_core::components::{BossState, Enemy, EnemyAi, TargetRef};
use laststand_core::constants::*;
use laststand_core::entity::{Body, Health};
use laststand_core::enums::BossType;
use laststand_core::events::GameEvent;
use laststand_core::types::{Bounds, Vector2};

use crate::combat;
use crate::player::Player;
use crate::world_setup;

/// A melee hit decided this tick.
struct Attack {
    from: Vector2,
    damage: f64,
}

/// A boss action decided this tick, applied once the query borrow ends.
struct BossAction {
    entity: Entity,
    boss_type: BossType,
    position: Vector2,
    plan: Option<AbilityPlan>,
    missile: bool,
}

pub fn run<R: Rng>(
    world: &mut World,
    player: &mut Player,
    dt: f64,
    bounds: &Bounds,
    rng: &mut R,
    next_enemy_id: &mut u32,
    events: &mut Vec<GameEvent>,
) {
    let target_position = player.is_alive().then_some(player.body.position);
    let fire_rate = player.stats.fire_rate_mult;

    let mut attacks = Vec::new();
    let mut actions = Vec::new();

    for (entity, (enemy, ai, body, health, boss)) in world.query_mut::<(
        &Enemy,
        &mut EnemyAi,
        &mut Body,
        &mut Health,
        Option<&mut BossState>,
    )>() {
        if !health.is_alive() {
            continue;
        }
        health.tick(dt);
        ai.attack_timer_secs = (ai.attack_timer_secs - dt).max(0.0);

        let target = match ai.target {
            Some(TargetRef::Player) => target_position,
            None => None,
        };

        let mut damage_bonus = 0.0;
        let mut movement_locked = false;
        if let Some(boss) = boss {
            if abilities::tick_timed_states(boss, dt) {
                body.velocity *= CHARGE_END_SLOWDOWN;
            }
            if let Some(target) = target {
                let special_due = abilities::tick_special_timer(boss, dt);
                let missile_due = abilities::tick_missile_timer(boss, dt, fire_rate);
                let plan = if special_due {
                    abilities::plan_ability(boss, body.position, target, rng)
                } else {
                    None
                };
                let bonus_missile = special_due && abilities::rolls_bonus_missile(rng);
                if let Some(plan) = &plan {
                    abilities::apply_to_boss(boss, plan);
                    if let AbilityPlan::Charge { velocity } = plan {
                        body.velocity = *velocity;
                    }
                }
                if plan.is_some() || missile_due || bonus_missile {
                    actions.push(BossAction {
                        entity,
                        boss_type: boss.boss_type,
                        position: body.position,
                        plan,
                        missile: missile_due || bonus_missile,
                    });
                }
            }
            damage_bonus = boss.damage_bonus;
            movement_locked = boss.charging;
        }

        let update = fsm::evaluate(&EnemyContext {
            state: ai.state,
            position: body.position,
            target,
            stats: enemy.stats,
            attack_timer_secs: ai.attack_timer_secs,
            movement_locked,
        });
        ai.state = update.new_state;
        if let Some(velocity) = update.desired_velocity {
            body.velocity = velocity;
        }
        if update.attack {
            ai.attack_timer_secs = enemy.stats.attack_cooldown_secs;
            attacks.push(Attack {
                from: body.position,
                damage: enemy.stats.damage + damage_bonus,
            });
        }

        body.integrate(dt);
        body.keep_in_bounds(bounds);
    }

    for attack in attacks {
        let outcome = combat::hurt_player(player, attack.damage, rng, events);
        if outcome.applied() {
            player.knockback += fsm::knockback(attack.from, player.body.position, KNOCKBACK_FORCE);
        }
    }

    for action in actions {
        apply_boss_action(world, player, action, bounds, next_enemy_id, events);
    }
}

fn apply_boss_action(
    world: &mut World,
    player: &Player,
    action: BossAction,
    bounds: &Bounds,
    next_enemy_id: &mut u32,
    events: &mut Vec<GameEvent>,
) {
    if let Some(plan) = &action.plan {
        events.push(GameEvent::BossAbility {
            boss_type: action.boss_type,
            ability: plan.ability(),
        });
        match plan {
            AbilityPlan::Charge { .. } | AbilityPlan::Shield => {}
            AbilityPlan::Teleport { destination } => {
                if let Ok(mut body) = world.get::<&mut Body>(action.entity) {
                    body.position = *destination;
                    body.keep_in_bounds(bounds);
                }
            }
            AbilityPlan::PoisonCloud { position } => {
                world_setup::spawn_poison_zone(world, *position);
            }
            AbilityPlan::Summon { positions } => {
                let profile = zombie_profile();
                for position in positions {
                    let id = *next_enemy_id;
                    *next_enemy_id += 1;
                    world_setup::spawn_enemy(world, &profile, *position, id, true);
                }
            }
        }
    }

    if action.missile {
        let position = world
            .get::<&Body>(action.entity)
            .map(|b| b.position)
            .unwrap_or(action.position);
        let direction = abilities::missile_aim(position, player.body.position, player.body.velocity);
        world_setup::spawn_missile(world, position, direction);
        events.push(GameEvent::MissileLaunched);
    }
}
