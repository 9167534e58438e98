//! Collision resolution: player bullets against enemies, then crowd
//! separation between overlapping enemies.

use hecs::{Entity, World};
use rand::Rng;

use laststand_core::components::{Enemy, Explosive, Projectile};
use laststand_core::constants::{ROCKET_SHAKE_INTENSITY, ROCKET_SHAKE_SECS};
use laststand_core::entity::{self, Body, Health};
use laststand_core::enums::Faction;
use laststand_core::events::GameEvent;
use laststand_core::types::Vector2;

use crate::combat::{self, KillRecord};
use crate::player::Blast;
use crate::world_setup;

pub fn run<R: Rng>(
    world: &mut World,
    rng: &mut R,
    kills: &mut Vec<KillRecord>,
    events: &mut Vec<GameEvent>,
) {
    resolve_bullet_hits(world, rng, kills, events);
    separate_enemies(world);
}

/// Each bullet is tested against every enemy in spawn order. A kill is
/// visible to later bullets in the same tick because health is updated
/// in place.
pub fn resolve_bullet_hits<R: Rng>(
    world: &mut World,
    rng: &mut R,
    kills: &mut Vec<KillRecord>,
    events: &mut Vec<GameEvent>,
) {
    let bullets: Vec<Entity> = world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, p)| p.can_hit(Faction::Enemy))
        .map(|(e, _)| e)
        .collect();
    let enemies: Vec<(Entity, u32)> = world
        .query::<&Enemy>()
        .iter()
        .map(|(e, enemy)| (e, enemy.id))
        .collect();

    for bullet in bullets {
        for &(enemy, enemy_id) in &enemies {
            let Some((damage, critical, explosive, position)) =
                bullet_contact(world, bullet, enemy, enemy_id)
            else {
                continue;
            };

            combat::strike_enemy(world, enemy, damage, critical, kills, events);
            let spent = world
                .get::<&mut Projectile>(bullet)
                .map(|mut p| p.on_hit(enemy_id))
                .unwrap_or(true);

            if let Some(explosive) = explosive {
                let blast = Blast {
                    center: position,
                    radius: explosive.radius,
                    damage: explosive.damage,
                };
                combat::blast_enemies(world, &blast, kills, events);
                world_setup::spawn_explosion_effects(world, rng, position, explosive.radius);
                events.push(GameEvent::Explosion {
                    x: position.x,
                    y: position.y,
                    radius: explosive.radius,
                });
                events.push(GameEvent::ScreenShake {
                    duration_secs: ROCKET_SHAKE_SECS,
                    intensity: ROCKET_SHAKE_INTENSITY,
                });
                if let Ok(mut p) = world.get::<&mut Projectile>(bullet) {
                    p.alive = false;
                }
                break;
            }
            if spent {
                break;
            }
        }
    }
}

/// Returns the hit parameters when `bullet` currently overlaps a live,
/// not-yet-hit `enemy`.
fn bullet_contact(
    world: &World,
    bullet: Entity,
    enemy: Entity,
    enemy_id: u32,
) -> Option<(f64, bool, Option<Explosive>, Vector2)> {
    let projectile = world.get::<&Projectile>(bullet).ok()?;
    if !projectile.alive || projectile.hit_ids.contains(&enemy_id) {
        return None;
    }
    let bullet_body = world.get::<&Body>(bullet).ok()?;
    let enemy_body = world.get::<&Body>(enemy).ok()?;
    let health = world.get::<&Health>(enemy).ok()?;
    if !entity::is_colliding(&bullet_body, projectile.alive, &enemy_body, health.is_alive()) {
        return None;
    }
    Some((
        projectile.damage,
        projectile.critical,
        projectile.explosive,
        bullet_body.position,
    ))
}

/// Push overlapping live enemies apart by half their overlap each.
pub fn separate_enemies(world: &mut World) {
    let mut bodies: Vec<(Entity, Body)> = world
        .query::<(&Enemy, &Body, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| health.is_alive())
        .map(|(e, (_, body, _))| (e, body.clone()))
        .collect();

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (left, right) = bodies.split_at_mut(j);
            let a = &mut left[i].1;
            let b = &mut right[0].1;
            if entity::is_colliding(a, true, b, true) {
                entity::separate(a, b);
            }
        }
    }

    for (e, separated) in bodies {
        if let Ok(mut body) = world.get::<&mut Body>(e) {
            body.position = separated.position;
        }
    }
}
