//! Homing missiles: steering, proximity fuse and area detonation.

use hecs::World;
use rand::Rng;

use laststand_core::components::{Missile, TargetRef};
use laststand_core::constants::{MISSILE_PROXIMITY, MISSILE_SHAKE_INTENSITY, MISSILE_SHAKE_SECS};
use laststand_core::entity::Body;
use laststand_core::events::GameEvent;
use laststand_core::types::{Vector2, VectorExt};

use crate::combat;
use crate::player::Player;
use crate::world_setup;

pub fn run<R: Rng>(
    world: &mut World,
    player: &mut Player,
    dt: f64,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    let target = player.body.position;
    let mut detonations: Vec<(Vector2, f64, f64)> = Vec::new();

    for (_entity, (missile, body)) in world.query_mut::<(&mut Missile, &mut Body)>() {
        if !missile.alive {
            continue;
        }
        missile.lifetime_secs -= dt;
        if missile.lifetime_secs <= 0.0 {
            missile.alive = false;
            detonations.push((body.position, missile.explosion_radius, missile.damage));
            continue;
        }

        let target = match missile.target {
            TargetRef::Player => target,
        };
        if missile.homing_strength > 0.0 {
            body.velocity += body.position.direction_to(target) * missile.homing_strength * dt;
            body.velocity = body.velocity.normalize_or_zero() * missile.speed;
        }
        body.position += body.velocity * dt;

        if body.position.distance(target) < MISSILE_PROXIMITY {
            missile.alive = false;
            detonations.push((body.position, missile.explosion_radius, missile.damage));
        }
    }

    for (position, radius, damage) in detonations {
        world_setup::spawn_explosion_effects(world, rng, position, radius);
        events.push(GameEvent::Explosion {
            x: position.x,
            y: position.y,
            radius,
        });
        events.push(GameEvent::ScreenShake {
            duration_secs: MISSILE_SHAKE_SECS,
            intensity: MISSILE_SHAKE_INTENSITY,
        });
        if player.is_alive() && position.distance(player.body.position) <= radius {
            combat::hurt_player(player, damage, rng, events);
        }
    }
}
