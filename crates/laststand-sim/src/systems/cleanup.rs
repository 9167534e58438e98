//! Cleanup system: end-of-tick sweep of dead and expired entities.

use hecs::{Entity, World};

use laststand_core::components::{Effect, Enemy, Missile, Pickup, PoisonZone, Projectile};
use laststand_core::entity::Health;

/// Despawn everything that died or expired this tick. Uses a pre-allocated
/// buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (_enemy, health)) in world.query_mut::<(&Enemy, &Health)>() {
        if !health.is_alive() {
            despawn_buffer.push(entity);
        }
    }

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if !projectile.alive {
            despawn_buffer.push(entity);
        }
    }

    for (entity, missile) in world.query_mut::<&Missile>() {
        if !missile.alive {
            despawn_buffer.push(entity);
        }
    }

    for (entity, pickup) in world.query_mut::<&Pickup>() {
        if pickup.collected || pickup.lifetime_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for (entity, zone) in world.query_mut::<&PoisonZone>() {
        if zone.remaining_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for (entity, effect) in world.query_mut::<&Effect>() {
        if effect.is_finished() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
