//! Item pickups: expiry and collection on contact with the player.

use hecs::World;
use rand::Rng;

use laststand_core::components::Pickup;
use laststand_core::constants::*;
use laststand_core::entity::Body;
use laststand_core::enums::ItemKind;
use laststand_core::events::GameEvent;

use crate::combat::{self, KillRecord};
use crate::player::{Blast, Player};
use crate::world_setup;

pub fn run<R: Rng>(
    world: &mut World,
    player: &mut Player,
    dt: f64,
    rng: &mut R,
    kills: &mut Vec<KillRecord>,
    events: &mut Vec<GameEvent>,
) {
    let mut collected = Vec::new();
    for (_entity, (pickup, body)) in world.query_mut::<(&mut Pickup, &Body)>() {
        if pickup.collected {
            continue;
        }
        pickup.lifetime_secs -= dt;
        if pickup.lifetime_secs <= 0.0 {
            continue;
        }
        if player.is_alive() && body.overlaps(&player.body) {
            pickup.collected = true;
            collected.push(pickup.kind);
        }
    }

    for kind in collected {
        apply_item(world, player, kind, rng, kills, events);
        events.push(GameEvent::ItemPicked { kind });
    }
}

/// Apply an item's effect to the player.
pub fn apply_item<R: Rng>(
    world: &mut World,
    player: &mut Player,
    kind: ItemKind,
    rng: &mut R,
    kills: &mut Vec<KillRecord>,
    events: &mut Vec<GameEvent>,
) {
    match kind {
        ItemKind::HealthSmall => player.health.heal(HEALTH_SMALL_AMOUNT),
        ItemKind::HealthLarge => player.health.heal(HEALTH_LARGE_AMOUNT),
        ItemKind::Ammo => {
            let mods = player.weapon_modifiers();
            if let Some(weapon) = player.weapon_mut() {
                let rounds = weapon.magazine_capacity(&mods) * AMMO_PICKUP_MAGAZINES;
                weapon.add_reserve(rounds, &mods);
            }
        }
        ItemKind::SpeedBoost => player.buffs.speed_secs = SPEED_BOOST_SECS,
        ItemKind::DamageBoost => player.buffs.damage_secs = DAMAGE_BOOST_SECS,
        ItemKind::Shield => player.buffs.shield_secs = SHIELD_SECS,
        ItemKind::Bomb => {
            let blast = Blast {
                center: player.body.position,
                radius: SKILL_RADIUS,
                damage: SKILL_DAMAGE,
            };
            let hits = combat::blast_enemies(world, &blast, kills, events);
            world_setup::spawn_explosion_effects(world, rng, blast.center, blast.radius);
            events.push(GameEvent::Explosion {
                x: blast.center.x,
                y: blast.center.y,
                radius: blast.radius,
            });
            log::debug!("bomb pickup hit {hits} enemies");
        }
    }
}
