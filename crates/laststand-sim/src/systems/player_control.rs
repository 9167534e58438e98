//! Player system: timers, movement, dash, skill and automatic fire.

use hecs::World;
use rand::Rng;

use laststand_core::constants::*;
use laststand_core::enums::Faction;
use laststand_core::events::GameEvent;
use laststand_core::types::Bounds;

use crate::combat::{self, KillRecord};
use crate::player::Player;
use crate::world_setup::{self, BulletSpec};

/// Edge-triggered player actions queued by commands for this tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerRequests {
    pub dash: bool,
    pub skill: bool,
}

pub fn run<R: Rng>(
    world: &mut World,
    player: &mut Player,
    requests: PlayerRequests,
    dt: f64,
    bounds: &Bounds,
    rng: &mut R,
    kills: &mut Vec<KillRecord>,
    events: &mut Vec<GameEvent>,
) {
    if !player.is_alive() {
        return;
    }

    if requests.dash {
        player.try_dash();
    }

    if requests.skill {
        if let Some(blast) = player.try_use_skill() {
            let hits = combat::blast_enemies(world, &blast, kills, events);
            world_setup::spawn_skill_effects(world, rng, blast.center, blast.radius);
            events.push(GameEvent::SkillUsed {
                x: blast.center.x,
                y: blast.center.y,
                radius: blast.radius,
                hits,
            });
            events.push(GameEvent::ScreenShake {
                duration_secs: SKILL_SHAKE_SECS,
                intensity: SKILL_SHAKE_INTENSITY,
            });
        }
    }

    let was_reloading = player.weapon().is_some_and(|w| w.is_reloading());
    player.update(dt);
    player.body.keep_in_bounds(bounds);

    if player.shooting {
        fire(world, player, rng, events);
    }

    if let Some(weapon) = player.weapon() {
        if weapon.is_reloading() && !was_reloading {
            events.push(GameEvent::ReloadStarted {
                weapon: weapon.kind(),
            });
        }
    }
}

/// Fire the current weapon if it is ready, spawning one bullet per pellet.
fn fire<R: Rng>(world: &mut World, player: &mut Player, rng: &mut R, events: &mut Vec<GameEvent>) {
    let mods = player.weapon_modifiers();
    let damage_mult = player.damage_multiplier();
    let aim = player.aim;
    let crit_chance = player.stats.crit_chance.clamp(0.0, 1.0);
    let penetration_bonus = player.stats.penetration_bonus;
    let origin = player.body.position + aim * player.body.radius;

    let Some(weapon) = player.weapon_mut() else {
        return;
    };
    let Some(shots) = weapon.fire(aim, damage_mult, &mods, rng) else {
        return;
    };
    let stats = weapon.stats;

    for mut shot in shots.iter().copied() {
        let critical = crit_chance > 0.0 && rng.gen_bool(crit_chance);
        if critical {
            shot.damage *= CRIT_DAMAGE_MULT;
        }
        let explosive = stats.explosive.map(|mut e| {
            e.damage *= damage_mult;
            e
        });
        world_setup::spawn_bullet(
            world,
            origin,
            &shot,
            BulletSpec {
                faction: Faction::Player,
                penetration: stats.penetration + penetration_bonus,
                max_distance: stats.range,
                explosive,
                critical,
            },
        );
    }
    events.push(GameEvent::ShotFired {
        weapon: stats.kind,
        pellets: shots.len() as u32,
    });
}
