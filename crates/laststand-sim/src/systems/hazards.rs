//! Poison zones: lingering damage pulses while the player stands inside.

use hecs::World;
use rand::Rng;

use laststand_core::components::PoisonZone;
use laststand_core::events::GameEvent;

use crate::combat;
use crate::player::Player;

/// Seconds between damage pulses of a zone.
const PULSE_INTERVAL_SECS: f64 = 1.0;

pub fn run<R: Rng>(
    world: &mut World,
    player: &mut Player,
    dt: f64,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    let mut pulses = Vec::new();
    for (_entity, zone) in world.query_mut::<&mut PoisonZone>() {
        zone.remaining_secs -= dt;
        zone.pulse_timer_secs = (zone.pulse_timer_secs - dt).max(0.0);
        if zone.remaining_secs <= 0.0 || !player.is_alive() {
            continue;
        }
        let inside = zone.position.distance(player.body.position) <= zone.radius + player.body.radius;
        if inside && zone.pulse_timer_secs <= 0.0 {
            zone.pulse_timer_secs = PULSE_INTERVAL_SECS;
            pulses.push(zone.damage_per_sec * PULSE_INTERVAL_SECS);
        }
    }
    for damage in pulses {
        combat::hurt_player(player, damage, rng, events);
    }
}
