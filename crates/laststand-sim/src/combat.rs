//! Damage resolution shared by the bullet, skill, bomb and missile paths,
//! plus kill crediting.

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;

use laststand_ai::abilities::shielded_damage;
use laststand_core::components::{BossState, Enemy};
use laststand_core::config::Tuning;
use laststand_core::entity::{Body, DamageOutcome, Health};
use laststand_core::enums::{EnemyKind, ItemKind};
use laststand_core::events::GameEvent;
use laststand_core::types::Vector2;

use crate::player::{Blast, Player};
use crate::systems::wave_spawner::WaveState;
use crate::world_setup;

/// An enemy that died this tick, waiting to be credited.
#[derive(Debug, Clone, Copy)]
pub struct KillRecord {
    pub enemy_id: u32,
    pub kind: EnemyKind,
    pub position: Vector2,
    pub score: u64,
    pub summoned: bool,
}

/// Apply `amount` to one enemy, honouring the tank shield. Hits and kills are
/// recorded; the entity itself stays in the world until cleanup.
pub fn strike_enemy(
    world: &mut World,
    entity: Entity,
    amount: f64,
    critical: bool,
    kills: &mut Vec<KillRecord>,
    events: &mut Vec<GameEvent>,
) -> DamageOutcome {
    let Ok((enemy, body, health, boss)) =
        world.query_one_mut::<(&Enemy, &Body, &mut Health, Option<&BossState>)>(entity)
    else {
        return DamageOutcome::Ignored;
    };
    let amount = boss.map_or(amount, |b| shielded_damage(b, amount));
    let outcome = health.take_damage(amount);
    if outcome.applied() {
        events.push(GameEvent::EnemyHit {
            enemy_id: enemy.id,
            damage: amount,
            critical,
        });
    }
    if outcome.killed() {
        kills.push(KillRecord {
            enemy_id: enemy.id,
            kind: enemy.kind,
            position: body.position,
            score: enemy.stats.score,
            summoned: enemy.summoned,
        });
    }
    outcome
}

/// Live enemies whose centre lies within `radius` of `center`.
pub fn enemies_within(world: &World, center: Vector2, radius: f64) -> Vec<Entity> {
    world
        .query::<(&Enemy, &Body, &Health)>()
        .iter()
        .filter(|(_, (_, body, health))| {
            health.is_alive() && body.position.distance(center) <= radius
        })
        .map(|(entity, _)| entity)
        .collect()
}

/// Damage every live enemy inside the blast. Returns how many were hit.
pub fn blast_enemies(
    world: &mut World,
    blast: &Blast,
    kills: &mut Vec<KillRecord>,
    events: &mut Vec<GameEvent>,
) -> u32 {
    let mut hits = 0;
    for entity in enemies_within(world, blast.center, blast.radius) {
        if strike_enemy(world, entity, blast.damage, false, kills, events).applied() {
            hits += 1;
        }
    }
    hits
}

/// Damage the player, emitting `PlayerHurt` when it lands.
pub fn hurt_player<R: Rng>(
    player: &mut Player,
    amount: f64,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> DamageOutcome {
    let before = player.health.current();
    let outcome = player.take_damage(amount, rng);
    if outcome.applied() {
        events.push(GameEvent::PlayerHurt {
            damage: before - player.health.current(),
            health: player.health.current(),
        });
    }
    outcome
}

/// Credit this tick's kills: score, combo, wave progress and item drops.
pub fn credit_kills<R: Rng>(
    world: &mut World,
    kills: &mut Vec<KillRecord>,
    player: &mut Player,
    wave: &mut WaveState,
    tuning: &Tuning,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    for kill in kills.drain(..) {
        let points = player.add_score(kill.score);
        player.add_kill();
        if !kill.summoned {
            wave.killed += 1;
        }
        events.push(GameEvent::EnemyKilled {
            enemy_id: kill.enemy_id,
            kind: kill.kind,
            score: points,
            combo: player.combo,
        });
        log::debug!("enemy {} ({:?}) killed for {points} points", kill.enemy_id, kill.kind);

        if rng.gen_bool(tuning.item_drop_chance) {
            if let Some(kind) = ItemKind::ALL.choose(rng) {
                world_setup::spawn_pickup(world, *kind, kill.position, tuning.item_lifetime_secs);
            }
        }
    }
}
