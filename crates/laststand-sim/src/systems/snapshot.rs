//! Snapshot builder: read-only view of the world after a tick.

use hecs::World;

use laststand_core::components::*;
use laststand_core::entity::{Body, Health};
use laststand_core::enums::GamePhase;
use laststand_core::events::GameEvent;
use laststand_core::state::*;
use laststand_core::types::SimTime;

use crate::player::Player;
use crate::systems::wave_spawner::WaveState;
use crate::upgrades::{UpgradeOffer, UpgradeState};

/// Everything outside the ECS world the snapshot needs.
pub struct SnapshotInputs<'a> {
    pub time: &'a SimTime,
    pub phase: GamePhase,
    pub player: Option<&'a Player>,
    pub wave: &'a WaveState,
    pub offer: Option<&'a UpgradeOffer>,
    pub upgrades: &'a UpgradeState,
    pub events: Vec<GameEvent>,
    pub summary: Option<RunSummary>,
}

pub fn build_snapshot(world: &World, inputs: SnapshotInputs<'_>) -> GameSnapshot {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &EnemyAi, &Body, &Health, Option<&BossState>)>()
        .iter()
        .filter(|(_, (_, _, _, health, _))| health.is_alive())
        .map(|(_, (enemy, ai, body, health, boss))| EnemyView {
            id: enemy.id,
            kind: enemy.kind,
            position: body.position,
            radius: body.radius,
            health_fraction: health.fraction(),
            state: ai.state,
            charging: boss.is_some_and(|b| b.charging),
            shielded: boss.is_some_and(|b| b.shield_active()),
        })
        .collect();
    enemies.sort_by_key(|e| e.id);

    let projectiles = world
        .query::<(&Projectile, &Body)>()
        .iter()
        .filter(|(_, (p, _))| p.alive)
        .map(|(_, (p, body))| ProjectileView {
            position: body.position,
            velocity: body.velocity,
            radius: body.radius,
            faction: p.faction,
            explosive: p.explosive.is_some(),
        })
        .collect();

    let missiles = world
        .query::<(&Missile, &Body)>()
        .iter()
        .filter(|(_, (m, _))| m.alive)
        .map(|(_, (m, body))| MissileView {
            position: body.position,
            velocity: body.velocity,
            explosion_radius: m.explosion_radius,
        })
        .collect();

    let items = world
        .query::<(&Pickup, &Body)>()
        .iter()
        .filter(|(_, (p, _))| !p.collected && p.lifetime_secs > 0.0)
        .map(|(_, (p, body))| ItemView {
            kind: p.kind,
            position: body.position,
            remaining_secs: p.lifetime_secs,
        })
        .collect();

    let hazards = world
        .query::<&PoisonZone>()
        .iter()
        .filter(|(_, z)| z.remaining_secs > 0.0)
        .map(|(_, z)| HazardView {
            position: z.position,
            radius: z.radius,
            remaining_secs: z.remaining_secs,
        })
        .collect();

    let effects = world
        .query::<&Effect>()
        .iter()
        .filter(|(_, e)| !e.is_finished())
        .map(|(_, e)| EffectView {
            kind: e.kind.clone(),
            position: e.position,
            progress: e.progress(),
            radius: e.current_radius(),
        })
        .collect();

    let upgrade_offer = inputs.offer.map(|offer| UpgradeOfferView {
        tracks: offer
            .tracks
            .iter()
            .map(|&track| UpgradeChoiceView {
                track,
                next_level: inputs.upgrades.level(track) + 1,
            })
            .collect(),
        remaining_secs: offer.remaining_secs,
    });

    GameSnapshot {
        time: *inputs.time,
        phase: inputs.phase,
        wave: WaveView {
            number: inputs.wave.number,
            killed: inputs.wave.killed,
            total: inputs.wave.total(),
            boss_spawned: inputs.wave.boss_spawned,
        },
        player: inputs.player.map(player_view),
        enemies,
        projectiles,
        missiles,
        items,
        hazards,
        effects,
        upgrade_offer,
        events: inputs.events,
        game_over: inputs.summary,
    }
}

fn player_view(player: &Player) -> PlayerView {
    let mods = player.weapon_modifiers();
    let weapon = player
        .weapon()
        .map(|w| WeaponView {
            kind: w.kind(),
            slot: player.current_weapon,
            current_ammo: w.current_ammo(),
            magazine_size: w.magazine_capacity(&mods),
            total_ammo: w.total_ammo(),
            reloading: w.is_reloading(),
            reload_progress: w.reload_progress(),
        })
        .unwrap_or(WeaponView {
            kind: laststand_core::enums::WeaponKind::Pistol,
            slot: 0,
            current_ammo: 0,
            magazine_size: 0,
            total_ammo: Some(0),
            reloading: false,
            reload_progress: 0.0,
        });

    PlayerView {
        position: player.body.position,
        aim: player.aim,
        health: player.health.current(),
        max_health: player.health.max(),
        score: player.score,
        combo: player.combo,
        combo_multiplier: player.combo_multiplier(),
        weapon,
        skill_ready: player.skill_ready(),
        skill_charges: player.skill_charges_left(),
        dash_ready: player.dash_ready(),
        dashing: player.is_dashing(),
        invulnerable: player.is_invulnerable(),
        buffs: BuffView {
            speed_secs: player.buffs.speed_secs,
            damage_secs: player.buffs.damage_secs,
            shield_secs: player.buffs.shield_secs,
        },
        revives: player.revives,
    }
}
