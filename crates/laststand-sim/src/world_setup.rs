//! Entity spawning helpers shared by the engine and its systems.

use hecs::{Entity, World};
use rand::Rng;

use laststand_ai::profiles::EnemyProfile;
use laststand_core::components::*;
use laststand_core::constants::*;
use laststand_core::entity::{Body, Health};
use laststand_core::enums::{CollisionGroup, EnemyKind, Faction, ItemKind};
use laststand_core::types::{Vector2, VectorExt};

use crate::weapon::Shot;

/// Spawn an enemy from its profile. Minions are created with `summoned`
/// so they do not count toward the wave quota.
pub fn spawn_enemy(
    world: &mut World,
    profile: &EnemyProfile,
    position: Vector2,
    id: u32,
    summoned: bool,
) -> Entity {
    let enemy = Enemy {
        id,
        kind: profile.kind,
        stats: profile.stats,
        summoned,
    };
    let ai = EnemyAi {
        target: Some(TargetRef::Player),
        ..Default::default()
    };
    let body = Body::new(position, profile.radius, CollisionGroup::Enemy);
    let health = Health::new(profile.health);

    match profile.kind {
        EnemyKind::Zombie => world.spawn((enemy, ai, body, health)),
        EnemyKind::MiniBoss(boss_type) => {
            let boss = BossState::new(
                boss_type,
                profile.special_cooldown_secs,
                BOSS_MISSILE_COOLDOWN_SECS,
            );
            world.spawn((enemy, ai, body, health, boss))
        }
    }
}

/// Bullet parameters that come from the shooter rather than the shot.
#[derive(Debug, Clone, Copy)]
pub struct BulletSpec {
    pub faction: Faction,
    pub penetration: u32,
    pub max_distance: f64,
    pub explosive: Option<Explosive>,
    pub critical: bool,
}

pub fn spawn_bullet(world: &mut World, origin: Vector2, shot: &Shot, spec: BulletSpec) -> Entity {
    let mut body = Body::new(origin, BULLET_RADIUS, CollisionGroup::Projectile);
    body.velocity = shot.direction * shot.speed;
    body.friction = 1.0;
    let projectile = Projectile {
        faction: spec.faction,
        damage: shot.damage,
        penetration: spec.penetration,
        pierce_count: 0,
        lifetime_secs: BULLET_LIFETIME_SECS,
        max_distance: spec.max_distance.min(BULLET_MAX_DISTANCE),
        distance_traveled: 0.0,
        hit_ids: Vec::new(),
        explosive: spec.explosive,
        critical: spec.critical,
        alive: true,
    };
    world.spawn((projectile, body))
}

pub fn spawn_missile(world: &mut World, origin: Vector2, direction: Vector2) -> Entity {
    let mut body = Body::new(origin, MISSILE_RADIUS, CollisionGroup::Projectile);
    body.velocity = direction * MISSILE_SPEED;
    body.friction = 1.0;
    body.can_collide = false;
    let missile = Missile {
        target: TargetRef::Player,
        damage: MISSILE_DAMAGE,
        speed: MISSILE_SPEED,
        explosion_radius: MISSILE_EXPLOSION_RADIUS,
        lifetime_secs: MISSILE_LIFETIME_SECS,
        homing_strength: MISSILE_HOMING_STRENGTH,
        alive: true,
    };
    world.spawn((missile, body))
}

pub fn spawn_pickup(world: &mut World, kind: ItemKind, position: Vector2, lifetime_secs: f64) -> Entity {
    let body = Body::new(position, ITEM_RADIUS, CollisionGroup::Item);
    let pickup = Pickup {
        kind,
        lifetime_secs,
        collected: false,
    };
    world.spawn((pickup, body))
}

pub fn spawn_poison_zone(world: &mut World, position: Vector2) -> Entity {
    world.spawn((PoisonZone {
        position,
        radius: POISON_RADIUS,
        damage_per_sec: POISON_DAMAGE_PER_SEC,
        remaining_secs: POISON_DURATION_SECS,
        pulse_timer_secs: 0.0,
    },))
}

/// Flash, sparks and shockwaves for a blast of `radius` at `position`.
pub fn spawn_explosion_effects<R: Rng>(world: &mut World, rng: &mut R, position: Vector2, radius: f64) {
    world.spawn((Effect::new(
        EffectKind::Flash {
            radius: radius * EXPLOSION_FLASH_SCALE,
        },
        position,
        EXPLOSION_FLASH_SECS,
    ),));

    for _ in 0..EXPLOSION_SPARK_COUNT {
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let speed = rng.gen_range(100.0..300.0);
        let size = rng.gen_range(2.0..5.0);
        let life = rng.gen_range(0.3..0.6);
        world.spawn((Effect::new(
            EffectKind::Spark {
                velocity: Vector2::from_angle_rad(angle) * speed,
                size,
            },
            position,
            life,
        ),));
    }

    for i in 0..SHOCKWAVE_COUNT {
        let i = i as f64;
        world.spawn((Effect::new(
            EffectKind::Shockwave {
                max_radius: radius * (1.0 + 0.3 * i),
            },
            position,
            0.4 + 0.1 * i,
        ),));
    }
}

/// Explosion effects plus lightning, rings and a distortion pulse.
pub fn spawn_skill_effects<R: Rng>(world: &mut World, rng: &mut R, position: Vector2, radius: f64) {
    spawn_explosion_effects(world, rng, position, radius);

    let step = std::f64::consts::TAU / SKILL_LIGHTNING_COUNT as f64;
    for i in 0..SKILL_LIGHTNING_COUNT {
        world.spawn((Effect::new(
            EffectKind::Lightning {
                angle: step * i as f64,
                length: radius * 1.2,
            },
            position,
            0.2,
        ),));
    }

    for i in 0..SKILL_RING_COUNT {
        let i = i as f64;
        world.spawn((Effect::new(
            EffectKind::Ring {
                max_radius: radius * (0.5 + 0.2 * i),
            },
            position,
            0.6 + 0.05 * i,
        ),));
    }

    world.spawn((Effect::new(
        EffectKind::Distortion { radius },
        position,
        SKILL_DISTORTION_SECS,
    ),));
}
