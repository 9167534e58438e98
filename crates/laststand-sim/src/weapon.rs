//! Weapon model: catalog stats plus the Ready <-> Reloading ammo machine.

use rand::Rng;
use serde::{Deserialize, Serialize};

use laststand_core::components::Explosive;
use laststand_core::constants::RESERVE_MAGAZINES;
use laststand_core::enums::WeaponKind;
use laststand_core::types::{Vector2, VectorExt};

/// Immutable weapon configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeaponStats {
    pub kind: WeaponKind,
    pub damage: f64,
    /// Minimum time between shots at a 1.0 fire-rate multiplier.
    pub fire_interval_secs: f64,
    pub magazine_size: u32,
    pub reload_secs: f64,
    pub bullet_speed: f64,
    /// Half-angle of the uniform spread cone, in degrees.
    pub spread_deg: f64,
    pub pellets: u32,
    pub penetration: u32,
    pub infinite_ammo: bool,
    /// Travel distance before a bullet expires.
    pub range: f64,
    pub explosive: Option<Explosive>,
}

pub fn weapon_stats(kind: WeaponKind) -> WeaponStats {
    let base = WeaponStats {
        kind,
        damage: 25.0,
        fire_interval_secs: 0.3,
        magazine_size: 12,
        reload_secs: 1.5,
        bullet_speed: 800.0,
        spread_deg: 5.0,
        pellets: 1,
        penetration: 0,
        infinite_ammo: false,
        range: 1500.0,
        explosive: None,
    };
    match kind {
        WeaponKind::Pistol => WeaponStats {
            infinite_ammo: true,
            ..base
        },
        WeaponKind::Shotgun => WeaponStats {
            damage: 40.0,
            fire_interval_secs: 0.8,
            magazine_size: 6,
            reload_secs: 2.0,
            bullet_speed: 600.0,
            spread_deg: 25.0,
            pellets: 8,
            range: 300.0,
            ..base
        },
        WeaponKind::AssaultRifle => WeaponStats {
            damage: 35.0,
            fire_interval_secs: 0.12,
            magazine_size: 30,
            reload_secs: 2.5,
            bullet_speed: 900.0,
            spread_deg: 8.0,
            penetration: 1,
            range: 800.0,
            ..base
        },
        WeaponKind::Sniper => WeaponStats {
            damage: 120.0,
            fire_interval_secs: 1.5,
            magazine_size: 5,
            reload_secs: 3.0,
            bullet_speed: 1500.0,
            spread_deg: 0.0,
            penetration: 3,
            range: 1200.0,
            ..base
        },
        WeaponKind::RocketLauncher => WeaponStats {
            damage: 200.0,
            fire_interval_secs: 2.5,
            magazine_size: 1,
            reload_secs: 4.0,
            bullet_speed: 500.0,
            spread_deg: 3.0,
            range: 600.0,
            explosive: Some(Explosive {
                radius: 100.0,
                damage: 150.0,
            }),
            ..base
        },
    }
}

/// Player-side multipliers that shape weapon handling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponModifiers {
    /// Divides the fire interval.
    pub fire_rate: f64,
    /// Divides the reload time.
    pub reload_speed: f64,
    /// Scales magazine capacity.
    pub magazine: f64,
}

impl Default for WeaponModifiers {
    fn default() -> Self {
        Self {
            fire_rate: 1.0,
            reload_speed: 1.0,
            magazine: 1.0,
        }
    }
}

/// One pellet leaving the muzzle.
#[derive(Debug, Clone, Copy)]
pub struct Shot {
    pub direction: Vector2,
    pub speed: f64,
    pub damage: f64,
}

/// A weapon instance owned by the player: stats plus ammo state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub stats: WeaponStats,
    current_ammo: u32,
    total_ammo: u32,
    reloading: bool,
    reload_remaining_secs: f64,
    reload_duration_secs: f64,
    secs_since_shot: f64,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        let stats = weapon_stats(kind);
        Self {
            stats,
            current_ammo: stats.magazine_size,
            total_ammo: stats.magazine_size * RESERVE_MAGAZINES,
            reloading: false,
            reload_remaining_secs: 0.0,
            reload_duration_secs: 0.0,
            secs_since_shot: f64::INFINITY,
        }
    }

    pub fn kind(&self) -> WeaponKind {
        self.stats.kind
    }

    pub fn current_ammo(&self) -> u32 {
        self.current_ammo
    }

    /// Reserve ammo, `None` when infinite.
    pub fn total_ammo(&self) -> Option<u32> {
        (!self.stats.infinite_ammo).then_some(self.total_ammo)
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading
    }

    /// 0..1 through the current reload.
    pub fn reload_progress(&self) -> f64 {
        if !self.reloading || self.reload_duration_secs <= 0.0 {
            return 0.0;
        }
        (1.0 - self.reload_remaining_secs / self.reload_duration_secs).clamp(0.0, 1.0)
    }

    pub fn magazine_capacity(&self, mods: &WeaponModifiers) -> u32 {
        ((self.stats.magazine_size as f64 * mods.magazine).round() as u32).max(1)
    }

    fn has_reserve(&self) -> bool {
        self.stats.infinite_ammo || self.total_ammo > 0
    }

    pub fn can_fire(&self, mods: &WeaponModifiers) -> bool {
        !self.reloading
            && self.current_ammo > 0
            && self.secs_since_shot >= self.stats.fire_interval_secs / mods.fire_rate.max(0.01)
    }

    /// Fire from `direction`. Each pellet is rotated by a uniform angle in
    /// `[-spread, +spread]` degrees. Returns `None` when not ready.
    pub fn fire<R: Rng>(
        &mut self,
        direction: Vector2,
        damage_mult: f64,
        mods: &WeaponModifiers,
        rng: &mut R,
    ) -> Option<Vec<Shot>> {
        if !self.can_fire(mods) {
            return None;
        }
        self.secs_since_shot = 0.0;
        if !self.stats.infinite_ammo {
            self.current_ammo -= 1;
        }
        if self.current_ammo == 0 {
            self.start_reload(mods);
        }

        let spread = self.stats.spread_deg;
        let base = if direction == Vector2::ZERO {
            Vector2::X
        } else {
            direction.normalize()
        };
        let shots = (0..self.stats.pellets)
            .map(|_| {
                let offset = if spread > 0.0 {
                    rng.gen_range(-spread..=spread)
                } else {
                    0.0
                };
                Shot {
                    direction: base.rotated_deg(offset),
                    speed: self.stats.bullet_speed,
                    damage: self.stats.damage * damage_mult,
                }
            })
            .collect();
        Some(shots)
    }

    /// Begin a reload. No-op (false) if already reloading, full, or dry.
    pub fn start_reload(&mut self, mods: &WeaponModifiers) -> bool {
        if self.reloading
            || self.current_ammo >= self.magazine_capacity(mods)
            || !self.has_reserve()
        {
            return false;
        }
        self.reloading = true;
        self.reload_duration_secs = self.stats.reload_secs / mods.reload_speed.max(0.01);
        self.reload_remaining_secs = self.reload_duration_secs;
        true
    }

    /// Advance timers. Returns true on the tick a reload completes.
    pub fn tick(&mut self, dt: f64, mods: &WeaponModifiers) -> bool {
        self.secs_since_shot += dt;
        if !self.reloading {
            return false;
        }
        self.reload_remaining_secs -= dt;
        if self.reload_remaining_secs > 0.0 {
            return false;
        }
        self.finish_reload(mods);
        true
    }

    fn finish_reload(&mut self, mods: &WeaponModifiers) {
        let capacity = self.magazine_capacity(mods);
        let needed = capacity.saturating_sub(self.current_ammo);
        if self.stats.infinite_ammo {
            self.current_ammo = capacity;
        } else {
            let refill = needed.min(self.total_ammo);
            self.current_ammo += refill;
            self.total_ammo -= refill;
        }
        self.reloading = false;
        self.reload_remaining_secs = 0.0;
    }

    /// Add reserve ammo. Starts a reload if the magazine was empty.
    pub fn add_reserve(&mut self, rounds: u32, mods: &WeaponModifiers) {
        if self.stats.infinite_ammo {
            return;
        }
        self.total_ammo = self.total_ammo.saturating_add(rounds);
        if self.current_ammo == 0 {
            self.start_reload(mods);
        }
    }
}
