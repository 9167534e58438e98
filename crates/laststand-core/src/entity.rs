//! Shared entity base: kinematic body, health pool and the circle test.
//!
//! The player, enemies and projectiles all carry a [`Body`] and most carry a
//! [`Health`]. These are the only components with behaviour attached; the
//! rest of the game logic lives in the simulation systems.

use serde::{Deserialize, Serialize};

use crate::constants::{ENTITY_FRICTION, HIT_FLASH_SECS};
use crate::enums::CollisionGroup;
use crate::types::{Bounds, Vector2};

/// Position, motion and collision circle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub position: Vector2,
    pub velocity: Vector2,
    pub acceleration: Vector2,
    pub radius: f64,
    /// Fraction of velocity retained per integration step.
    pub friction: f64,
    pub group: CollisionGroup,
    pub can_collide: bool,
}

impl Body {
    pub fn new(position: Vector2, radius: f64, group: CollisionGroup) -> Self {
        Self {
            position,
            velocity: Vector2::ZERO,
            acceleration: Vector2::ZERO,
            radius,
            friction: ENTITY_FRICTION,
            group,
            can_collide: true,
        }
    }

    /// Semi-implicit Euler step followed by friction. Acceleration is consumed.
    pub fn integrate(&mut self, dt: f64) {
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
        self.velocity *= self.friction;
        self.acceleration = Vector2::ZERO;
    }

    /// Clamp so the whole circle stays inside `bounds`.
    pub fn keep_in_bounds(&mut self, bounds: &Bounds) {
        let r = Vector2::splat(self.radius);
        self.position = self.position.clamp(bounds.min + r, bounds.max - r);
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        self.position.distance(other.position)
    }

    /// Strict circle overlap. Ignores the collide flag.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }

    /// Penetration depth with `other` (zero or less when apart).
    pub fn overlap_depth(&self, other: &Body) -> f64 {
        self.radius + other.radius - self.distance_to(other)
    }
}

/// Circle collision between two live, collidable entities.
pub fn is_colliding(a: &Body, a_alive: bool, b: &Body, b_alive: bool) -> bool {
    a.can_collide && b.can_collide && a_alive && b_alive && a.overlaps(b)
}

/// Push two overlapping bodies apart, each by half the overlap.
pub fn separate(a: &mut Body, b: &mut Body) {
    let depth = a.overlap_depth(b);
    if depth <= 0.0 {
        return;
    }
    let mut normal = (a.position - b.position).normalize_or_zero();
    if normal == Vector2::ZERO {
        normal = Vector2::X;
    }
    a.position += normal * (depth / 2.0);
    b.position -= normal * (depth / 2.0);
}

/// Result of a damage attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// Dead, flashing or otherwise immune; nothing changed.
    Ignored,
    /// Health dropped but stayed positive.
    Survived,
    /// This hit took health to zero.
    Killed,
}

impl DamageOutcome {
    pub fn killed(self) -> bool {
        self == DamageOutcome::Killed
    }

    pub fn applied(self) -> bool {
        self != DamageOutcome::Ignored
    }
}

/// Health pool. `0 <= current <= max` always holds and `alive` is false
/// exactly when `current` reached zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    current: f64,
    max: f64,
    alive: bool,
    /// Remaining hit-flash window.
    pub flash_secs: f64,
}

impl Health {
    pub fn new(max: f64) -> Self {
        let max = max.max(1.0);
        Self {
            current: max,
            max,
            alive: true,
            flash_secs: 0.0,
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_secs > 0.0
    }

    pub fn fraction(&self) -> f64 {
        self.current / self.max
    }

    /// Subtract `amount`. Ignored while dead or flashing; a surviving hit
    /// opens the flash window.
    pub fn take_damage(&mut self, amount: f64) -> DamageOutcome {
        if !self.alive || self.is_flashing() {
            return DamageOutcome::Ignored;
        }
        self.current = (self.current - amount.max(0.0)).max(0.0);
        if self.current <= 0.0 {
            self.current = 0.0;
            self.alive = false;
            DamageOutcome::Killed
        } else {
            self.flash_secs = HIT_FLASH_SECS;
            DamageOutcome::Survived
        }
    }

    /// Restore up to `max`. The dead stay dead.
    pub fn heal(&mut self, amount: f64) {
        if !self.alive {
            return;
        }
        self.current = (self.current + amount.max(0.0)).min(self.max);
    }

    /// Raise the cap by `amount` without touching current health.
    pub fn raise_max(&mut self, amount: f64) {
        self.max += amount.max(0.0);
    }

    /// Bring a dead pool back at `fraction` of max. Only the revive upgrade
    /// calls this.
    pub fn revive(&mut self, fraction: f64) {
        if self.alive {
            return;
        }
        self.current = (self.max * fraction.clamp(0.0, 1.0)).max(1.0).min(self.max);
        self.alive = true;
        self.flash_secs = 0.0;
    }

    /// Count down the flash window.
    pub fn tick(&mut self, dt: f64) {
        self.flash_secs = (self.flash_secs - dt).max(0.0);
    }
}
