//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D vector in arena space (world units, y grows downward on screen).
pub type Vector2 = glam::DVec2;

/// Helpers on top of glam's vector algebra that the simulation leans on.
pub trait VectorExt {
    /// Unit vector at `angle` radians from +x.
    fn from_angle_rad(angle: f64) -> Vector2;
    /// This vector rotated by `degrees`.
    fn rotated_deg(self, degrees: f64) -> Vector2;
    /// Direction toward `target`, or zero when the points coincide.
    fn direction_to(self, target: Vector2) -> Vector2;
    /// Same direction, magnitude clamped to `max`.
    fn limited(self, max: f64) -> Vector2;
}

impl VectorExt for Vector2 {
    fn from_angle_rad(angle: f64) -> Vector2 {
        Vector2::new(angle.cos(), angle.sin())
    }

    fn rotated_deg(self, degrees: f64) -> Vector2 {
        Vector2::from_angle(degrees.to_radians()).rotate(self)
    }

    fn direction_to(self, target: Vector2) -> Vector2 {
        (target - self).normalize_or_zero()
    }

    fn limited(self, max: f64) -> Vector2 {
        self.clamp_length_max(max)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Axis-aligned arena rectangle. Entities are clamped inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vector2,
    pub max: Vector2,
}

impl Bounds {
    /// Square arena of side `size` centered on the origin.
    pub fn centered(size: f64) -> Self {
        let half = size / 2.0;
        Self {
            min: Vector2::splat(-half),
            max: Vector2::splat(half),
        }
    }

    /// Whether `point` lies inside (borders included).
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}
