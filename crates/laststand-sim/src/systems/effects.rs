//! Timed-effect runner. Effects only count down; sparks also drift.

use hecs::World;

use laststand_core::components::{Effect, EffectKind};

/// Spark velocity retained per tick.
const SPARK_DRAG: f64 = 0.95;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, effect) in world.query_mut::<&mut Effect>() {
        effect.remaining_secs -= dt;
        if let EffectKind::Spark { velocity, .. } = &mut effect.kind {
            effect.position += *velocity * dt;
            *velocity *= SPARK_DRAG;
        }
    }
}
