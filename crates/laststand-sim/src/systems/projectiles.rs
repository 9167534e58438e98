//! Bullet flight: straight-line motion, lifetime, range and arena expiry.

use hecs::World;

use laststand_core::components::Projectile;
use laststand_core::entity::Body;
use laststand_core::types::Bounds;

pub fn run(world: &mut World, dt: f64, bounds: &Bounds) {
    for (_entity, (projectile, body)) in world.query_mut::<(&mut Projectile, &mut Body)>() {
        if !projectile.alive {
            continue;
        }
        let step = body.velocity * dt;
        body.position += step;
        projectile.distance_traveled += step.length();
        projectile.lifetime_secs -= dt;

        if projectile.lifetime_secs <= 0.0
            || projectile.distance_traveled >= projectile.max_distance
            || !bounds.contains(body.position)
        {
            projectile.alive = false;
        }
    }
}
