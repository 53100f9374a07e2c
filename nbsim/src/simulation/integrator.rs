//! Fixed-step time integrators for the N-body world
//!
//! Provides a position Verlet and an explicit Euler step, both driven by a
//! [`ForceSet`] and selected through [`IntegrationStrategy`]. Every step reads a
//! single snapshot of the world and writes a fresh set of bodies, so no body sees
//! another body's updated position within the same step.

use log::{debug, error};

use super::forces::ForceSet;
use super::states::{Body, Motion, NVec2, World};
use crate::configuration::config::IntegrationStrategy;
use crate::error::{Result, SimError};

/// Advance `world` by one step of size `dt` in place.
///
/// Forces are evaluated once on the current state, each body is advanced with
/// `strategy` and wrapped back onto the torus. If any new value is NaN or
/// infinite the world is left untouched and [`SimError::NonFinite`] is returned.
pub fn step(world: &mut World, forces: &ForceSet, dt: f64, strategy: IntegrationStrategy) -> Result<()> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(SimError::InvalidConfiguration(format!("dt must be positive, got {dt}")));
    }
    let n = world.len();
    if n == 0 { // no bodies, return
        return Ok(());
    }

    // Net force on each body from the current snapshot
    let mut f = vec![NVec2::zeros(); n];
    forces.accumulate_forces(world, &mut f);

    let next: Vec<Body> = world
        .bodies()
        .iter()
        .zip(f.iter())
        .map(|(b, f)| advance(world, b, *f, dt, strategy))
        .collect();

    if let Some(i) = next.iter().position(|b| !b.is_finite()) {
        error!("step {}: body {i} became non-finite, world not updated", world.steps);
        return Err(SimError::NonFinite { body: i, t: world.t });
    }

    world.replace_bodies(next);
    world.t += dt;
    world.steps += 1;
    Ok(())
}

/// Pure form of [`step`]: returns the advanced world and leaves `world` as is
pub fn stepped(world: &World, forces: &ForceSet, dt: f64, strategy: IntegrationStrategy) -> Result<World> {
    let mut next = world.clone();
    step(&mut next, forces, dt, strategy)?;
    Ok(next)
}

/// New state of one body under `strategy`, given the net force `f` on it
fn advance(world: &World, b: &Body, f: NVec2, dt: f64, strategy: IntegrationStrategy) -> Body {
    let a = f / b.mass();

    let (x_new, motion) = match strategy {
        IntegrationStrategy::Verlet => {
            if let Motion::Velocity(_) = b.motion {
                debug!("verlet: deriving previous position from velocity");
            }
            let prev = b.previous(dt);

            // x_n+1 = 2 x_n - x_n-1 + a dt^2
            let x_new = 2.0 * b.x - prev + a * dt * dt;
            (x_new, Motion::Previous(b.x))
        }
        IntegrationStrategy::Euler => {
            if let Motion::Previous(_) = b.motion {
                debug!("euler: deriving velocity from previous position");
            }

            // v_n+1 = v_n + a dt, x_n+1 = x_n + v_n+1 dt
            let v = b.velocity(dt) + a * dt;
            (b.x + v * dt, Motion::Velocity(v))
        }
    };

    // Wrap onto the torus; the previous position moves with the body so the
    // implied velocity survives an edge crossing
    let x_wrapped = world.wrap(x_new);
    let motion = match motion {
        Motion::Previous(p) => Motion::Previous(p + (x_wrapped - x_new)),
        v => v,
    };

    let mut next = b.clone();
    next.x = x_wrapped;
    next.motion = motion;
    next
}
