//! Step timing for both integration strategies
//!
//! Bodies are laid out deterministically (no rand needed) so runs are comparable.

use std::time::Instant;

use crate::configuration::config::IntegrationStrategy;
use crate::error::Result;
use crate::simulation::forces::{ForceSet, NewtonianGravity};
use crate::simulation::integrator::step;
use crate::simulation::states::{Body, NVec2, World};

const WIDTH: f64 = 80.0;
const HEIGHT: f64 = 24.0;

/// Helper to build a manual World of size `n` for `strategy`
fn make_world(n: usize, strategy: IntegrationStrategy) -> Result<World> {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        let x = NVec2::new(
            WIDTH * (0.5 + 0.2 * (i_f * 0.37).sin()),
            HEIGHT * (0.5 + 0.2 * (i_f * 0.13).cos()),
        );
        let v = NVec2::new((i_f * 0.07).sin(), (i_f * 0.11).cos());

        let body = match strategy {
            IntegrationStrategy::Verlet => Body::with_previous(x, x - 0.01 * v, 1.0)?,
            IntegrationStrategy::Euler => Body::with_velocity(x, v, 1.0)?,
        };
        bodies.push(body);
    }

    World::from_bodies(bodies, WIDTH, HEIGHT)
}

/// Time `step` for a range of n and both strategies
/// Prints CSV so the output can be pasted into a spreadsheet
pub fn bench_step() -> Result<()> {
    let ns = [3, 8, 16, 32, 64, 128];
    let steps = 2000; // steps per measurement
    let dt = 0.01;

    let forces = ForceSet::new().with(NewtonianGravity { g: 100.0, eps: 1e-9 });

    println!("N,verlet_us,euler_us");

    for n in ns {
        let mut per_step = [0.0; 2];

        for (slot, strategy) in [IntegrationStrategy::Verlet, IntegrationStrategy::Euler].into_iter().enumerate() {
            let mut world = make_world(n, strategy)?;

            // Warm-up
            step(&mut world, &forces, dt, strategy)?;

            let t0 = Instant::now();
            for _ in 0..steps {
                step(&mut world, &forces, dt, strategy)?;
            }
            per_step[slot] = t0.elapsed().as_secs_f64() * 1e6 / steps as f64;
        }

        println!("{},{:.3},{:.3}", n, per_step[0], per_step[1]);
    }

    Ok(())
}
