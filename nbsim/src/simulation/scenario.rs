//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - world state (`World` with bodies at t = 0)
//! - active force set (`ForceSet`)
//!
//! The terminal driver, headless runs and the tests all advance a `Scenario`
//! through [`Scenario::step`]

use std::time::Duration;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::{BodyConfig, IntegrationStrategy, ScenarioConfig};
use crate::error::Result;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{ForceSet, NewtonianGravity};
use crate::simulation::integrator::step;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, World};

/// Fully-initialized simulation: settings, current world and force laws
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub world: World,
    pub forces: ForceSet,
}

impl Scenario {
    /// Build a scenario, seeding the generator from the config or from entropy
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let seed = cfg.parameters.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);
        info!("scenario seed = {seed}");
        Self::build_scenario_with_rng(cfg, seed, &mut rng)
    }

    /// Build a scenario drawing random bodies from `rng`
    /// `seed` is only recorded in [`Parameters`]
    pub fn build_scenario_with_rng<R: Rng>(cfg: ScenarioConfig, seed: u64, rng: &mut R) -> Result<Self> {
        cfg.validate()?;

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            integrator: cfg.engine.integrator,
            frame_interval: Duration::from_millis(cfg.engine.frame_ms),
        };

        // Parameters (runtime) from ParametersConfig
        let p_cfg = &cfg.parameters;
        let parameters = Parameters {
            dt: p_cfg.dt,
            eps: p_cfg.eps,
            g: p_cfg.g,
            seed,
        };

        // World: explicit bodies when listed, random ones otherwise
        let w_cfg = &cfg.world;
        let world = if cfg.bodies.is_empty() {
            World::new(w_cfg.bodies, w_cfg.width, w_cfg.height, engine.integrator, rng)?
        } else {
            let bodies = cfg
                .bodies
                .iter()
                .map(|bc| body_from_config(bc, engine.integrator, parameters.dt))
                .collect::<Result<Vec<Body>>>()?;
            info!("world: {} configured bodies on a {} x {} grid", bodies.len(), w_cfg.width, w_cfg.height);
            World::from_bodies(bodies, w_cfg.width, w_cfg.height)?
        };

        // Forces: register Newtonian gravity
        let forces = ForceSet::new().with(NewtonianGravity {
            g: parameters.g,
            eps: parameters.eps,
        });

        Ok(Self {
            engine,
            parameters,
            world,
            forces,
        })
    }

    /// Advance the world by one step with the configured strategy
    pub fn step(&mut self) -> Result<()> {
        step(&mut self.world, &self.forces, self.parameters.dt, self.engine.integrator)
    }

    /// Advance the world by `steps` steps, stopping at the first error
    pub fn run_steps(&mut self, steps: u64) -> Result<()> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// Switch strategy; bodies convert their motion state on the next step
    pub fn set_integrator(&mut self, integrator: IntegrationStrategy) {
        if integrator != self.engine.integrator {
            info!("integrator: {:?} -> {:?}", self.engine.integrator, integrator);
            self.engine.integrator = integrator;
        }
    }
}

/// Map a `BodyConfig` to a runtime `Body` for the given strategy
/// Verlet bodies start at `x - v dt` so `v` is their implied velocity
fn body_from_config(bc: &BodyConfig, strategy: IntegrationStrategy, dt: f64) -> Result<Body> {
    let x = NVec2::new(bc.x[0], bc.x[1]);
    let v = NVec2::new(bc.v[0], bc.v[1]);
    match strategy {
        IntegrationStrategy::Verlet => Body::with_previous(x, x - dt * v, bc.m),
        IntegrationStrategy::Euler => Body::with_velocity(x, v, bc.m),
    }
}
