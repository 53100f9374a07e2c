pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Body, Motion, World, NVec2, wrap_coord};
pub use simulation::forces::{ForceLaw, ForceSet, NewtonianGravity};
pub use simulation::integrator::{step, stepped};
pub use simulation::scenario::Scenario;

pub use configuration::config::{IntegrationStrategy, EngineConfig, ParametersConfig, WorldConfig, BodyConfig, ScenarioConfig};

pub use visualization::{ascii::AsciiFrame, terminal::run_terminal};

pub use benchmark::benchmark::bench_step;

pub use error::{Result, SimError};
