//! High-level runtime engine settings
//!
//! Selects the integration strategy and frame cadence
//! used when running a `Scenario`

use std::time::Duration;

use crate::configuration::config::IntegrationStrategy;

#[derive(Debug, Clone)]
pub struct Engine {
    pub integrator: IntegrationStrategy, // verlet or euler
    pub frame_interval: Duration, // delay between terminal frames
}
