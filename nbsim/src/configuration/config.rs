//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integration strategy and frame cadence
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`WorldConfig`]      – body count and grid size
//! - [`BodyConfig`]       – optional explicit initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every field has a default, so an empty document is a valid scenario.
//!
//! # YAML format
//! An example scenario matching these types:
//!
//! ```yaml
//! engine:
//!   integrator: "verlet"    # or "euler"
//!   frame_ms: 50            # delay between frames in the terminal
//!
//! parameters:
//!   dt: 0.01                # fixed step size
//!   eps: 1.0e-9             # added to squared distances
//!   G: 100.0                # gravitational constant, scaled for the grid
//!   seed: 42                # omit for a random seed
//!
//! world:
//!   bodies: 3               # ignored when `bodies` below is given
//!   width: 80.0
//!   height: 24.0
//!
//! bodies:
//!   - x: [ 40.0, 12.0 ]
//!     v: [  0.0,  0.0 ]
//!     m: 2.0
//!   - x: [ 42.0, 12.0 ]
//!     m: 2.0
//! ```

use std::io::Read;

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::{Result, SimError};
use crate::simulation::states::MAX_EXTENT;

/// Numerical scheme used to advance positions
/// `integrator: "verlet"` or `integrator: "euler"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum IntegrationStrategy {
    #[default]
    #[serde(rename = "verlet")] // Position Verlet, keeps the previous position instead of a velocity
    Verlet,

    #[serde(rename = "euler")] // Explicit Euler, keeps an explicit velocity
    Euler,
}

/// Engine configuration: how the simulation is advanced and shown
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub integrator: IntegrationStrategy, // Scheme used by every step
    pub frame_ms: u64, // Delay between terminal frames, also the key polling timeout
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            integrator: IntegrationStrategy::Verlet,
            frame_ms: 50,
        }
    }
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub dt: f64,  // time step size
    pub eps: f64, // added to every squared separation
    #[serde(rename = "G")]
    pub g: f64,   // gravitational constant
    pub seed: Option<u64>, // deterministic seed, random when absent
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,
            eps: 1e-9,
            g: 100.0,
            seed: None,
        }
    }
}

/// Size of the toroidal world
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub bodies: usize, // number of random bodies
    pub width: f64,    // grid width in cells
    pub height: f64,   // grid height in cells
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            bodies: 3,
            width: 80.0,
            height: 24.0,
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // Initial position in grid cells
    #[serde(default)]
    pub v: [f64; 2], // Initial velocity in cells per time unit
    pub m: f64,      // Mass of the body
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // Integration strategy and frame cadence
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    pub world: WorldConfig, // Grid size and random body count
    pub bodies: Vec<BodyConfig>, // Explicit bodies, replaces random construction when non-empty
}

impl ScenarioConfig {
    /// Parse a scenario from a YAML reader
    pub fn from_yaml_reader<R: Read>(reader: R) -> Result<Self> {
        let cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
        Ok(cfg)
    }

    /// Parse a scenario from a YAML string
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let cfg: ScenarioConfig = serde_yaml::from_str(s)?;
        Ok(cfg)
    }

    /// Number of bodies the scenario will create
    pub fn body_count(&self) -> usize {
        if self.bodies.is_empty() {
            self.world.bodies
        } else {
            self.bodies.len()
        }
    }

    /// Override the random body count
    /// An explicit `bodies` list fixes N, so a different count is rejected
    pub fn set_body_count(&mut self, n: usize) -> Result<()> {
        if !self.bodies.is_empty() && n != self.bodies.len() {
            return invalid(format!(
                "scenario lists {} bodies explicitly, cannot use {n}",
                self.bodies.len()
            ));
        }
        self.world.bodies = n;
        Ok(())
    }

    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> Result<()> {
        let p = &self.parameters;
        let w = &self.world;

        if self.body_count() == 0 {
            return invalid("body count must be at least 1".into());
        }
        if !(w.width.is_finite() && w.width > 0.0 && w.width <= MAX_EXTENT) {
            return invalid(format!("width must be in (0, {MAX_EXTENT}], got {}", w.width));
        }
        if !(w.height.is_finite() && w.height > 0.0 && w.height <= MAX_EXTENT) {
            return invalid(format!("height must be in (0, {MAX_EXTENT}], got {}", w.height));
        }
        if !(p.dt.is_finite() && p.dt > 0.0) {
            return invalid(format!("dt must be positive, got {}", p.dt));
        }
        if !(p.eps.is_finite() && p.eps > 0.0) {
            return invalid(format!("eps must be positive, got {}", p.eps));
        }
        if !p.g.is_finite() {
            return invalid(format!("G must be finite, got {}", p.g));
        }
        for (i, b) in self.bodies.iter().enumerate() {
            if !(b.m.is_finite() && b.m > 0.0) {
                return invalid(format!("body {i}: mass must be positive, got {}", b.m));
            }
        }
        Ok(())
    }
}

fn invalid(msg: String) -> Result<()> {
    Err(SimError::InvalidConfiguration(msg))
}
