//! Core state types for the N-body simulation.
//!
//! - `Body`  a point mass on the grid, with either a previous position or a velocity
//! - `World` the fixed set of bodies sharing a toroidal `width` x `height` space
//!
//! The world also carries the current simulation time `t` and the number of steps taken.

use log::info;
use nalgebra::Vector2;
use rand::Rng;

use crate::configuration::config::IntegrationStrategy;
use crate::error::{Result, SimError};

pub type NVec2 = Vector2<f64>;

/// Largest accepted grid width or height, in cells
pub const MAX_EXTENT: f64 = 4096.0;

/// Motion state of a body, one variant per integration strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Previous(NVec2), // position one step ago (position-based / Verlet)
    Velocity(NVec2), // explicit velocity (velocity-based / Euler)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec2,        // position in grid units
    pub motion: Motion,  // previous position or velocity
    m: f64,              // mass, fixed at construction
}

impl Body {
    /// Create a body, rejecting non-positive or non-finite mass and non-finite state
    pub fn new(x: NVec2, m: f64, motion: Motion) -> Result<Self> {
        if !(m.is_finite() && m > 0.0) {
            return Err(SimError::InvalidConfiguration(format!(
                "body mass must be positive and finite, got {m}"
            )));
        }
        let body = Self { x, motion, m };
        if !body.is_finite() {
            return Err(SimError::InvalidConfiguration(format!(
                "body state must be finite, got {:?}",
                body
            )));
        }
        Ok(body)
    }

    pub fn with_velocity(x: NVec2, v: NVec2, m: f64) -> Result<Self> {
        Self::new(x, m, Motion::Velocity(v))
    }

    pub fn with_previous(x: NVec2, previous: NVec2, m: f64) -> Result<Self> {
        Self::new(x, m, Motion::Previous(previous))
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    /// Velocity implied by the motion state; `dt` is only used for `Motion::Previous`
    pub fn velocity(&self, dt: f64) -> NVec2 {
        match self.motion {
            Motion::Velocity(v) => v,
            Motion::Previous(p) => (self.x - p) / dt,
        }
    }

    /// Position one step of size `dt` ago; `dt` is only used for `Motion::Velocity`
    pub fn previous(&self, dt: f64) -> NVec2 {
        match self.motion {
            Motion::Previous(p) => p,
            Motion::Velocity(v) => self.x - dt * v,
        }
    }

    pub fn is_finite(&self) -> bool {
        let state = match self.motion {
            Motion::Previous(p) => p,
            Motion::Velocity(v) => v,
        };
        self.x.iter().chain(state.iter()).all(|c| c.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct World {
    bodies: Vec<Body>, // fixed-size set of bodies
    width: f64,        // grid width, x wraps modulo this
    height: f64,       // grid height, y wraps modulo this
    pub t: f64,        // simulation time
    pub steps: u64,    // steps taken so far
}

impl World {
    /// Build `n` random bodies in the central region of a `width` x `height` grid.
    ///
    /// Positions are drawn from `[0.3, 0.7]` of each extent and masses from `[1, 4]`.
    /// Verlet bodies get a previous position offset in `[-1, 1]` per axis, Euler bodies
    /// a velocity in `[-2, 2]` per axis.
    pub fn new<R: Rng>(
        n: usize,
        width: f64,
        height: f64,
        strategy: IntegrationStrategy,
        rng: &mut R,
    ) -> Result<Self> {
        check_extents(n, width, height)?;

        let mut bodies = Vec::with_capacity(n);
        for _ in 0..n {
            let x = NVec2::new(
                rng.random_range(width * 0.3..=width * 0.7),
                rng.random_range(height * 0.3..=height * 0.7),
            );
            let m = rng.random_range(1.0..=4.0);
            let motion = match strategy {
                IntegrationStrategy::Verlet => {
                    let offset = NVec2::new(
                        rng.random_range(-1.0..=1.0),
                        rng.random_range(-1.0..=1.0),
                    );
                    Motion::Previous(x - offset)
                }
                IntegrationStrategy::Euler => Motion::Velocity(NVec2::new(
                    rng.random_range(-2.0..=2.0),
                    rng.random_range(-2.0..=2.0),
                )),
            };
            bodies.push(Body::new(x, m, motion)?);
        }

        info!("world: {n} random bodies on a {width} x {height} grid ({strategy:?})");
        Ok(Self { bodies, width, height, t: 0.0, steps: 0 })
    }

    /// Build a world from explicit bodies, wrapping their positions into the grid
    pub fn from_bodies(bodies: Vec<Body>, width: f64, height: f64) -> Result<Self> {
        check_extents(bodies.len(), width, height)?;

        let mut world = Self { bodies, width, height, t: 0.0, steps: 0 };
        for i in 0..world.bodies.len() {
            let b = &world.bodies[i];
            let wrapped = world.wrap(b.x);
            let shift = wrapped - b.x;
            let motion = match b.motion {
                Motion::Previous(p) => Motion::Previous(p + shift),
                v => v,
            };
            world.bodies[i].x = wrapped;
            world.bodies[i].motion = motion;
        }
        Ok(world)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn replace_bodies(&mut self, bodies: Vec<Body>) {
        debug_assert_eq!(bodies.len(), self.bodies.len());
        self.bodies = bodies;
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Reduce a position onto the torus
    pub fn wrap(&self, x: NVec2) -> NVec2 {
        NVec2::new(wrap_coord(x.x, self.width), wrap_coord(x.y, self.height))
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.m).sum()
    }

    /// Mass-weighted mean position (ignores wrap-around)
    pub fn center_of_mass(&self) -> NVec2 {
        let weighted = self
            .bodies
            .iter()
            .fold(NVec2::zeros(), |acc, b| acc + b.m * b.x);
        weighted / self.total_mass()
    }
}

/// Non-negative modulo: the result always lies in `[0, extent)`
pub fn wrap_coord(v: f64, extent: f64) -> f64 {
    let r = v.rem_euclid(extent);
    // rem_euclid rounds tiny negative inputs up to `extent` itself
    if r >= extent { 0.0 } else { r }
}

fn check_extents(n: usize, width: f64, height: f64) -> Result<()> {
    if n == 0 {
        return Err(SimError::InvalidConfiguration("world needs at least one body".into()));
    }
    if !(width.is_finite() && width > 0.0 && width <= MAX_EXTENT) {
        return Err(SimError::InvalidConfiguration(format!(
            "width must be in (0, {MAX_EXTENT}], got {width}"
        )));
    }
    if !(height.is_finite() && height > 0.0 && height <= MAX_EXTENT) {
        return Err(SimError::InvalidConfiguration(format!(
            "height must be in (0, {MAX_EXTENT}], got {height}"
        )));
    }
    Ok(())
}
