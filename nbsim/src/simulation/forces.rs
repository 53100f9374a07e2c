//! Force contributors for the n-body engine
//!
//! Defines the [`ForceLaw`] trait, the [`ForceSet`] that sums several laws,
//! and direct Newtonian gravity with an additive epsilon on the squared distance

use crate::simulation::states::{Body, NVec2, World};

/// Collection of force terms (gravity, drag, etc.)
/// Each term implements [`ForceLaw`] and their contributions are summed
/// into a single force vector per body
pub struct ForceSet {
    terms: Vec<Box<dyn ForceLaw + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: ForceLaw + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute net forces for all bodies in `world`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_forces(&self, world: &World, out: &mut [NVec2]) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        for term in &self.terms {
            term.force(world, out);
        }
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for force sources operating on a [`World`]
/// Implementations add their contribution into `out[i]` for each body
pub trait ForceLaw {
    fn force(&self, world: &World, out: &mut [NVec2]);
}

/// Newtonian gravity between point masses
/// `eps` is added to every squared separation so coincident bodies
/// produce a finite (zero) force instead of a division by zero
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub g: f64,   // gravitational constant, scaled for the grid
    pub eps: f64, // added to squared distance
}

impl NewtonianGravity {
    /// Force exerted on `bi` by `bj`
    pub fn pair_force(&self, bi: &Body, bj: &Body) -> NVec2 {
        // r points from i to j, so i is pulled along +r
        let r = bj.x - bi.x;

        // Squared distance with the singularity guard
        let d2 = r.dot(&r) + self.eps;

        // |F| = G m_i m_j / d2, the product is commutative so F(i,j) == -F(j,i) exactly
        let magnitude = self.g * (bi.mass() * bj.mass()) / d2;

        // Direction r / |r|
        magnitude * r / d2.sqrt()
    }
}

impl ForceLaw for NewtonianGravity {
    fn force(&self, world: &World, out: &mut [NVec2]) {
        let bodies = world.bodies();
        let n = bodies.len();

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            for j in (i + 1)..n {
                let f = self.pair_force(&bodies[i], &bodies[j]);

                // Equal and opposite
                out[i] += f;
                out[j] -= f;
            }
        }
    }
}
