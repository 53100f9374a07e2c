//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - integration step size,
//! - singularity guard and gravitational constant (`eps`, `g`),
//! - the random seed used to build the world

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64, // step size
    pub eps: f64, // added to squared distances
    pub g: f64, // gravitational constant
    pub seed: u64, // seed actually used for world construction
}
