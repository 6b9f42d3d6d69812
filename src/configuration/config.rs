//! Configuration types describing a simulation scenario.
//!
//! This module defines a thin, `serde`-(de)serializable representation of
//! a scenario. A scenario consists of:
//!
//! - [`BoundaryPolicy`] – what happens to bodies that leave the universe
//! - [`BodyGroupSpec`]  – `n` near-identical bodies plus per-instance jitter
//! - [`SimulationConfig`] – top-level wrapper handed to the engine
//!
//! The core does not read configuration files itself; the host loads or
//! builds a `SimulationConfig` and passes it in. A YAML document matching
//! these types would look like:
//!
//! ```yaml
//! boundary: 4.0e9          # universe radius in meters
//! dt: 60.0                 # simulated seconds per step
//! boundary_policy: "stop"  # none | stop | stick | wrap
//! seed: 42                 # jitter RNG seed
//!
//! initial_state:
//!   - n: 500
//!     x: 0.0
//!     y: 0.0
//!     position_jitter: 2.0e9
//!     vx: 0.0
//!     vy: 0.0
//!     velocity_jitter: 1.0e3
//!     radius: 1.0e7
//!     radius_jitter: 0.0
//!     mass: 1.0e24
//!     mass_jitter: 1.0e23
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Behavior applied to a body whose distance from the origin exceeds the
/// universe boundary radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Bodies may leave the universe permanently.
    #[default]
    #[serde(rename = "none")]
    None,

    /// Clamp to the boundary and zero the velocity.
    #[serde(rename = "stop")]
    Stop,

    /// Clamp to the boundary and freeze the body there: it stays visible
    /// in frames but is excluded from all further force and position
    /// updates.
    #[serde(rename = "stick")]
    Stick,

    /// Teleport to the diametrically opposite edge, keeping velocity.
    #[serde(rename = "wrap")]
    Wrap,
}

/// Initial state for a group of `n` near-identical bodies.
///
/// Each instance starts from the base values below with independent random
/// jitter applied at creation: position and velocity are displaced within
/// a disc of the given jitter radius, while radius and mass are perturbed
/// uniformly within `(-jitter, +jitter)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyGroupSpec {
    /// Number of bodies created from this group.
    pub n: usize,

    /// Initial x-distance from the origin (meters).
    pub x: f64,

    /// Initial y-distance from the origin (meters).
    pub y: f64,

    /// Maximum displacement from the base position (meters).
    #[serde(default)]
    pub position_jitter: f64,

    /// Initial x-velocity (meters per second).
    pub vx: f64,

    /// Initial y-velocity (meters per second).
    pub vy: f64,

    /// Maximum displacement from the base velocity (meters per second).
    #[serde(default)]
    pub velocity_jitter: f64,

    /// Physical radius of each body (meters).
    pub radius: f64,

    /// Maximum perturbation of the radius (meters); must stay below the
    /// base radius so radii remain non-negative.
    #[serde(default)]
    pub radius_jitter: f64,

    /// Mass of each body (kilograms).
    pub mass: f64,

    /// Maximum perturbation of the mass (kilograms); must stay below the
    /// base mass so masses remain positive.
    #[serde(default)]
    pub mass_jitter: f64,
}

impl BodyGroupSpec {
    fn validate(&self, index: usize) -> Result<(), SimulationError> {
        if self.mass <= 0.0 {
            return Err(SimulationError::invalid_argument(format!(
                "group {index}: mass must be > 0, got {}",
                self.mass
            )));
        }
        if self.radius < 0.0 {
            return Err(SimulationError::invalid_argument(format!(
                "group {index}: radius must be >= 0, got {}",
                self.radius
            )));
        }
        if self.position_jitter < 0.0 || self.velocity_jitter < 0.0 {
            return Err(SimulationError::invalid_argument(format!(
                "group {index}: jitter must be >= 0"
            )));
        }
        if self.radius_jitter != 0.0 && self.radius_jitter.abs() >= self.radius {
            return Err(SimulationError::invalid_argument(format!(
                "group {index}: radius jitter {} must be less than radius {}",
                self.radius_jitter, self.radius
            )));
        }
        if self.mass_jitter != 0.0 && self.mass_jitter.abs() >= self.mass {
            return Err(SimulationError::invalid_argument(format!(
                "group {index}: mass jitter {} must be less than mass {}",
                self.mass_jitter, self.mass
            )));
        }
        Ok(())
    }
}

/// Top-level configuration for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// The edge of this simulation's universe: maximum distance from the
    /// origin (meters) before [`BoundaryPolicy`] applies.
    pub boundary: f64,

    /// The amount of simulated time between steps (seconds).
    pub dt: f64,

    #[serde(default)]
    pub boundary_policy: BoundaryPolicy,

    /// Seed for the jitter RNG; the same seed reproduces the same initial
    /// bodies in a fresh engine.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Body groups making up the initial state, in creation order.
    pub initial_state: Vec<BodyGroupSpec>,
}

fn default_seed() -> u64 {
    42
}

impl SimulationConfig {
    /// Checks every input contract that would otherwise surface as a NaN
    /// or infinite value mid-simulation.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` on a non-positive `dt` or `boundary`, or any group
    /// with non-positive mass, negative radius or jitter, or a radius/mass
    /// jitter at least as large as its base value.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.dt <= 0.0 {
            return Err(SimulationError::invalid_argument(format!(
                "dt must be > 0, got {}",
                self.dt
            )));
        }
        if self.boundary <= 0.0 {
            return Err(SimulationError::invalid_argument(format!(
                "boundary must be > 0, got {}",
                self.boundary
            )));
        }
        for (index, group) in self.initial_state.iter().enumerate() {
            group.validate(index)?;
        }
        Ok(())
    }

    /// Total number of bodies described by the initial state.
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.initial_state.iter().map(|g| g.n).sum()
    }
}
