//! 2D vector type used throughout the simulation.
//!
//! `Vec2` is an alias for `nalgebra::Vector2<f64>`; arithmetic, `norm()`,
//! and `metric_distance()` come from nalgebra. The one operation nalgebra
//! does not provide is the disc-uniform random offset used for initial
//! body jitter, added here as an extension trait.

use std::f64::consts::TAU;

use nalgebra::Vector2;
use rand::Rng;

use crate::error::SimulationError;

pub type Vec2 = Vector2<f64>;

/// Random displacement within a disc, used when scattering initial bodies.
pub trait RandomOffset {
    /// Returns this vector displaced by a random offset within `limit`
    /// meters, uniformly distributed over the disc area.
    ///
    /// The radius is sampled as `sqrt(U) * limit` (U uniform in `[0,1)`),
    /// not uniformly in radius: a uniform radius would cluster points near
    /// the center, while the sqrt transform gives uniform area density.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `limit` is negative. A zero limit returns the
    /// vector unchanged.
    fn random_offset<R: Rng>(self, limit: f64, rng: &mut R) -> Result<Vec2, SimulationError>;
}

impl RandomOffset for Vec2 {
    fn random_offset<R: Rng>(self, limit: f64, rng: &mut R) -> Result<Vec2, SimulationError> {
        if limit < 0.0 {
            return Err(SimulationError::invalid_argument(format!(
                "offset limit must be >= 0, got {limit}"
            )));
        }

        if limit == 0.0 {
            return Ok(self);
        }

        let angle = rng.gen_range(0.0..TAU);
        let distance = rng.gen::<f64>().sqrt() * limit;

        Ok(self + Vec2::new(angle.cos() * distance, angle.sin() * distance))
    }
}
