//! Core state types for the n-body simulation.
//!
//! Defines the immutable value types that make up a simulation state:
//! - `BodyId` — stable identity of one body across steps
//! - `Body` — one body's physical state at an instant
//! - `SimulationFrame` — all bodies at one instant
//!
//! Bodies are never mutated in place: every step produces fresh `Body`
//! values and a fresh frame, so a reader holding a frame is guaranteed it
//! never changes underneath them.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::simulation::vec2::Vec2;

/// Stable identifier of a simulated body.
///
/// Assigned once at creation and carried across steps; a body's id
/// disappears from the frame only when it is merged into another body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body-{}", self.0)
    }
}

/// Snapshot of one body's physical state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    /// Distance from the origin in meters.
    pub position: Vec2,
    /// Velocity in meters per second.
    pub velocity: Vec2,
    /// Net force in Newtons, as of the last force phase.
    pub force: Vec2,
    /// Physical radius in meters.
    pub radius: f64,
    /// Mass in kilograms.
    pub mass: f64,
}

impl Body {
    /// Returns this body with the given net force.
    #[must_use]
    pub fn with_force(self, force: Vec2) -> Self {
        Self { force, ..self }
    }

    /// Returns this body with the given position.
    #[must_use]
    pub fn with_position(self, position: Vec2) -> Self {
        Self { position, ..self }
    }

    /// Returns this body with the given velocity.
    #[must_use]
    pub fn with_velocity(self, velocity: Vec2) -> Self {
        Self { velocity, ..self }
    }

    /// Integrates velocity from the stored force: `v' = v + f/m * dt`.
    ///
    /// Forces were computed at the start of the step, so this is the first
    /// half of a symplectic Euler update.
    #[must_use]
    pub fn updated_velocity(self, dt: f64) -> Self {
        let velocity = self.velocity + self.force / self.mass * dt;
        Self { velocity, ..self }
    }

    /// Integrates position from the current velocity: `x' = x + v * dt`.
    ///
    /// Must be called after [`Body::updated_velocity`] so the position
    /// advances with the new velocity (symplectic Euler ordering).
    #[must_use]
    pub fn updated_position(self, dt: f64) -> Self {
        let position = self.position + self.velocity * dt;
        Self { position, ..self }
    }

    /// True when the discs of the two bodies touch or intersect.
    #[must_use]
    pub fn overlaps_with(&self, other: &Body) -> bool {
        self.position.metric_distance(&other.position) <= self.radius + other.radius
    }

    /// Disc area in square meters.
    #[must_use]
    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }
}

/// Ordered, read-only collection of bodies captured at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationFrame {
    bodies: Vec<Body>,
}

impl SimulationFrame {
    #[must_use]
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies }
    }

    #[must_use]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Largest net force magnitude acting on any body, in Newtons.
    #[must_use]
    pub fn max_force_magnitude(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| b.force.norm())
            .fold(0.0, f64::max)
    }

    /// Largest velocity magnitude of any body, in meters per second.
    #[must_use]
    pub fn max_velocity_magnitude(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| b.velocity.norm())
            .fold(0.0, f64::max)
    }

    /// Finds the body with the given id, if it is present in this frame.
    #[must_use]
    pub fn find_by_id(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }
}
