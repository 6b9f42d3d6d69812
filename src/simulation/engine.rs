//! Brute-force 2-dimensional Newtonian gravity n-body simulation.
//!
//! [`Simulation`] is the read/advance contract shared by the real-time
//! engine and the replay engine; viewers and recorders only ever talk to
//! this trait. [`RealTimeSimulation`] owns the current body set and runs
//! the four step phases: forces, integration, boundary policy, merging.

use std::collections::{HashMap, HashSet};

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::{BoundaryPolicy, SimulationConfig};
use crate::error::SimulationError;
use crate::simulation::forces::net_force;
use crate::simulation::history::BoundedHistory;
use crate::simulation::replay::Recording;
use crate::simulation::states::{Body, BodyId, SimulationFrame};
use crate::simulation::vec2::{RandomOffset, Vec2};

/// Read/advance contract exposed to viewers, recorders, and drivers.
///
/// A single producer calls [`step`](Simulation::step) at a cadence of its
/// choosing; any number of consumers query frames and history. Each step
/// is a short synchronous computation, so stopping the driver is the only
/// cancellation mechanism needed.
pub trait Simulation {
    /// Restores the initial state described by the configuration.
    fn reset(&mut self);

    /// Advances the simulation by one time step.
    fn step(&mut self);

    /// The most recent frame.
    fn current_frame(&self) -> SimulationFrame;

    /// Groups the bodies of the last `n` frames by id, in frame order.
    /// Consumed by renderers to draw per-body trails.
    fn history(&self, n: usize) -> HashMap<BodyId, Vec<Body>>;

    /// Simulated seconds elapsed since the start (or last reset).
    fn time_elapsed(&self) -> f64;

    /// The universe boundary radius in meters.
    fn boundary(&self) -> f64;

    /// The body in the current frame closest to `point`, used for
    /// click-selection in viewers.
    ///
    /// # Errors
    ///
    /// `EmptyState` when the current frame has no bodies.
    fn nearest_body(&self, point: Vec2) -> Result<Body, SimulationError> {
        self.current_frame()
            .bodies()
            .iter()
            .min_by(|a, b| {
                point
                    .metric_distance(&a.position)
                    .total_cmp(&point.metric_distance(&b.position))
            })
            .copied()
            .ok_or_else(|| SimulationError::empty_state("no bodies in current frame"))
    }
}

/// N-body engine that computes physics in real time.
pub struct RealTimeSimulation {
    config: SimulationConfig,
    /// The engine owns the current frame by value; history holds copies.
    current: SimulationFrame,
    frames: BoundedHistory<SimulationFrame>,
    /// Ids frozen at the boundary under [`BoundaryPolicy::Stick`].
    inactive: HashSet<BodyId>,
    time_elapsed: f64,
    rng: SmallRng,
    next_id: u64,
}

impl RealTimeSimulation {
    /// Builds an engine from a validated configuration, generating the
    /// initial bodies and publishing frame zero into a history of
    /// `history_length` frames.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the configuration fails validation; see
    /// [`SimulationConfig::validate`].
    pub fn new(
        config: SimulationConfig,
        history_length: usize,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let rng = SmallRng::seed_from_u64(config.seed);
        let mut sim = Self {
            frames: BoundedHistory::new(history_length),
            current: SimulationFrame::new(Vec::new()),
            inactive: HashSet::new(),
            time_elapsed: 0.0,
            rng,
            next_id: 0,
            config,
        };
        sim.rebuild()?;
        Ok(sim)
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Snapshots the frame history plus the originating configuration so a
    /// host persistence layer can serialize it and later replay it.
    #[must_use]
    pub fn record(&self) -> Recording {
        Recording {
            frames: self.frames.snapshot(),
            config: self.config.clone(),
        }
    }

    fn rebuild(&mut self) -> Result<(), SimulationError> {
        let mut bodies = Vec::with_capacity(self.config.body_count());

        let groups = self.config.initial_state.clone();
        for group in &groups {
            for _ in 0..group.n {
                let position = Vec2::new(group.x, group.y)
                    .random_offset(group.position_jitter, &mut self.rng)?;
                let velocity = Vec2::new(group.vx, group.vy)
                    .random_offset(group.velocity_jitter, &mut self.rng)?;

                bodies.push(Body {
                    id: self.allocate_id(),
                    position,
                    velocity,
                    force: Vec2::zeros(),
                    radius: self.jittered(group.radius, group.radius_jitter),
                    mass: self.jittered(group.mass, group.mass_jitter),
                });
            }
        }

        info!("initialized {} bodies", bodies.len());

        self.inactive.clear();
        self.time_elapsed = 0.0;
        self.current = SimulationFrame::new(bodies);
        self.frames.clear();
        self.frames.add(self.current.clone());
        Ok(())
    }

    fn allocate_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Perturbs a scalar uniformly within `(-jitter, +jitter)`. Validation
    /// has already ensured `|jitter| < value`, so the result keeps the
    /// sign of `value`.
    fn jittered(&mut self, value: f64, jitter: f64) -> f64 {
        if jitter == 0.0 {
            return value;
        }
        value + self.rng.gen_range(-jitter.abs()..jitter.abs())
    }

    /// Clamps or teleports a body that has left the universe, per the
    /// configured [`BoundaryPolicy`].
    fn apply_boundary(&mut self, body: Body) -> Body {
        let boundary = self.config.boundary;
        let from_origin = body.position.norm();
        if from_origin <= boundary {
            return body;
        }

        // from_origin > boundary > 0, so dividing by it is safe.
        let radial = body.position / from_origin;
        match self.config.boundary_policy {
            BoundaryPolicy::None => body,
            BoundaryPolicy::Stop => body
                .with_position(radial * boundary)
                .with_velocity(Vec2::zeros()),
            BoundaryPolicy::Stick => {
                self.inactive.insert(body.id);
                body.with_position(radial * boundary)
            }
            BoundaryPolicy::Wrap => body.with_position(radial * -boundary),
        }
    }

    /// Greedy single-pass merge of overlapping bodies, in frame order.
    ///
    /// Later bodies fold into the first unconsumed body they overlap:
    /// masses add, position and velocity become the mass-weighted means
    /// (a perfectly inelastic collision), and the survivor keeps its id.
    /// Overlap is tested against the survivor's pre-merge position, so a
    /// merge result is not re-checked against third bodies within the same
    /// step, and the outcome depends on frame order. Frozen bodies neither
    /// consume nor get consumed.
    fn merge_overlapping(&self, bodies: Vec<Body>) -> Vec<Body> {
        let mut result = Vec::with_capacity(bodies.len());
        let mut consumed: HashSet<BodyId> = HashSet::new();

        for (i, body) in bodies.iter().enumerate() {
            if consumed.contains(&body.id) {
                continue;
            }
            if self.inactive.contains(&body.id) {
                result.push(*body);
                continue;
            }

            let mut total_mass = body.mass;
            let mut weighted_position = body.position * body.mass;
            let mut weighted_velocity = body.velocity * body.mass;

            for other in &bodies[i + 1..] {
                if consumed.contains(&other.id) || self.inactive.contains(&other.id) {
                    continue;
                }
                if body.overlaps_with(other) {
                    total_mass += other.mass;
                    weighted_position += other.position * other.mass;
                    weighted_velocity += other.velocity * other.mass;
                    consumed.insert(other.id);
                }
            }

            result.push(Body {
                position: weighted_position / total_mass,
                velocity: weighted_velocity / total_mass,
                mass: total_mass,
                ..*body
            });
        }

        result
    }
}

impl Simulation for RealTimeSimulation {
    fn reset(&mut self) {
        // Jitter limits were validated in `new`, so rebuilding cannot fail.
        self.rebuild()
            .expect("configuration was validated at construction");
    }

    fn step(&mut self) {
        let dt = self.config.dt;

        // Phase 1 reads this immutable snapshot of the previous frame, so
        // no force ever sees a partially-integrated position.
        let previous = self.current.bodies().to_vec();
        let active: Vec<Body> = previous
            .iter()
            .filter(|b| !self.inactive.contains(&b.id))
            .copied()
            .collect();

        let mut updated = Vec::with_capacity(previous.len());
        for body in &previous {
            if self.inactive.contains(&body.id) {
                // Frozen at the boundary; stays visible, never moves.
                updated.push(*body);
                continue;
            }

            let body = body
                .with_force(net_force(body, &active))
                .updated_velocity(dt)
                .updated_position(dt);
            updated.push(self.apply_boundary(body));
        }

        let merged = self.merge_overlapping(updated);
        if merged.len() < previous.len() {
            debug!(
                "merged {} bodies at t={}",
                previous.len() - merged.len(),
                self.time_elapsed
            );
        }

        self.current = SimulationFrame::new(merged);
        self.frames.add(self.current.clone());
        self.time_elapsed += dt;
    }

    fn current_frame(&self) -> SimulationFrame {
        self.current.clone()
    }

    fn history(&self, n: usize) -> HashMap<BodyId, Vec<Body>> {
        let mut trails: HashMap<BodyId, Vec<Body>> = HashMap::new();
        for frame in self.frames.tail(n) {
            for body in frame.bodies() {
                trails.entry(body.id).or_default().push(*body);
            }
        }
        trails
    }

    fn time_elapsed(&self) -> f64 {
        self.time_elapsed
    }

    fn boundary(&self) -> f64 {
        self.config.boundary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::config::BodyGroupSpec;

    fn two_body_config() -> SimulationConfig {
        SimulationConfig {
            boundary: 1e12,
            dt: 1.0,
            boundary_policy: BoundaryPolicy::None,
            seed: 42,
            initial_state: vec![
                BodyGroupSpec {
                    n: 1,
                    x: 0.0,
                    y: 0.0,
                    position_jitter: 0.0,
                    vx: 0.0,
                    vy: 0.0,
                    velocity_jitter: 0.0,
                    radius: 0.0,
                    radius_jitter: 0.0,
                    mass: 1e24,
                    mass_jitter: 0.0,
                },
                BodyGroupSpec {
                    n: 1,
                    x: 1e6,
                    y: 0.0,
                    position_jitter: 0.0,
                    vx: 0.0,
                    vy: 0.0,
                    velocity_jitter: 0.0,
                    radius: 0.0,
                    radius_jitter: 0.0,
                    mass: 1e24,
                    mass_jitter: 0.0,
                },
            ],
        }
    }

    #[test]
    fn ids_are_stable_across_steps() {
        let mut sim = RealTimeSimulation::new(two_body_config(), 16).unwrap();
        let ids: Vec<BodyId> = sim.current_frame().bodies().iter().map(|b| b.id).collect();

        sim.step();
        sim.step();

        let after: Vec<BodyId> = sim.current_frame().bodies().iter().map(|b| b.id).collect();
        assert_eq!(ids, after);
    }

    #[test]
    fn reset_restores_time_and_count() {
        let mut sim = RealTimeSimulation::new(two_body_config(), 16).unwrap();
        for _ in 0..5 {
            sim.step();
        }
        assert!((sim.time_elapsed() - 5.0).abs() < 1e-12);

        sim.reset();
        assert_eq!(sim.time_elapsed(), 0.0);
        assert_eq!(sim.current_frame().len(), 2);
    }

    #[test]
    fn same_seed_reproduces_initial_positions() {
        let mut cfg = two_body_config();
        cfg.initial_state[0].position_jitter = 1e5;
        cfg.initial_state[1].position_jitter = 1e5;

        let a = RealTimeSimulation::new(cfg.clone(), 4).unwrap();
        let b = RealTimeSimulation::new(cfg, 4).unwrap();
        assert_eq!(a.current_frame(), b.current_frame());
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let mut cfg = two_body_config();
        cfg.initial_state[0].mass = -1.0;
        assert!(matches!(
            RealTimeSimulation::new(cfg, 4),
            Err(SimulationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn history_groups_by_id() {
        let mut sim = RealTimeSimulation::new(two_body_config(), 16).unwrap();
        for _ in 0..3 {
            sim.step();
        }

        let trails = sim.history(4);
        assert_eq!(trails.len(), 2);
        for trail in trails.values() {
            assert_eq!(trail.len(), 4); // frame 0 plus three steps
        }
    }
}
