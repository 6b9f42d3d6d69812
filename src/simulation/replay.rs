//! Replay of a previously recorded simulation.
//!
//! A [`Recording`] pairs a frame sequence with the configuration that
//! produced it; this pair is the unit a host persistence layer serializes
//! (in whatever format it chooses) and hands back to build a
//! [`ReplaySimulation`], which walks the frames without recomputing any
//! physics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::configuration::config::SimulationConfig;
use crate::error::SimulationError;
use crate::simulation::engine::Simulation;
use crate::simulation::states::{Body, BodyId, SimulationFrame};

/// A recorded run: every published frame plus the originating config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub frames: Vec<SimulationFrame>,
    pub config: SimulationConfig,
}

/// Replays a [`Recording`] behind the same [`Simulation`] contract the
/// real-time engine exposes.
pub struct ReplaySimulation {
    recording: Recording,
    cursor: usize,
}

impl ReplaySimulation {
    /// # Errors
    ///
    /// `EmptyState` when the recording contains no frames.
    pub fn new(recording: Recording) -> Result<Self, SimulationError> {
        if recording.frames.is_empty() {
            return Err(SimulationError::empty_state("recording has no frames"));
        }
        Ok(Self {
            recording,
            cursor: 0,
        })
    }

    /// Index of the frame currently shown.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total number of recorded frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.recording.frames.len()
    }
}

impl Simulation for ReplaySimulation {
    fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Advances the cursor by one frame, clamping at the last frame rather
    /// than wrapping around: wrapping would silently restart the time
    /// axis, so a finished replay simply holds its final frame.
    fn step(&mut self) {
        self.cursor = (self.cursor + 1).min(self.recording.frames.len() - 1);
    }

    fn current_frame(&self) -> SimulationFrame {
        self.recording.frames[self.cursor].clone()
    }

    fn history(&self, n: usize) -> HashMap<BodyId, Vec<Body>> {
        // Same window as the real-time engine: the last n frames up to and
        // including the cursor.
        let start = (self.cursor + 1).saturating_sub(n);
        let mut trails: HashMap<BodyId, Vec<Body>> = HashMap::new();
        for frame in &self.recording.frames[start..=self.cursor] {
            for body in frame.bodies() {
                trails.entry(body.id).or_default().push(*body);
            }
        }
        trails
    }

    fn time_elapsed(&self) -> f64 {
        self.cursor as f64 * self.recording.config.dt
    }

    fn boundary(&self) -> f64 {
        self.recording.config.boundary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::config::{BodyGroupSpec, BoundaryPolicy};
    use crate::simulation::vec2::Vec2;

    fn recording(frame_count: usize) -> Recording {
        let frames = (0..frame_count)
            .map(|i| {
                SimulationFrame::new(vec![Body {
                    id: BodyId(0),
                    position: Vec2::new(i as f64, 0.0),
                    velocity: Vec2::zeros(),
                    force: Vec2::zeros(),
                    radius: 1.0,
                    mass: 1.0,
                }])
            })
            .collect();

        Recording {
            frames,
            config: SimulationConfig {
                boundary: 100.0,
                dt: 2.0,
                boundary_policy: BoundaryPolicy::None,
                seed: 42,
                initial_state: vec![BodyGroupSpec {
                    n: 1,
                    x: 0.0,
                    y: 0.0,
                    position_jitter: 0.0,
                    vx: 0.0,
                    vy: 0.0,
                    velocity_jitter: 0.0,
                    radius: 1.0,
                    radius_jitter: 0.0,
                    mass: 1.0,
                    mass_jitter: 0.0,
                }],
            },
        }
    }

    #[test]
    fn empty_recording_is_rejected() {
        let mut rec = recording(1);
        rec.frames.clear();
        assert!(matches!(
            ReplaySimulation::new(rec),
            Err(SimulationError::EmptyState(_))
        ));
    }

    #[test]
    fn cursor_clamps_at_last_frame() {
        let mut replay = ReplaySimulation::new(recording(3)).unwrap();

        replay.step();
        replay.step();
        assert_eq!(replay.cursor(), 2);

        // Stepping past the end holds the final frame.
        replay.step();
        assert_eq!(replay.cursor(), 2);
        assert!((replay.current_frame().bodies()[0].position.x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn time_elapsed_tracks_cursor_and_dt() {
        let mut replay = ReplaySimulation::new(recording(5)).unwrap();
        replay.step();
        replay.step();
        assert!((replay.time_elapsed() - 4.0).abs() < 1e-12);

        replay.reset();
        assert_eq!(replay.cursor(), 0);
        assert_eq!(replay.time_elapsed(), 0.0);
    }

    #[test]
    fn history_returns_last_n_frames_up_to_cursor() {
        let mut replay = ReplaySimulation::new(recording(5)).unwrap();
        replay.step();
        replay.step();
        replay.step(); // cursor = 3

        let trails = replay.history(2);
        let trail = &trails[&BodyId(0)];
        assert_eq!(trail.len(), 2); // frames 2..=3
        assert!((trail[0].position.x - 2.0).abs() < 1e-12);
        assert!((trail[1].position.x - 3.0).abs() < 1e-12);

        // A window larger than the recording returns everything so far.
        let trails = replay.history(100);
        assert_eq!(trails[&BodyId(0)].len(), 4); // frames 0..=3
    }
}
