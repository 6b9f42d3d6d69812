use std::time::Instant;

use crate::configuration::config::{BodyGroupSpec, BoundaryPolicy, SimulationConfig};
use crate::simulation::engine::{RealTimeSimulation, Simulation};
use crate::simulation::forces::net_force;
use crate::simulation::states::{Body, BodyId};
use crate::simulation::vec2::Vec2;

/// Deterministic trig-scattered bodies, no rand needed.
fn scatter(n: usize) -> Vec<Body> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            Body {
                id: BodyId(i as u64),
                position: Vec2::new((i_f * 0.37).sin() * 5e9, (i_f * 0.13).cos() * 5e9),
                velocity: Vec2::zeros(),
                force: Vec2::zeros(),
                radius: 1e6,
                mass: 1e24,
            }
        })
        .collect()
}

/// Times one full O(n^2) force phase at increasing body counts.
pub fn bench_gravity() {
    let ns = [200, 400, 800, 1600, 3200];

    for n in ns {
        let bodies = scatter(n);
        let mut out = Vec::with_capacity(n);

        // Warm up
        out.extend(bodies.iter().map(|b| net_force(b, &bodies)));
        out.clear();

        let t0 = Instant::now();
        out.extend(bodies.iter().map(|b| net_force(b, &bodies)));
        let dt = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, force phase = {dt:8.6} s");
    }
}

/// Times full engine steps (forces + integration + boundary + merge) at
/// increasing body counts.
pub fn bench_step() {
    let ns = [200, 400, 800, 1600];
    let steps = 10;

    for n in ns {
        let config = SimulationConfig {
            boundary: 1e12,
            dt: 60.0,
            boundary_policy: BoundaryPolicy::Stop,
            seed: 42,
            initial_state: vec![BodyGroupSpec {
                n,
                x: 0.0,
                y: 0.0,
                position_jitter: 5e9,
                vx: 0.0,
                vy: 0.0,
                velocity_jitter: 1e3,
                radius: 1e6,
                radius_jitter: 0.0,
                mass: 1e24,
                mass_jitter: 0.0,
            }],
        };

        let mut sim = match RealTimeSimulation::new(config, steps + 1) {
            Ok(sim) => sim,
            Err(e) => {
                eprintln!("bench config rejected: {e}");
                return;
            }
        };

        // Warm up
        sim.step();

        let t0 = Instant::now();
        for _ in 0..steps {
            sim.step();
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!("N = {n:5}, step = {per_step:8.6} s");
    }
}
