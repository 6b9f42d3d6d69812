use nbody2d::{
    BodyGroupSpec, BoundaryPolicy, RealTimeSimulation, Simulation, SimulationConfig,
};

use anyhow::{bail, Result};
use clap::Parser;
use log::info;

/// Headless driver: builds a two-cluster scenario and steps it, printing a
/// summary at the end. Rendering and recording live outside this crate.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Bodies per cluster
    #[arg(short = 'n', long, default_value_t = 250)]
    bodies: usize,

    /// Number of simulation steps to run
    #[arg(short, long, default_value_t = 1000)]
    steps: usize,

    /// Simulated seconds per step
    #[arg(long, default_value_t = 60.0)]
    dt: f64,

    /// Universe boundary radius in meters
    #[arg(long, default_value_t = 4.0e9)]
    boundary: f64,

    /// Boundary policy: none, stop, stick, or wrap
    #[arg(long, default_value = "stop")]
    policy: String,

    /// Jitter RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn two_clusters(args: &Args, policy: BoundaryPolicy) -> SimulationConfig {
    let cluster = |x: f64, vy: f64| BodyGroupSpec {
        n: args.bodies,
        x,
        y: 0.0,
        position_jitter: args.boundary / 4.0,
        vx: 0.0,
        vy,
        velocity_jitter: 50.0,
        radius: 1.0e6,
        radius_jitter: 0.0,
        mass: 1.0e24,
        mass_jitter: 1.0e23,
    };

    SimulationConfig {
        boundary: args.boundary,
        dt: args.dt,
        boundary_policy: policy,
        seed: args.seed,
        initial_state: vec![
            cluster(-args.boundary / 2.0, -100.0),
            cluster(args.boundary / 2.0, 100.0),
        ],
    }
}

fn parse_policy(name: &str) -> Option<BoundaryPolicy> {
    match name {
        "none" => Some(BoundaryPolicy::None),
        "stop" => Some(BoundaryPolicy::Stop),
        "stick" => Some(BoundaryPolicy::Stick),
        "wrap" => Some(BoundaryPolicy::Wrap),
        _ => None,
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let Some(policy) = parse_policy(&args.policy) else {
        bail!("unknown boundary policy '{}'", args.policy);
    };

    let config = two_clusters(&args, policy);
    let mut sim = RealTimeSimulation::new(config, 256)?;

    let report_every = (args.steps / 10).max(1);
    for i in 1..=args.steps {
        sim.step();
        if i % report_every == 0 {
            let frame = sim.current_frame();
            info!(
                "step {i}: {} bodies, max force {:.3e} N, max velocity {:.3e} m/s",
                frame.len(),
                frame.max_force_magnitude(),
                frame.max_velocity_magnitude()
            );
        }
    }

    let frame = sim.current_frame();
    println!(
        "simulated {:.0} s: {} of {} bodies remain, max force {:.3e} N",
        sim.time_elapsed(),
        frame.len(),
        2 * args.bodies,
        frame.max_force_magnitude()
    );

    Ok(())
}
