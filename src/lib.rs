pub mod benchmark;
pub mod configuration;
pub mod error;
pub mod simulation;

pub use simulation::engine::{RealTimeSimulation, Simulation};
pub use simulation::forces::{EPS, G};
pub use simulation::history::BoundedHistory;
pub use simulation::replay::{Recording, ReplaySimulation};
pub use simulation::states::{Body, BodyId, SimulationFrame};
pub use simulation::vec2::{RandomOffset, Vec2};

pub use configuration::config::{BodyGroupSpec, BoundaryPolicy, SimulationConfig};

pub use error::SimulationError;

pub use benchmark::benchmark::{bench_gravity, bench_step};
