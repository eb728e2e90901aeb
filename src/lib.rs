pub mod simulation;
pub mod configuration;
pub mod io;
pub mod generation;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Body, System, NVec3};
pub use simulation::forces::{Acceleration, NewtonianGravity};
pub use simulation::integrator::{semi_implicit_euler, advance_body};
pub use simulation::engine::{Engine, Simulation, RunState, RunReport};
pub use simulation::params::Parameters;
pub use simulation::scenario::{Scenario, run_scenario};

pub use configuration::config::{RunConfig, EngineConfig, ParametersConfig, UpdateMode};

pub use io::initial::{load_initial, save_initial};
pub use io::trajectory::{TrajectoryWriter, Trajectory, load_trajectory};

pub use generation::generator::generate;

pub use benchmark::benchmark::bench_modes;
pub use benchmark::stopwatch::Stopwatch;

pub use error::{SimError, ConfigError, RecordPos};
