//! Build a runnable simulation from configuration
//!
//! Takes a `RunConfig` and the initial bodies and produces a [`Scenario`]
//! containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at turn 0)
//! - the force law (`NewtonianGravity`)

use log::info;

use crate::configuration::config::RunConfig;
use crate::error::Result;
use crate::io::initial::load_initial;
use crate::io::trajectory::TrajectoryWriter;
use crate::simulation::engine::{Engine, RunReport, Simulation};
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, System};

/// Fully initialized runtime bundle
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub force: NewtonianGravity,
}

impl Scenario {
    pub fn build_scenario(cfg: &RunConfig, bodies: Vec<Body>) -> Self {
        let parameters = Parameters::from(&cfg.parameters);

        let engine = Engine {
            mode: cfg.engine.mode,
            turns: cfg.engine.turns,
        };

        let force = NewtonianGravity::from_params(&parameters);

        Self {
            engine,
            parameters,
            system: System::new(bodies),
            force,
        }
    }

    /// Read `cfg.input` and build the scenario from it
    pub fn load(cfg: &RunConfig) -> Result<Self> {
        let bodies = load_initial(&cfg.input)?;
        info!(
            "scenario: {} bodies, {} turns, G = {}, eps2 = {}, dt = {}",
            bodies.len(),
            cfg.engine.turns,
            cfg.parameters.G,
            cfg.parameters.eps2,
            cfg.parameters.dt
        );
        Ok(Self::build_scenario(cfg, bodies))
    }

    pub fn into_simulation(self) -> Simulation<NewtonianGravity> {
        Simulation::new(self.engine, self.parameters, self.system, self.force)
    }
}

/// Load `cfg.input`, run every turn and stream the trajectory to `cfg.output`
pub fn run_scenario(cfg: &RunConfig) -> Result<RunReport> {
    let mut sim = Scenario::load(cfg)?.into_simulation();
    let mut out = TrajectoryWriter::create(&cfg.output)?;
    let report = sim.run(&mut out)?;
    info!("trajectory written to {} ({} records)", cfg.output.display(), out.records());
    Ok(report)
}
