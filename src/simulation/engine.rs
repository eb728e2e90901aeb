//! Turn loop of the engine
//!
//! `Simulation` owns the body sequence and drives it through a fixed number of
//! turns, streaming each body's new position to a [`TrajectoryWriter`] as soon
//! as it is computed. Only force accumulation and integration are timed.

use std::fmt;
use std::io::Write;

use log::{debug, info};

use crate::benchmark::stopwatch::Stopwatch;
use crate::configuration::config::UpdateMode;
use crate::error::Result;
use crate::io::trajectory::TrajectoryWriter;
use crate::simulation::forces::Acceleration;
use crate::simulation::integrator::{advance_body, semi_implicit_euler, snapshot_accelerations};
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec3, System};

#[derive(Debug, Clone)]
pub struct Engine {
    pub mode: UpdateMode, // sequential (in-place) or synchronized (snapshot)
    pub turns: usize, // number of turns to run
}

/// Run progress. `Running { turn }` names the next turn to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running { turn: usize },
    Finished,
}

/// Final diagnostics of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub n: usize,
    pub turns: usize,
    pub usecs: u128, // accumulated force + integration time
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "time: {} usecs (with n = {} and turns = {})", self.usecs, self.n, self.turns)
    }
}

pub struct Simulation<F: Acceleration> {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub force: F,
    state: RunState,
    stopwatch: Stopwatch,
    accels: Vec<NVec3>, // scratch for synchronized mode
}

impl<F: Acceleration> Simulation<F> {
    pub fn new(engine: Engine, parameters: Parameters, system: System, force: F) -> Self {
        Self {
            engine,
            parameters,
            system,
            force,
            state: RunState::NotStarted,
            stopwatch: Stopwatch::new(),
            accels: Vec::new(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    /// Execute one turn. The first call also writes the trajectory header.
    /// Calling after the run has finished is a no-op
    pub fn step<W: Write>(&mut self, out: &mut TrajectoryWriter<W>) -> Result<RunState> {
        let turn = match self.state {
            RunState::Finished => return Ok(RunState::Finished),
            RunState::NotStarted => {
                out.write_header(self.system.len(), self.engine.turns)?;
                0
            }
            RunState::Running { turn } => turn,
        };

        if turn < self.engine.turns {
            match self.engine.mode {
                UpdateMode::Sequential => self.sequential_turn(out)?,
                UpdateMode::Synchronized => self.synchronized_turn(out)?,
            }
            self.system.turn += 1;
            debug!("turn {} done", turn);
        }

        self.state = if turn + 1 >= self.engine.turns {
            RunState::Finished
        } else {
            RunState::Running { turn: turn + 1 }
        };
        Ok(self.state)
    }

    /// Run every remaining turn and flush the output
    pub fn run<W: Write>(&mut self, out: &mut TrajectoryWriter<W>) -> Result<RunReport> {
        info!(
            "running {} turns over {} bodies ({:?} update)",
            self.engine.turns,
            self.system.len(),
            self.engine.mode
        );
        while self.step(out)? != RunState::Finished {}
        out.flush()?;

        let report = self.report();
        info!("finished after {} turns", self.system.turn);
        Ok(report)
    }

    pub fn report(&self) -> RunReport {
        RunReport {
            n: self.system.len(),
            turns: self.engine.turns,
            usecs: self.stopwatch.total().as_micros(),
        }
    }

    /// Gauss–Seidel pass: bodies are advanced in index order and every force
    /// sum reads the live array, so body `i` sees bodies `0..i` at their
    /// post-turn state
    fn sequential_turn<W: Write>(&mut self, out: &mut TrajectoryWriter<W>) -> Result<()> {
        let dt = self.parameters.dt;
        for i in 0..self.system.bodies.len() {
            self.stopwatch.start();
            advance_body(&mut self.system.bodies, i, &self.force, dt);
            self.stopwatch.stop();

            out.write_position(&self.system.bodies[i].x)?;
        }
        Ok(())
    }

    /// All accelerations from the turn-start snapshot, then integrate
    fn synchronized_turn<W: Write>(&mut self, out: &mut TrajectoryWriter<W>) -> Result<()> {
        let dt = self.parameters.dt;

        self.stopwatch.start();
        snapshot_accelerations(&self.system.bodies, &self.force, &mut self.accels);
        self.stopwatch.stop();

        for (body, a) in self.system.bodies.iter_mut().zip(self.accels.iter()) {
            self.stopwatch.start();
            semi_implicit_euler(body, a, dt);
            self.stopwatch.stop();

            out.write_position(&body.x)?;
        }
        Ok(())
    }
}
