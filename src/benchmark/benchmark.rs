use std::io;

use crate::benchmark::stopwatch::Stopwatch;
use crate::configuration::config::UpdateMode;
use crate::error::Result;
use crate::io::trajectory::TrajectoryWriter;
use crate::simulation::engine::{Engine, Simulation};
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3, System};

/// System sizes covered by `bench_modes`
pub const BENCH_SIZES: [usize; 5] = [200, 400, 800, 1600, 3200];

/// One row of the scaling table
#[derive(Debug, Clone, Copy)]
pub struct BenchRow {
    pub n: usize,
    pub sequential_ms: f64, // wall time per turn
    pub synchronized_ms: f64,
    pub compute_share: f64, // stopwatch time / wall time, sequential mode
}

/// Helper to build a manual System of size `n`
/// deterministic positions, no rand needed
pub fn make_system(n: usize) -> System {
    let bodies = (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec3::new(
                (i_f * 0.37).sin() * 5000.0,
                (i_f * 0.13).cos() * 5000.0,
                (i_f * 0.07).sin() * 5000.0,
            );
            Body::at_rest(x, 1.0 + (i % 16) as f64)
        })
        .collect();
    System::new(bodies)
}

/// Time `turns` turns of an `n`-body system in the given mode, output discarded.
/// Returns (wall ms per turn, stopwatch ms per turn)
fn time_turns(n: usize, turns: usize, mode: UpdateMode) -> Result<(f64, f64)> {
    let params = Parameters::default();
    let mut sim = Simulation::new(
        Engine { mode, turns },
        params.clone(),
        make_system(n),
        NewtonianGravity::from_params(&params),
    );
    let mut out = TrajectoryWriter::new(io::sink());

    let mut clock = Stopwatch::new();
    clock.time(|| sim.run(&mut out))?;
    let wall = clock.total().as_secs_f64() * 1000.0;
    let compute = sim.stopwatch().total().as_secs_f64() * 1000.0;

    let per = turns.max(1) as f64;
    Ok((wall / per, compute / per))
}

/// Measure both update modes for every size in `ns`
pub fn bench_turns(ns: &[usize], turns: usize) -> Result<Vec<BenchRow>> {
    let mut rows = Vec::with_capacity(ns.len());
    for &n in ns {
        let (sequential_ms, compute_ms) = time_turns(n, turns, UpdateMode::Sequential)?;
        let (synchronized_ms, _) = time_turns(n, turns, UpdateMode::Synchronized)?;

        let compute_share = if sequential_ms > 0.0 { compute_ms / sequential_ms } else { 0.0 };
        rows.push(BenchRow {
            n,
            sequential_ms,
            synchronized_ms,
            compute_share,
        });
    }
    Ok(rows)
}

/// Print the scaling table as CSV
/// Paste output directly into excel to graph
pub fn bench_modes(turns: usize) -> Result<()> {
    println!("N,sequential_ms,synchronized_ms,compute_share");
    for row in bench_turns(&BENCH_SIZES, turns)? {
        println!(
            "{},{:.6},{:.6},{:.3}",
            row.n, row.sequential_ms, row.synchronized_ms, row.compute_share
        );
    }
    Ok(())
}
