//! Trajectory stream
//!
//! First line `n turns`, then `turns * n` lines `x y z`, turn-major and
//! body-minor. Records carry no index: their position in the stream is the key.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{RecordPos, Result, SimError};
use crate::simulation::states::NVec3;

/// Streaming writer. Nothing is held beyond what `W` buffers
pub struct TrajectoryWriter<W: Write> {
    inner: W,
    sink: PathBuf, // reported in errors
    records: usize,
}

impl TrajectoryWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| SimError::SinkUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::with_sink(BufWriter::new(file), path))
    }
}

impl<W: Write> TrajectoryWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_sink(inner, "<stream>")
    }

    pub fn with_sink(inner: W, sink: impl AsRef<Path>) -> Self {
        Self {
            inner,
            sink: sink.as_ref().to_path_buf(),
            records: 0,
        }
    }

    pub fn write_header(&mut self, n: usize, turns: usize) -> Result<()> {
        writeln!(self.inner, "{} {}", n, turns).map_err(|e| self.fail(e))
    }

    pub fn write_position(&mut self, x: &NVec3) -> Result<()> {
        writeln!(self.inner, "{:.6} {:.6} {:.6}", x.x, x.y, x.z).map_err(|e| self.fail(e))?;
        self.records += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(|e| self.fail(e))
    }

    /// Position records written so far
    pub fn records(&self) -> usize {
        self.records
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.inner)
    }

    fn fail(&self, source: std::io::Error) -> SimError {
        SimError::SinkUnavailable {
            path: self.sink.clone(),
            source,
        }
    }
}

/// A fully parsed trajectory
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub n: usize,
    pub turns: usize,
    pub positions: Vec<NVec3>, // turns * n, turn-major
}

impl Trajectory {
    /// All n positions recorded for `turn`, `None` past the last turn
    pub fn frame(&self, turn: usize) -> Option<&[NVec3]> {
        if turn >= self.turns {
            return None;
        }
        self.positions.get(turn * self.n..(turn + 1) * self.n)
    }

    pub fn frames(&self) -> impl Iterator<Item = &[NVec3]> + '_ {
        // n == 0 still has `turns` (empty) frames
        (0..self.turns).filter_map(move |t| self.frame(t))
    }
}

fn parse_count(tok: Option<&str>, what: &str) -> Result<usize> {
    let tok = tok.ok_or_else(|| SimError::malformed(RecordPos::Header, format!("missing {what}")))?;
    tok.parse::<usize>()
        .map_err(|_| SimError::malformed(RecordPos::Header, format!("invalid {what} `{tok}`")))
}

/// Parse a trajectory, requiring exactly `turns * n` records
pub fn parse_trajectory(text: &str) -> Result<Trajectory> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header = lines.next().unwrap_or("");
    let mut head = header.split_ascii_whitespace();
    let n = parse_count(head.next(), "body count")?;
    let turns = parse_count(head.next(), "turn count")?;
    if head.next().is_some() {
        return Err(SimError::malformed(RecordPos::Header, "expected `n turns`"));
    }

    let expected = n.checked_mul(turns).ok_or_else(|| {
        SimError::malformed(RecordPos::Header, format!("{n} bodies x {turns} turns overflows"))
    })?;

    let mut positions = Vec::with_capacity(expected.min(text.len() / 6));
    for (k, line) in lines.enumerate() {
        if k >= expected {
            return Err(SimError::malformed(
                RecordPos::Record(k),
                format!("more than {expected} records"),
            ));
        }
        let mut xyz = [0.0; 3];
        let mut fields = line.split_ascii_whitespace();
        for v in xyz.iter_mut() {
            let tok = fields
                .next()
                .ok_or_else(|| SimError::malformed(RecordPos::Record(k), "expected `x y z`"))?;
            *v = tok.parse::<f64>().map_err(|_| {
                SimError::malformed(RecordPos::Record(k), format!("invalid coordinate `{tok}`"))
            })?;
        }
        if fields.next().is_some() {
            return Err(SimError::malformed(RecordPos::Record(k), "expected `x y z`"));
        }
        positions.push(NVec3::new(xyz[0], xyz[1], xyz[2]));
    }

    if positions.len() != expected {
        return Err(SimError::malformed(
            RecordPos::Record(positions.len()),
            format!("expected {expected} records, found {}", positions.len()),
        ));
    }
    Ok(Trajectory { n, turns, positions })
}

/// Read and parse a trajectory from any reader
pub fn read_trajectory<R: Read>(mut reader: R, source: &Path) -> Result<Trajectory> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| SimError::SourceUnavailable {
            path: source.to_path_buf(),
            source: e,
        })?;
    parse_trajectory(&text)
}

pub fn load_trajectory(path: &Path) -> Result<Trajectory> {
    let file = File::open(path).map_err(|source| SimError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    read_trajectory(file, path)
}
