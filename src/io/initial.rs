//! Initial-condition files
//!
//! Plain text: the body count `n`, then `n` records of
//! `pos.x pos.y pos.z vel.x vel.y vel.z mass`. Values are whitespace
//! separated; line breaks carry no meaning beyond separating tokens.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::{info, warn};

use crate::error::{RecordPos, Result, SimError};
use crate::simulation::states::{Body, NVec3};

const FIELDS: [&str; 7] = ["pos.x", "pos.y", "pos.z", "vel.x", "vel.y", "vel.z", "mass"];

/// Parse the initial-condition text format
pub fn parse_initial(text: &str) -> Result<Vec<Body>> {
    let mut tokens = text.split_ascii_whitespace();

    let n = match tokens.next() {
        Some(tok) => tok.parse::<usize>().map_err(|_| {
            SimError::malformed(RecordPos::Header, format!("invalid body count `{tok}`"))
        })?,
        None => return Err(SimError::malformed(RecordPos::Header, "missing body count")),
    };

    let mut bodies = Vec::with_capacity(n.min(text.len() / (2 * FIELDS.len())));
    for i in 0..n {
        let mut values = [0.0; 7];
        for (k, field) in FIELDS.iter().enumerate() {
            let tok = tokens.next().ok_or_else(|| {
                SimError::malformed(
                    RecordPos::Record(i),
                    format!("expected {} values, found {}", FIELDS.len(), k),
                )
            })?;
            values[k] = tok.parse::<f64>().map_err(|_| {
                SimError::malformed(RecordPos::Record(i), format!("invalid {field} `{tok}`"))
            })?;
        }
        let [px, py, pz, vx, vy, vz, m] = values;
        bodies.push(Body::new(NVec3::new(px, py, pz), NVec3::new(vx, vy, vz), m));
    }

    let trailing = tokens.count();
    if trailing > 0 {
        warn!("ignoring {} trailing tokens after {} records", trailing, n);
    }
    Ok(bodies)
}

/// Read and parse an initial-condition file
pub fn load_initial(path: &Path) -> Result<Vec<Body>> {
    let text = fs::read_to_string(path).map_err(|source| SimError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let bodies = parse_initial(&text)?;
    info!("loaded {} bodies from {}", bodies.len(), path.display());
    Ok(bodies)
}

/// Write bodies in the initial-condition format. Integer-valued floats are
/// written without a fractional part
pub fn write_initial<W: Write>(mut w: W, bodies: &[Body]) -> io::Result<()> {
    writeln!(w, "{}", bodies.len())?;
    for b in bodies {
        writeln!(
            w,
            "{} {} {} {} {} {} {}",
            b.x.x, b.x.y, b.x.z, b.v.x, b.v.y, b.v.z, b.m
        )?;
    }
    w.flush()
}

pub fn save_initial(path: &Path, bodies: &[Body]) -> Result<()> {
    let sink = |source| SimError::SinkUnavailable {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(sink)?;
    write_initial(BufWriter::new(file), bodies).map_err(sink)?;
    info!("wrote {} bodies to {}", bodies.len(), path.display());
    Ok(())
}
