//! Run configuration, optionally loaded from YAML.
//!
//! A run is described by:
//!
//! - `input` / `output` – initial-condition file and trajectory file
//! - [`EngineConfig`]     – turn count and update mode
//! - [`ParametersConfig`] – physical constants and step size
//!
//! Every field is optional. With no file at all the run reads `data.in`,
//! writes `data.out` and performs 1000 sequential turns.
//!
//! # YAML format
//!
//! ```yaml
//! input: data.in
//! output: data.out
//!
//! engine:
//!   turns: 1000
//!   mode: "sequential"      # or "synchronized"
//!
//! parameters:
//!   G: 1.0e5                # gravitational constant
//!   eps2: 1.0e-8            # softening epsilon^2
//!   dt: 1.0                 # fixed step size
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConfigError, Result, SimError};
use crate::simulation::params::{Parameters, DEFAULT_DT, DEFAULT_EPS2, DEFAULT_G};

pub const DEFAULT_INPUT: &str = "data.in";
pub const DEFAULT_OUTPUT: &str = "data.out";
pub const DEFAULT_TURNS: usize = 1000;

/// How bodies within one turn observe each other
/// `mode: "sequential"` or `mode: "synchronized"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    #[default]
    #[serde(rename = "sequential")] // in-place, body i sees bodies 0..i already advanced this turn
    Sequential,

    #[serde(rename = "synchronized")] // every force of a turn comes from the turn-start snapshot
    Synchronized,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub turns: usize, // number of turns
    pub mode: UpdateMode, // intra-turn update ordering
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            turns: DEFAULT_TURNS,
            mode: UpdateMode::default(),
        }
    }
}

#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ParametersConfig {
    pub G: f64, // gravitational constant
    pub eps2: f64, // softening
    pub dt: f64, // time step size
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            G: DEFAULT_G,
            eps2: DEFAULT_EPS2,
            dt: DEFAULT_DT,
        }
    }
}

impl ParametersConfig {
    /// `eps2` must be strictly positive: with zero softening the self term
    /// evaluates `0 * inf`. `G` and `dt` must be finite
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let out_of_range = |name, value, rule| ConfigError::OutOfRange { name, value, rule };

        if !(self.eps2 > 0.0 && self.eps2.is_finite()) {
            return Err(out_of_range("eps2", self.eps2, "must be finite and > 0"));
        }
        if !self.G.is_finite() {
            return Err(out_of_range("G", self.G, "must be finite"));
        }
        if !self.dt.is_finite() {
            return Err(out_of_range("dt", self.dt, "must be finite"));
        }
        Ok(())
    }
}

impl From<&ParametersConfig> for Parameters {
    fn from(cfg: &ParametersConfig) -> Self {
        Parameters {
            G: cfg.G,
            eps2: cfg.eps2,
            dt: cfg.dt,
        }
    }
}

/// Top-level run configuration
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub input: PathBuf, // initial conditions
    pub output: PathBuf, // trajectory
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            engine: EngineConfig::default(),
            parameters: ParametersConfig::default(),
        }
    }
}

impl RunConfig {
    /// Parse and validate a YAML configuration
    pub fn from_reader<R: Read>(reader: R, source: &Path) -> Result<Self> {
        let invalid = |e: ConfigError| SimError::Config {
            path: source.to_path_buf(),
            source: e,
        };
        let cfg: RunConfig = serde_yaml::from_reader(reader).map_err(|e| invalid(e.into()))?;
        cfg.parameters.validate().map_err(invalid)?;
        Ok(cfg)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| SimError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), path)
    }
}
