//! Error taxonomy for loading, simulating and writing.
//!
//! Every variant is fatal: the engine is a one-shot batch computation and has
//! no recoverable failure modes.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Where in an input stream a malformed record was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordPos {
    Header,
    Record(usize), // 0-based record index, the body index for initial conditions
}

impl fmt::Display for RecordPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordPos::Header => write!(f, "header"),
            RecordPos::Record(i) => write!(f, "record {i}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("cannot read initial conditions from {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed {record}: {reason}")]
    MalformedRecord { record: RecordPos, reason: String },

    #[error("cannot write to {}", path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration file {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

/// Why a configuration file was rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("parameter `{name}` = {value} is out of range: {rule}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        rule: &'static str,
    },
}

impl SimError {
    pub(crate) fn malformed(record: RecordPos, reason: impl Into<String>) -> Self {
        SimError::MalformedRecord {
            record,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
