//! Errors raised while ingesting trace files.
//!
//! These are non-core errors (distilled spec §7): a malformed trace is a
//! problem with the input, not a bug in the simulation, so it is reported
//! and the process exits before `wta_engine::Simulation` is ever
//! constructed.

use std::path::PathBuf;

use thiserror::Error;
use wta_model::ModelError;

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("unable to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed row in {path} (record {record}): {source}")]
    Csv {
        path: PathBuf,
        record: u64,
        #[source]
        source: csv::Error,
    },

    #[error("{path} record {record}: {reason}")]
    InvalidRow {
        path: PathBuf,
        record: u64,
        reason: String,
    },

    #[error("no trace files found under {0}")]
    Empty(PathBuf),

    #[error(transparent)]
    Model(#[from] ModelError),
}
