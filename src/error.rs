//! Error taxonomy for the reporting pipelines.
//!
//! Parse rejects are expected noise and never leave the parser as a failure of
//! the whole run. The other kinds end one pipeline and are printed with a label;
//! the remaining pipelines still run.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Why a single input line was not turned into a record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RejectReason {
    #[error("empty line")]
    Empty,

    #[error("expected {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("field {field} is not a finite number: {value:?}")]
    NonNumeric { field: &'static str, value: String },

    #[error("line does not match the combined log grammar")]
    GrammarMismatch,
}

/// An input source could not be read at all.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Exit {
        program: &'static str,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Log file {} not found", path.display())]
    LogNotFound { path: PathBuf },

    #[error("Log file {} could not be opened: {source}", path.display())]
    LogOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// User supplied settings that cannot be acted on.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Both --mysql-user and --mysql-password are required for MySQL check")]
    IncompleteCredentials,

    #[error("read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The database backend failed while connecting or querying.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: mysql::Error,
    },

    #[error("query {query:?}: {source}")]
    Query {
        query: &'static str,
        #[source]
        source: mysql::Error,
    },
}
