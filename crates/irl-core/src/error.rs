//! Error types for decoding, storage, configuration and evaluation.

use std::path::PathBuf;

/// Errors raised while decoding a `trec_eval` report.
///
/// Any of these aborts the whole decode; no partial result is returned.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A line did not split into `measure topic value`.
    #[error("line {line}: expected 3 columns in evaluation output, found {found}")]
    Format { line: usize, found: usize },

    /// The value column of a numeric measure is not a float.
    #[error("line {line}: invalid value {value:?} for measure {measure}")]
    Parse {
        line: usize,
        measure: String,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// A line is not valid UTF-8.
    #[error("line {line}: evaluation output is not valid UTF-8")]
    Encoding {
        line: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    /// The underlying reader failed.
    #[error("failed to read evaluation output: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading the declared run id of a submission.
#[derive(Debug, thiserror::Error)]
pub enum RunIdError {
    #[error("run line has {found} columns, the run id is expected in column 6")]
    TooFewFields { found: usize },

    #[error("run line is not valid UTF-8")]
    Encoding {
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("failed to read run file: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage failures. Absent teams or runs are not errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// A stored measure is not an 8-byte big-endian double.
    #[error("corrupt measure {team}/{run}/{measure}: expected 8 bytes, found {len}")]
    CorruptMeasure {
        team: String,
        run: String,
        measure: String,
        len: usize,
    },
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config lists no measures")]
    NoMeasures,

    #[error("sort_on measure {sort_on:?} is not one of the configured measures")]
    UnknownSortMeasure { sort_on: String },

    #[error("duplicate measure {0:?}")]
    DuplicateMeasure(String),

    #[error("team key must not be empty")]
    EmptyTeam,

    #[error("teams {first:?} and {second:?} share the same secret")]
    DuplicateSecret { first: String, second: String },

    #[error("no trec_eval section configured")]
    MissingEvaluator,
}

/// Errors raised while running the external evaluator.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("failed to start evaluator {}: {source}", bin.display())]
    Spawn {
        bin: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("evaluator produced invalid output: {0}")]
    Decode(#[from] DecodeError),

    #[error("evaluator exited with {status}")]
    ExitStatus { status: std::process::ExitStatus },

    #[error("failed to wait for evaluator: {0}")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Format { .. } | Self::Parse { .. } | Self::Encoding { .. } => 1,
            Self::Io(_) => 3,
        }
    }
}

impl RunIdError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::TooFewFields { .. } | Self::Encoding { .. } => 1,
            Self::Io(_) => 3,
        }
    }
}

impl StoreError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        3
    }
}

impl ConfigError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

impl EvalError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Decode(e) => e.exit_code(),
            Self::Spawn { .. } | Self::ExitStatus { .. } | Self::Io(_) => 3,
        }
    }
}
