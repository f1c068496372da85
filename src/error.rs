//! Error type for problem construction and report output.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors of a job-selection run. None of them are retried.
#[derive(Debug, Error)]
pub enum JobError {
    /// A generation parameter is outside its accepted range.
    #[error("Bad {name} (1 <= {name} ({value}) <= {max})")]
    InvalidParameter {
        name: &'static str,
        value: i64,
        max: i64,
    },

    /// The report directory or file could not be created or written.
    #[error("Unable to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl JobError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
