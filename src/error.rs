//! Error taxonomy for the counting pipeline
//!
//! Every failure is fatal to the run. Errors carry the stage that failed, the
//! path involved and the underlying cause so a failed run can be diagnosed
//! from the message alone.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::timing::Stage;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Broad category of a [`PipelineError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Read,
    Write,
    Internal,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Bad input directory, empty directory or similar; raised before any stage runs
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("{stage}: failed to read {}", .path.display())]
    Read {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Files written before the failure are left on disk
    #[error("{stage}: failed to write {}", .path.display())]
    Write {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to build reader thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl PipelineError {
    pub fn config(message: impl Into<String>, path: Option<&Path>) -> Self {
        Self::Config {
            message: message.into(),
            path: path.map(Path::to_path_buf),
        }
    }

    pub fn read(stage: Stage, path: &Path, source: io::Error) -> Self {
        Self::Read {
            stage,
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn write(stage: Stage, path: &Path, source: io::Error) -> Self {
        Self::Write {
            stage,
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config { .. } => ErrorKind::Config,
            Self::Read { .. } => ErrorKind::Read,
            Self::Write { .. } => ErrorKind::Write,
            Self::ThreadPool(_) => ErrorKind::Internal,
        }
    }

    /// Path the error refers to, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Config { path, .. } => path.as_deref(),
            Self::Read { path, .. } | Self::Write { path, .. } => Some(path),
            Self::ThreadPool(_) => None,
        }
    }
}
