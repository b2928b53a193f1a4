//! Error types for the engine.

use std::path::PathBuf;

use thiserror::Error;
use toposcan_config::ConfigError;
use toposcan_core::TopoError;
use toposcan_store::StoreError;

/// Main error type for pipeline runs.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Topo(#[from] TopoError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown {what} selector: {value}")]
    Selector { what: &'static str, value: String },

    #[error("worker pool is closed")]
    PoolClosed,
}

impl EngineError {
    pub(crate) fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Output {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn selector(what: &'static str, value: impl Into<String>) -> Self {
        EngineError::Selector {
            what,
            value: value.into(),
        }
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
