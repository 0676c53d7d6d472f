//! # Core Error Types
//!
//! Everything that can fail in the ECS core. None of it is fatal: a tick
//! swallows pool errors and logs them.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`ComponentPool`](crate::ComponentPool) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// Allocation requested against a pool with no inactive slot.
    #[error("{pool} pool exhausted: all {capacity} slots are active")]
    PoolExhausted {
        /// Component kind of the pool.
        pool: &'static str,
        /// Pool capacity.
        capacity: usize,
    },

    /// Handle out of range, or (for deactivation) pointing at an inactive slot.
    #[error("invalid {pool} handle {index} (capacity {capacity})")]
    InvalidHandle {
        /// Component kind of the pool.
        pool: &'static str,
        /// The offending slot index.
        index: usize,
        /// Pool capacity.
        capacity: usize,
    },
}

/// Errors raised while loading or validating a [`WorldConfig`](crate::WorldConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid TOML for the expected schema.
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config parsed but its values are unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level error for world construction.
#[derive(Error, Debug)]
pub enum Error {
    /// A pool operation failed.
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;
