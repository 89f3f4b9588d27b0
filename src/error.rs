//! Error types
//!
//! Only configuration and lifecycle mistakes are errors. Rejected launches,
//! stale enemy handles and similar routine cases are plain no-ops.

use thiserror::Error;

/// Errors surfaced while building or wiring a battle.
#[derive(Error, Debug)]
pub enum ArenaError {
    /// A countdown was configured with a non-positive or non-finite duration.
    #[error("invalid duration for {name}: {value}")]
    InvalidDuration {
        /// Which timer was being built.
        name: &'static str,
        /// The rejected duration in seconds.
        value: f32,
    },

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A state machine was initialized twice.
    #[error("state machine already initialized")]
    AlreadyInitialized,

    /// Config file could not be read or written.
    #[error("config file error: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Config file was not valid JSON for [`crate::ArenaConfig`].
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type for arena setup.
pub type ArenaResult<T> = Result<T, ArenaError>;
