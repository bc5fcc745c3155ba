//! Error types for datagent core.

use datagent_abstraction::ModelError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::hooks::error::HookError;

/// Core error type for datagent operations.
#[derive(Error, Debug)]
pub enum DatagentError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Hook registration or execution errors
    #[error("Hook error: {0}")]
    Hook(#[from] HookError),

    /// Model-related errors
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Logging setup errors
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type alias for datagent operations.
pub type Result<T> = std::result::Result<T, DatagentError>;
