//! Error types for the hooks system.

use thiserror::Error;

/// Errors that can occur in the hooks system.
#[derive(Error, Debug)]
pub enum HookError {
    /// Hook registration error.
    #[error("Failed to register hook: {0}")]
    RegistrationFailed(String),

    /// Hook execution error.
    #[error("Hook execution failed: {0}")]
    ExecutionFailed(String),

    /// Hook not found.
    #[error("Hook not found: {0}")]
    NotFound(String),
}

/// Result type for hook operations.
pub type Result<T> = std::result::Result<T, HookError>;
