//! Error types for the Engine.

use parley_core::CoreError;
use thiserror::Error;

/// Errors that can occur during Engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Cryptographic failure from a core component.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Configuration rejected at construction.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EngineError {
    /// True for failures that indicate tampering or a wrong key rather than
    /// a caller mistake.
    pub fn is_security_event(&self) -> bool {
        matches!(
            self,
            EngineError::Core(CoreError::AuthenticationFailure)
                | EngineError::Core(CoreError::DecryptionFailure)
        )
    }
}

/// Result type for Engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
