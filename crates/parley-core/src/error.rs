//! Error types for Parley Core.
//!
//! Messages never carry key material or plaintext.

use thiserror::Error;

/// Errors that can occur during cryptographic operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The randomness source was unavailable or key generation failed.
    #[error("key generation failed: {0}")]
    KeyGenerationFailure(String),

    /// AEAD tag mismatch. Treated as a security event.
    #[error("authentication failed")]
    AuthenticationFailure,

    /// Asymmetric plaintext exceeds what the key and padding can carry.
    #[error("payload too large: {len} bytes exceeds maximum of {max}")]
    PayloadTooLarge { len: usize, max: usize },

    /// Asymmetric decryption failed. The cause is deliberately not reported.
    #[error("decryption failed")]
    DecryptionFailure,

    /// Malformed transport text or packet framing.
    #[error("decoding error: {0}")]
    DecodeError(String),

    /// Key material could not be imported or exported.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Rejected configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_errors_carry_no_detail() {
        assert_eq!(CoreError::AuthenticationFailure.to_string(), "authentication failed");
        assert_eq!(CoreError::DecryptionFailure.to_string(), "decryption failed");
    }

    #[test]
    fn test_payload_too_large_message() {
        let err = CoreError::PayloadTooLarge { len: 300, max: 245 };
        assert_eq!(
            err.to_string(),
            "payload too large: 300 bytes exceeds maximum of 245"
        );
    }
}
