//! Engine configuration.

use parley_core::{
    AeadAlgorithm, AsymmetricPadding, SignatureScheme, TextEncoding, DEFAULT_MODULUS_BITS,
    MAX_MODULUS_BITS, MIN_MODULUS_BITS,
};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Configuration for the Engine.
///
/// Every field has a default, so a partial document deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// RSA modulus size for new identities.
    pub modulus_bits: usize,
    /// AEAD construction for shared-secret sessions.
    pub aead: AeadAlgorithm,
    /// Padding for public-key encryption.
    pub padding: AsymmetricPadding,
    /// Signature scheme.
    pub signature: SignatureScheme,
    /// Alphabet for transport text.
    pub text_encoding: TextEncoding,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            modulus_bits: DEFAULT_MODULUS_BITS,
            aead: AeadAlgorithm::default(),
            padding: AsymmetricPadding::default(),
            signature: SignatureScheme::default(),
            text_encoding: TextEncoding::default(),
        }
    }
}

impl EngineConfig {
    /// Check values that the type system cannot.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_MODULUS_BITS..=MAX_MODULUS_BITS).contains(&self.modulus_bits) {
            return Err(EngineError::Config(format!(
                "modulus_bits must be between {MIN_MODULUS_BITS} and {MAX_MODULUS_BITS}, got {}",
                self.modulus_bits
            )));
        }
        if self.modulus_bits % 8 != 0 {
            return Err(EngineError::Config(format!(
                "modulus_bits must be a multiple of 8, got {}",
                self.modulus_bits
            )));
        }
        Ok(())
    }
}
