//! The symmetric cipher packet and its binary framing.
//!
//! ```text
//! CipherPacket := NONCE(12 bytes) || CIPHERTEXT || TAG(16 bytes)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::random::random_array;

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// Authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Smallest valid framed packet: nonce and tag around an empty ciphertext.
pub const MIN_PACKET_LEN: usize = NONCE_LEN + TAG_LEN;

/// A 96-bit AEAD nonce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nonce(pub [u8; NONCE_LEN]);

impl Nonce {
    /// Generate a fresh nonce from the OS randomness source.
    pub fn generate() -> Result<Self> {
        random_array().map(Self)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }
}

/// A nonce plus the AEAD output (ciphertext followed by the tag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherPacket {
    nonce: Nonce,
    sealed: Vec<u8>,
}

impl CipherPacket {
    /// Assemble a packet. `sealed` must hold at least a full tag.
    pub fn new(nonce: Nonce, sealed: Vec<u8>) -> Result<Self> {
        if sealed.len() < TAG_LEN {
            return Err(CoreError::DecodeError(format!(
                "sealed payload of {} bytes is shorter than the {TAG_LEN}-byte tag",
                sealed.len()
            )));
        }
        Ok(Self { nonce, sealed })
    }

    /// The nonce used to seal this packet.
    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// Ciphertext followed by the tag.
    pub fn sealed(&self) -> &[u8] {
        &self.sealed
    }

    /// Ciphertext without the tag.
    pub fn ciphertext(&self) -> &[u8] {
        &self.sealed[..self.sealed.len() - TAG_LEN]
    }

    /// The trailing authentication tag.
    pub fn tag(&self) -> &[u8] {
        &self.sealed[self.sealed.len() - TAG_LEN..]
    }

    /// Length of the framed packet.
    pub fn framed_len(&self) -> usize {
        NONCE_LEN + self.sealed.len()
    }

    /// Frame as `nonce || ciphertext || tag`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.framed_len());
        out.extend_from_slice(&self.nonce.0);
        out.extend_from_slice(&self.sealed);
        out
    }

    /// Parse a framed packet.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MIN_PACKET_LEN {
            return Err(CoreError::DecodeError(format!(
                "packet of {} bytes is shorter than the {MIN_PACKET_LEN}-byte minimum",
                bytes.len()
            )));
        }
        let (nonce, sealed) = bytes.split_at(NONCE_LEN);
        let mut arr = [0u8; NONCE_LEN];
        arr.copy_from_slice(nonce);
        Self::new(Nonce(arr), sealed.to_vec())
    }
}
