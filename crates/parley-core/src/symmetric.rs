//! Authenticated symmetric encryption.
//!
//! [`SymmetricChannel`] draws a fresh random nonce for every call and
//! returns it inside the [`CipherPacket`]. Nonces are not tracked: with
//! 96 random bits a collision under one key is negligible at any realistic
//! message volume.
//!
//! The AEAD backend is pluggable through [`AeadCipher`]. Both shipped
//! backends use 256-bit keys, 96-bit nonces and 128-bit tags, so they share
//! one wire format.

use std::fmt;

use aes_gcm::Aes256Gcm;
use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::ChaCha20Poly1305;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::packet::{CipherPacket, Nonce, TAG_LEN};
use crate::random::random_array;

/// Largest plaintext AES-GCM can seal under one nonce (2^36 - 32 bytes).
pub const MAX_SEALED_PLAINTEXT: u64 = (1 << 36) - 32;

/// [`MAX_SEALED_PLAINTEXT`] clamped to the address space.
const MAX_SEALED_LEN: usize = if MAX_SEALED_PLAINTEXT > usize::MAX as u64 {
    usize::MAX
} else {
    MAX_SEALED_PLAINTEXT as usize
};

/// A 256-bit secret shared by the two parties of a session.
///
/// Does not implement `Serialize`, and `Debug` prints nothing of the key.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret([u8; 32]);

impl SharedSecret {
    /// Generate a new random secret.
    pub fn generate() -> Result<Self> {
        random_array().map(Self)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, which must be exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| {
            CoreError::InvalidKey(format!("shared secret must be 32 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(arr))
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

/// Identifier for an AEAD construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AeadAlgorithm {
    /// AES-256 in Galois/Counter Mode.
    #[default]
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    /// ChaCha20 with a Poly1305 authenticator.
    #[serde(rename = "chacha20-poly1305")]
    ChaCha20Poly1305,
}

impl AeadAlgorithm {
    /// Instantiate the backend for this algorithm.
    pub fn cipher(self) -> Box<dyn AeadCipher> {
        match self {
            AeadAlgorithm::Aes256Gcm => Box::new(Aes256GcmCipher),
            AeadAlgorithm::ChaCha20Poly1305 => Box::new(ChaCha20Poly1305Cipher),
        }
    }

    /// Canonical name.
    pub const fn as_str(self) -> &'static str {
        match self {
            AeadAlgorithm::Aes256Gcm => "aes-256-gcm",
            AeadAlgorithm::ChaCha20Poly1305 => "chacha20-poly1305",
        }
    }
}

impl fmt::Display for AeadAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An AEAD construction with a 256-bit key, 96-bit nonce and 128-bit tag.
///
/// `open` must verify the tag before releasing any plaintext.
pub trait AeadCipher: Send + Sync {
    /// Which construction this is.
    fn algorithm(&self) -> AeadAlgorithm;

    /// Encrypt and append the tag.
    fn seal(
        &self,
        key: &SharedSecret,
        nonce: &Nonce,
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>>;

    /// Verify the tag and decrypt.
    fn open(
        &self,
        key: &SharedSecret,
        nonce: &Nonce,
        sealed: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>>;
}

/// AES-256-GCM backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aes256GcmCipher;

impl AeadCipher for Aes256GcmCipher {
    fn algorithm(&self) -> AeadAlgorithm {
        AeadAlgorithm::Aes256Gcm
    }

    fn seal(
        &self,
        key: &SharedSecret,
        nonce: &Nonce,
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new(key.as_bytes().into());
        cipher
            .encrypt(nonce.as_bytes().into(), Payload { msg: plaintext, aad })
            .map_err(|_| CoreError::PayloadTooLarge {
                len: plaintext.len(),
                max: MAX_SEALED_LEN,
            })
    }

    fn open(
        &self,
        key: &SharedSecret,
        nonce: &Nonce,
        sealed: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new(key.as_bytes().into());
        cipher
            .decrypt(nonce.as_bytes().into(), Payload { msg: sealed, aad })
            .map_err(|_| CoreError::AuthenticationFailure)
    }
}

/// ChaCha20-Poly1305 backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaCha20Poly1305Cipher;

impl AeadCipher for ChaCha20Poly1305Cipher {
    fn algorithm(&self) -> AeadAlgorithm {
        AeadAlgorithm::ChaCha20Poly1305
    }

    fn seal(
        &self,
        key: &SharedSecret,
        nonce: &Nonce,
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>> {
        let cipher = ChaCha20Poly1305::new(key.as_bytes().into());
        cipher
            .encrypt(nonce.as_bytes().into(), Payload { msg: plaintext, aad })
            .map_err(|_| CoreError::PayloadTooLarge {
                len: plaintext.len(),
                max: MAX_SEALED_LEN,
            })
    }

    fn open(
        &self,
        key: &SharedSecret,
        nonce: &Nonce,
        sealed: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>> {
        let cipher = ChaCha20Poly1305::new(key.as_bytes().into());
        cipher
            .decrypt(nonce.as_bytes().into(), Payload { msg: sealed, aad })
            .map_err(|_| CoreError::AuthenticationFailure)
    }
}

/// Authenticated encryption under a [`SharedSecret`].
pub struct SymmetricChannel {
    cipher: Box<dyn AeadCipher>,
}

impl SymmetricChannel {
    /// Create a channel for the given algorithm.
    pub fn new(algorithm: AeadAlgorithm) -> Self {
        Self {
            cipher: algorithm.cipher(),
        }
    }

    /// Create a channel around a custom backend.
    pub fn with_cipher(cipher: impl AeadCipher + 'static) -> Self {
        Self {
            cipher: Box::new(cipher),
        }
    }

    /// The backend's algorithm.
    pub fn algorithm(&self) -> AeadAlgorithm {
        self.cipher.algorithm()
    }

    /// Encrypt `plaintext` under a fresh nonce.
    pub fn encrypt(&self, key: &SharedSecret, plaintext: &[u8]) -> Result<CipherPacket> {
        self.encrypt_with_aad(key, plaintext, &[])
    }

    /// Encrypt `plaintext`, binding `aad` into the tag.
    ///
    /// `aad` is not carried in the packet; the receiver must supply the
    /// same bytes to [`decrypt_with_aad`](Self::decrypt_with_aad).
    pub fn encrypt_with_aad(
        &self,
        key: &SharedSecret,
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<CipherPacket> {
        let nonce = Nonce::generate()?;
        let sealed = self.cipher.seal(key, &nonce, plaintext, aad)?;

        tracing::debug!(
            algorithm = %self.algorithm(),
            plaintext_len = plaintext.len(),
            aad_len = aad.len(),
            "sealed packet"
        );
        CipherPacket::new(nonce, sealed)
    }

    /// Decrypt a packet. No plaintext is returned unless the tag verifies.
    pub fn decrypt(&self, key: &SharedSecret, packet: &CipherPacket) -> Result<Vec<u8>> {
        self.decrypt_with_aad(key, packet, &[])
    }

    /// Decrypt a packet sealed with associated data.
    pub fn decrypt_with_aad(
        &self,
        key: &SharedSecret,
        packet: &CipherPacket,
        aad: &[u8],
    ) -> Result<Vec<u8>> {
        match self.cipher.open(key, packet.nonce(), packet.sealed(), aad) {
            Ok(plaintext) => {
                tracing::debug!(
                    algorithm = %self.algorithm(),
                    plaintext_len = plaintext.len(),
                    "opened packet"
                );
                Ok(plaintext)
            }
            Err(e) => {
                tracing::warn!(
                    algorithm = %self.algorithm(),
                    packet_len = packet.framed_len(),
                    "packet failed authentication"
                );
                Err(e)
            }
        }
    }

    /// Overhead added to every plaintext: nonce plus tag.
    pub const fn overhead() -> usize {
        crate::packet::NONCE_LEN + TAG_LEN
    }
}

impl Default for SymmetricChannel {
    fn default() -> Self {
        Self::new(AeadAlgorithm::default())
    }
}

impl fmt::Debug for SymmetricChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricChannel")
            .field("algorithm", &self.algorithm())
            .finish()
    }
}
