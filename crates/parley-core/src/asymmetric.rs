//! RSA public-key encryption for small payloads.
//!
//! Plaintexts above the padding scheme's ceiling are rejected, never
//! truncated or split. Every decryption failure is reported as the same
//! [`CoreError::DecryptionFailure`] so callers cannot build a padding oracle.

use std::fmt;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use rsa::traits::PaddingScheme;
use rsa::{Oaep, Pkcs1v15Encrypt};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::{CoreError, Result};
use crate::identity::{PrivateKey, PublicKey};
use crate::random::CheckedRng;

/// PKCS#1 v1.5 encryption padding overhead in bytes.
const PKCS1V15_OVERHEAD: usize = 11;

/// OAEP overhead with SHA-256: two digests plus two bytes.
const OAEP_SHA256_OVERHEAD: usize = 2 * 32 + 2;

/// Encrypt with `padding`, drawing from `rng`.
///
/// A randomness failure is `KeyGenerationFailure`. Any other backend error
/// comes from the key itself.
fn encrypt_with_rng<R, P>(
    key: &PublicKey,
    rng: &mut R,
    padding: P,
    plaintext: &[u8],
) -> Result<Vec<u8>>
where
    R: RngCore + CryptoRng,
    P: PaddingScheme,
{
    let mut rng = CheckedRng::new(rng);
    let encrypted = key.as_rsa().encrypt(&mut rng, padding, plaintext);
    rng.finish()?;
    encrypted.map_err(|e| CoreError::InvalidKey(e.to_string()))
}

/// Blinded decryption. Every failure is `DecryptionFailure`.
fn decrypt_with_rng<R, P>(
    key: &PrivateKey,
    rng: &mut R,
    padding: P,
    ciphertext: &[u8],
) -> Result<Vec<u8>>
where
    R: RngCore + CryptoRng,
    P: PaddingScheme,
{
    let mut rng = CheckedRng::new(rng);
    let decrypted = key.as_rsa().decrypt_blinded(&mut rng, padding, ciphertext);
    match (rng.finish(), decrypted) {
        (Ok(()), Ok(plaintext)) => Ok(plaintext),
        _ => Err(CoreError::DecryptionFailure),
    }
}

/// Padding scheme for RSA encryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AsymmetricPadding {
    /// RSAES-PKCS1-v1_5. Ceiling of k - 11 bytes.
    #[default]
    Pkcs1v15,
    /// RSAES-OAEP with SHA-256 and MGF1-SHA-256. Ceiling of k - 66 bytes.
    OaepSha256,
}

impl AsymmetricPadding {
    /// Instantiate the backend for this padding.
    pub fn cipher(self) -> Box<dyn AsymmetricCipher> {
        match self {
            AsymmetricPadding::Pkcs1v15 => Box::new(RsaPkcs1v15),
            AsymmetricPadding::OaepSha256 => Box::new(RsaOaepSha256),
        }
    }
}

impl fmt::Display for AsymmetricPadding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsymmetricPadding::Pkcs1v15 => f.write_str("rsa-pkcs1v15"),
            AsymmetricPadding::OaepSha256 => f.write_str("rsa-oaep-sha256"),
        }
    }
}

/// A public-key encryption scheme with a fixed plaintext ceiling.
pub trait AsymmetricCipher: Send + Sync {
    /// Which padding this is.
    fn padding(&self) -> AsymmetricPadding;

    /// Largest plaintext `key` can carry.
    fn max_plaintext_len(&self, key: &PublicKey) -> usize;

    /// Encrypt a plaintext already checked against the ceiling.
    fn encrypt(&self, key: &PublicKey, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt. Any failure is [`CoreError::DecryptionFailure`].
    fn decrypt(&self, key: &PrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>>;
}

/// RSA with PKCS#1 v1.5 padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct RsaPkcs1v15;

impl AsymmetricCipher for RsaPkcs1v15 {
    fn padding(&self) -> AsymmetricPadding {
        AsymmetricPadding::Pkcs1v15
    }

    fn max_plaintext_len(&self, key: &PublicKey) -> usize {
        key.modulus_len().saturating_sub(PKCS1V15_OVERHEAD)
    }

    fn encrypt(&self, key: &PublicKey, plaintext: &[u8]) -> Result<Vec<u8>> {
        encrypt_with_rng(key, &mut OsRng, Pkcs1v15Encrypt, plaintext)
    }

    fn decrypt(&self, key: &PrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
        decrypt_with_rng(key, &mut OsRng, Pkcs1v15Encrypt, ciphertext)
    }
}

/// RSA with OAEP-SHA-256 padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct RsaOaepSha256;

impl AsymmetricCipher for RsaOaepSha256 {
    fn padding(&self) -> AsymmetricPadding {
        AsymmetricPadding::OaepSha256
    }

    fn max_plaintext_len(&self, key: &PublicKey) -> usize {
        key.modulus_len().saturating_sub(OAEP_SHA256_OVERHEAD)
    }

    fn encrypt(&self, key: &PublicKey, plaintext: &[u8]) -> Result<Vec<u8>> {
        encrypt_with_rng(key, &mut OsRng, Oaep::new::<Sha256>(), plaintext)
    }

    fn decrypt(&self, key: &PrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
        decrypt_with_rng(key, &mut OsRng, Oaep::new::<Sha256>(), ciphertext)
    }
}

/// Bounded public-key encryption.
pub struct AsymmetricChannel {
    cipher: Box<dyn AsymmetricCipher>,
}

impl AsymmetricChannel {
    /// Create a channel using `padding`.
    pub fn new(padding: AsymmetricPadding) -> Self {
        Self {
            cipher: padding.cipher(),
        }
    }

    /// Create a channel around a custom backend.
    pub fn with_cipher(cipher: impl AsymmetricCipher + 'static) -> Self {
        Self {
            cipher: Box::new(cipher),
        }
    }

    /// The backend's padding.
    pub fn padding(&self) -> AsymmetricPadding {
        self.cipher.padding()
    }

    /// Largest plaintext that can be encrypted to `key`.
    pub fn max_plaintext_len(&self, key: &PublicKey) -> usize {
        self.cipher.max_plaintext_len(key)
    }

    /// Encrypt `plaintext` to the holder of `key`.
    pub fn encrypt(&self, key: &PublicKey, plaintext: &[u8]) -> Result<Vec<u8>> {
        let max = self.max_plaintext_len(key);
        if plaintext.len() > max {
            return Err(CoreError::PayloadTooLarge {
                len: plaintext.len(),
                max,
            });
        }

        let ciphertext = self.cipher.encrypt(key, plaintext)?;
        tracing::debug!(
            padding = %self.padding(),
            recipient = %key.fingerprint(),
            plaintext_len = plaintext.len(),
            "encrypted to public key"
        );
        Ok(ciphertext)
    }

    /// Decrypt `ciphertext` with `key`.
    pub fn decrypt(&self, key: &PrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.cipher.decrypt(key, ciphertext).map_err(|_| {
            tracing::warn!(
                padding = %self.padding(),
                ciphertext_len = ciphertext.len(),
                "asymmetric decryption failed"
            );
            CoreError::DecryptionFailure
        })
    }
}

impl Default for AsymmetricChannel {
    fn default() -> Self {
        Self::new(AsymmetricPadding::default())
    }
}

impl fmt::Debug for AsymmetricChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsymmetricChannel")
            .field("padding", &self.padding())
            .finish()
    }
}
