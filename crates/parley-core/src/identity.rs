//! Actor identities and their RSA keypairs.
//!
//! An [`Identity`] is created once per actor and is immutable afterwards.
//! The private half can only be borrowed from the owning identity or
//! exported on explicit request.

use std::fmt;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use rsa::pkcs8::{
    DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, SecretDocument,
};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::error::{CoreError, Result};
use crate::random::CheckedRng;

/// Default RSA modulus size.
pub const DEFAULT_MODULUS_BITS: usize = 2048;

/// Smallest accepted RSA modulus size.
pub const MIN_MODULUS_BITS: usize = 2048;

/// Largest accepted RSA modulus size.
pub const MAX_MODULUS_BITS: usize = 16384;

/// A 32-byte Blake3 fingerprint of a public key.
///
/// Safe to log: it identifies a key without revealing it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyFingerprint(pub [u8; 32]);

impl KeyFingerprint {
    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for KeyFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyFingerprint({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for KeyFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex()[..16])
    }
}

/// An RSA public key.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(RsaPublicKey);

impl PublicKey {
    /// Parse from SubjectPublicKeyInfo DER.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        RsaPublicKey::from_public_key_der(der)
            .map(Self)
            .map_err(|e| CoreError::InvalidKey(e.to_string()))
    }

    /// Encode as SubjectPublicKeyInfo DER.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        self.0
            .to_public_key_der()
            .map(|doc| doc.as_bytes().to_vec())
            .map_err(|e| CoreError::InvalidKey(e.to_string()))
    }

    /// Modulus length in bytes. Also the length of every ciphertext and
    /// signature produced with this key.
    pub fn modulus_len(&self) -> usize {
        self.0.size()
    }

    /// Modulus length in bits.
    pub fn modulus_bits(&self) -> usize {
        self.0.n().bits()
    }

    /// Blake3 fingerprint over the modulus and public exponent.
    ///
    /// Each component is prefixed with its big-endian length as a `u64`.
    pub fn fingerprint(&self) -> KeyFingerprint {
        let mut hasher = blake3::Hasher::new_derive_key("parley-v0-key-fingerprint");
        for part in [self.0.n().to_bytes_be(), self.0.e().to_bytes_be()] {
            hasher.update(&(part.len() as u64).to_be_bytes());
            hasher.update(&part);
        }
        KeyFingerprint(*hasher.finalize().as_bytes())
    }

    pub(crate) fn as_rsa(&self) -> &RsaPublicKey {
        &self.0
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}, {} bits)", self.fingerprint(), self.modulus_bits())
    }
}

/// An RSA private key.
///
/// Not `Clone` and not serializable. Borrow it from its [`Identity`].
pub struct PrivateKey(RsaPrivateKey);

impl PrivateKey {
    pub(crate) fn as_rsa(&self) -> &RsaPrivateKey {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// An actor's name and RSA keypair.
pub struct Identity {
    name: String,
    public_key: PublicKey,
    private_key: PrivateKey,
}

impl Identity {
    fn from_rsa(name: String, private: RsaPrivateKey) -> Self {
        let public_key = PublicKey(private.to_public_key());
        Self {
            name,
            public_key,
            private_key: PrivateKey(private),
        }
    }

    /// Rebuild an identity from a PKCS#8 DER private key held in memory.
    pub fn from_private_key_der(name: impl Into<String>, der: &[u8]) -> Result<Self> {
        let private =
            RsaPrivateKey::from_pkcs8_der(der).map_err(|e| CoreError::InvalidKey(e.to_string()))?;
        let bits = private.n().bits();
        if bits < MIN_MODULUS_BITS {
            return Err(CoreError::InvalidKey(format!(
                "modulus of {bits} bits is below the {MIN_MODULUS_BITS}-bit minimum"
            )));
        }
        Ok(Self::from_rsa(name.into(), private))
    }

    /// The actor's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The public half of the keypair.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The private half of the keypair.
    ///
    /// Only code acting on behalf of this identity holds the `Identity`,
    /// so only that code can reach the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Export the private key as PKCS#8 DER.
    ///
    /// The returned document is zeroized when dropped.
    pub fn export_private_key_der(&self) -> Result<SecretDocument> {
        self.private_key
            .0
            .to_pkcs8_der()
            .map_err(|e| CoreError::InvalidKey(e.to_string()))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("name", &self.name)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Generates identities with a fixed modulus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityKeyStore {
    modulus_bits: usize,
}

impl IdentityKeyStore {
    /// Create a store generating keys of `modulus_bits` bits.
    pub fn new(modulus_bits: usize) -> Result<Self> {
        if !(MIN_MODULUS_BITS..=MAX_MODULUS_BITS).contains(&modulus_bits) {
            return Err(CoreError::InvalidConfig(format!(
                "modulus size must be between {MIN_MODULUS_BITS} and {MAX_MODULUS_BITS} bits, got {modulus_bits}"
            )));
        }
        Ok(Self { modulus_bits })
    }

    /// The configured modulus size.
    pub fn modulus_bits(&self) -> usize {
        self.modulus_bits
    }

    /// Generate a fresh identity from the OS randomness source.
    pub fn create_identity(&self, name: impl Into<String>) -> Result<Identity> {
        self.create_identity_with_rng(name, &mut OsRng)
    }

    /// Generate an identity from a caller-supplied CSPRNG.
    ///
    /// A seeded generator yields a reproducible keypair.
    pub fn create_identity_with_rng<R: CryptoRng + RngCore>(
        &self,
        name: impl Into<String>,
        rng: &mut R,
    ) -> Result<Identity> {
        let name = name.into();
        let mut rng = CheckedRng::new(rng);
        let generated = RsaPrivateKey::new(&mut rng, self.modulus_bits);
        rng.finish()?;
        let private = generated.map_err(|e| CoreError::KeyGenerationFailure(e.to_string()))?;
        let identity = Identity::from_rsa(name, private);

        tracing::debug!(
            name = identity.name(),
            fingerprint = %identity.public_key().fingerprint(),
            bits = self.modulus_bits,
            "created identity"
        );
        Ok(identity)
    }

    /// The public key of `identity`.
    pub fn public_key_of<'a>(&self, identity: &'a Identity) -> &'a PublicKey {
        identity.public_key()
    }

    /// The private key of `identity`.
    pub fn private_key_of<'a>(&self, identity: &'a Identity) -> &'a PrivateKey {
        identity.private_key()
    }
}

impl Default for IdentityKeyStore {
    fn default() -> Self {
        Self {
            modulus_bits: DEFAULT_MODULUS_BITS,
        }
    }
}
