//! RSA signatures over SHA-256 digests.

use std::fmt;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use rsa::{Pkcs1v15Sign, Pss};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{CoreError, Result};
use crate::identity::{PrivateKey, PublicKey};
use crate::random::CheckedRng;

/// An RSA signature. Always as long as the signer's modulus.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature(pub Vec<u8>);

impl Signature {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the signature holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "Signature({}...)", &hex[..hex.len().min(16)])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Signature padding scheme. Both hash the message with SHA-256.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureScheme {
    /// RSASSA-PKCS1-v1_5 (deterministic).
    #[default]
    Pkcs1v15Sha256,
    /// RSASSA-PSS with a random salt.
    PssSha256,
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureScheme::Pkcs1v15Sha256 => f.write_str("sha256-rsa-pkcs1v15"),
            SignatureScheme::PssSha256 => f.write_str("sha256-rsa-pss"),
        }
    }
}

/// Signs and verifies messages with identity keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureService {
    scheme: SignatureScheme,
}

impl SignatureService {
    /// Create a service using `scheme`.
    pub const fn new(scheme: SignatureScheme) -> Self {
        Self { scheme }
    }

    /// The configured scheme.
    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Sign the SHA-256 digest of `message`.
    pub fn sign(&self, key: &PrivateKey, message: &[u8]) -> Result<Signature> {
        self.sign_with_rng(key, message, &mut OsRng)
    }

    pub(crate) fn sign_with_rng<R: RngCore + CryptoRng>(
        &self,
        key: &PrivateKey,
        message: &[u8],
        rng: &mut R,
    ) -> Result<Signature> {
        let digest = Sha256::digest(message);
        let rsa_key = key.as_rsa();
        let mut rng = CheckedRng::new(rng);

        // Signing with an rng enables blinding for both schemes.
        let signed = match self.scheme {
            SignatureScheme::Pkcs1v15Sha256 => {
                rsa_key.sign_with_rng(&mut rng, Pkcs1v15Sign::new::<Sha256>(), &digest)
            }
            SignatureScheme::PssSha256 => {
                rsa_key.sign_with_rng(&mut rng, Pss::new::<Sha256>(), &digest)
            }
        };
        rng.finish()?;
        let bytes = signed.map_err(|e| CoreError::InvalidKey(e.to_string()))?;

        tracing::debug!(
            scheme = %self.scheme,
            message_len = message.len(),
            "signed message"
        );
        Ok(Signature(bytes))
    }

    /// Check `signature` over `message` against `key`.
    ///
    /// Returns false for any mismatch; never errors.
    pub fn verify(&self, key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
        if signature.len() != key.modulus_len() {
            return false;
        }

        let digest = Sha256::digest(message);
        let rsa_key = key.as_rsa();
        let valid = match self.scheme {
            SignatureScheme::Pkcs1v15Sha256 => rsa_key
                .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature.as_bytes())
                .is_ok(),
            SignatureScheme::PssSha256 => rsa_key
                .verify(Pss::new::<Sha256>(), &digest, signature.as_bytes())
                .is_ok(),
        };

        if !valid {
            tracing::debug!(
                scheme = %self.scheme,
                signer = %key.fingerprint(),
                "signature rejected"
            );
        }
        valid
    }
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::identity::{Identity, IdentityKeyStore};
    use crate::random::UnavailableRng;

    fn identity(slot: &'static OnceLock<Identity>, name: &str, seed: u64) -> &'static Identity {
        slot.get_or_init(|| {
            IdentityKeyStore::default()
                .create_identity_with_rng(name, &mut StdRng::seed_from_u64(seed))
                .unwrap()
        })
    }

    fn alice() -> &'static Identity {
        static ALICE: OnceLock<Identity> = OnceLock::new();
        identity(&ALICE, "alice", 0xA11CE)
    }

    fn mallory() -> &'static Identity {
        static MALLORY: OnceLock<Identity> = OnceLock::new();
        identity(&MALLORY, "mallory", 0x3A11)
    }

    fn services() -> [SignatureService; 2] {
        [
            SignatureService::new(SignatureScheme::Pkcs1v15Sha256),
            SignatureService::new(SignatureScheme::PssSha256),
        ]
    }

    const MESSAGE: &[u8] = b"I, Alice, approve this transaction.";

    #[test]
    fn test_sign_verify() {
        for service in services() {
            let sig = service.sign(alice().private_key(), MESSAGE).unwrap();
            assert_eq!(sig.len(), 256);
            assert!(service.verify(alice().public_key(), MESSAGE, &sig));
        }
    }

    #[test]
    fn test_altered_message_fails() {
        for service in services() {
            let sig = service.sign(alice().private_key(), MESSAGE).unwrap();
            let altered = b"I, Alice, approve this transaction (CHANGED).";
            assert!(!service.verify(alice().public_key(), altered, &sig));

            let mut one_byte = MESSAGE.to_vec();
            one_byte[0] ^= 0x01;
            assert!(!service.verify(alice().public_key(), &one_byte, &sig));
        }
    }

    #[test]
    fn test_unrelated_key_fails() {
        for service in services() {
            let sig = service.sign(alice().private_key(), MESSAGE).unwrap();
            assert!(!service.verify(mallory().public_key(), MESSAGE, &sig));
        }
    }

    #[test]
    fn test_malformed_signature_is_false() {
        let service = SignatureService::default();
        let pk = alice().public_key();

        assert!(!service.verify(pk, MESSAGE, &Signature::from_bytes(Vec::new())));
        assert!(!service.verify(pk, MESSAGE, &Signature::from_bytes(vec![0u8; 256])));
        assert!(!service.verify(pk, MESSAGE, &Signature::from_bytes(vec![0xFF; 256])));
        assert!(!service.verify(pk, MESSAGE, &Signature::from_bytes(vec![1u8; 300])));
    }

    #[test]
    fn test_tampered_signature_fails() {
        let service = SignatureService::default();
        let mut sig = service.sign(alice().private_key(), MESSAGE).unwrap();
        sig.0[128] ^= 0x01;
        assert!(!service.verify(alice().public_key(), MESSAGE, &sig));
    }

    #[test]
    fn test_pkcs1v15_is_deterministic_pss_is_not() {
        let pkcs = SignatureService::new(SignatureScheme::Pkcs1v15Sha256);
        let a = pkcs.sign(alice().private_key(), MESSAGE).unwrap();
        let b = pkcs.sign(alice().private_key(), MESSAGE).unwrap();
        assert_eq!(a, b);

        let pss = SignatureService::new(SignatureScheme::PssSha256);
        let c = pss.sign(alice().private_key(), MESSAGE).unwrap();
        let d = pss.sign(alice().private_key(), MESSAGE).unwrap();
        assert_ne!(c, d);
    }

    #[test]
    fn test_schemes_do_not_cross_verify() {
        let pkcs = SignatureService::new(SignatureScheme::Pkcs1v15Sha256);
        let pss = SignatureService::new(SignatureScheme::PssSha256);
        let sig = pkcs.sign(alice().private_key(), MESSAGE).unwrap();
        assert!(!pss.verify(alice().public_key(), MESSAGE, &sig));
    }

    #[test]
    fn test_unavailable_randomness_is_key_generation_failure() {
        for service in services() {
            assert!(matches!(
                service.sign_with_rng(alice().private_key(), MESSAGE, &mut UnavailableRng),
                Err(CoreError::KeyGenerationFailure(_))
            ));
        }
    }
}
