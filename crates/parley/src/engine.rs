//! The Engine: unified API for Parley.
//!
//! The Engine wires the core components together from one
//! [`EngineConfig`]. It holds no key material of its own; identities and
//! shared secrets are owned by the caller and passed in by reference.

use parley_core::{
    AsymmetricChannel, CipherPacket, Identity, IdentityKeyStore, PacketCodec, PublicKey,
    SharedSecret, Signature, SignatureService, SymmetricChannel,
};

use crate::config::EngineConfig;
use crate::error::Result;

/// The main Engine struct.
///
/// Provides a unified API for:
/// - Creating identities
/// - Sealing and opening messages under a shared secret
/// - Encrypting small payloads to a public key
/// - Signing and verifying messages
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    identities: IdentityKeyStore,
    symmetric: SymmetricChannel,
    asymmetric: AsymmetricChannel,
    signatures: SignatureService,
    codec: PacketCodec,
}

impl Engine {
    /// Create a new engine.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let identities = IdentityKeyStore::new(config.modulus_bits)?;

        tracing::info!(
            modulus_bits = config.modulus_bits,
            aead = %config.aead,
            padding = %config.padding,
            signature = %config.signature,
            "engine ready"
        );

        Ok(Self {
            identities,
            symmetric: SymmetricChannel::new(config.aead),
            asymmetric: AsymmetricChannel::new(config.padding),
            signatures: SignatureService::new(config.signature),
            codec: PacketCodec::new(config.text_encoding),
            config,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the identity key store.
    pub fn identities(&self) -> &IdentityKeyStore {
        &self.identities
    }

    /// Get the symmetric channel.
    pub fn symmetric(&self) -> &SymmetricChannel {
        &self.symmetric
    }

    /// Get the asymmetric channel.
    pub fn asymmetric(&self) -> &AsymmetricChannel {
        &self.asymmetric
    }

    /// Get the signature service.
    pub fn signatures(&self) -> &SignatureService {
        &self.signatures
    }

    /// Get the packet codec.
    pub fn codec(&self) -> &PacketCodec {
        &self.codec
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Identities and Secrets
    // ─────────────────────────────────────────────────────────────────────────

    /// Generate a new identity.
    pub fn create_identity(&self, name: impl Into<String>) -> Result<Identity> {
        Ok(self.identities.create_identity(name)?)
    }

    /// Generate a new 256-bit shared secret.
    ///
    /// How the two parties come to share it is up to the caller.
    pub fn generate_shared_secret(&self) -> Result<SharedSecret> {
        Ok(SharedSecret::generate()?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Shared-Secret Messages
    // ─────────────────────────────────────────────────────────────────────────

    /// Encrypt under `secret`.
    pub fn seal(&self, secret: &SharedSecret, plaintext: &[u8]) -> Result<CipherPacket> {
        Ok(self.symmetric.encrypt(secret, plaintext)?)
    }

    /// Decrypt a packet sealed under `secret`.
    pub fn open(&self, secret: &SharedSecret, packet: &CipherPacket) -> Result<Vec<u8>> {
        Ok(self.symmetric.decrypt(secret, packet)?)
    }

    /// Encrypt under `secret` and encode as transport text.
    pub fn seal_text(&self, secret: &SharedSecret, plaintext: &[u8]) -> Result<String> {
        let packet = self.seal(secret, plaintext)?;
        Ok(self.codec.to_transport_text(&packet))
    }

    /// Decode transport text and decrypt under `secret`.
    pub fn open_text(&self, secret: &SharedSecret, text: &str) -> Result<Vec<u8>> {
        let packet = self.codec.from_transport_text(text)?;
        self.open(secret, &packet)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Public-Key Messages
    // ─────────────────────────────────────────────────────────────────────────

    /// Encrypt a small payload to the holder of `recipient`.
    pub fn seal_for(&self, recipient: &PublicKey, plaintext: &[u8]) -> Result<Vec<u8>> {
        Ok(self.asymmetric.encrypt(recipient, plaintext)?)
    }

    /// Decrypt a payload addressed to `identity`.
    pub fn open_from(&self, identity: &Identity, ciphertext: &[u8]) -> Result<Vec<u8>> {
        Ok(self.asymmetric.decrypt(identity.private_key(), ciphertext)?)
    }

    /// Largest payload [`seal_for`](Self::seal_for) accepts for `recipient`.
    pub fn max_sealed_for_len(&self, recipient: &PublicKey) -> usize {
        self.asymmetric.max_plaintext_len(recipient)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Signatures
    // ─────────────────────────────────────────────────────────────────────────

    /// Sign `message` as `identity`.
    pub fn sign(&self, identity: &Identity, message: &[u8]) -> Result<Signature> {
        Ok(self.signatures.sign(identity.private_key(), message)?)
    }

    /// Check a signature. A bad signature is `false`, not an error.
    pub fn verify(&self, signer: &PublicKey, message: &[u8], signature: &Signature) -> bool {
        self.signatures.verify(signer, message, signature)
    }

    /// Encode a signature as transport text.
    pub fn signature_to_text(&self, signature: &Signature) -> String {
        self.codec.encode_bytes(signature.as_bytes())
    }

    /// Decode a signature from transport text.
    pub fn signature_from_text(&self, text: &str) -> Result<Signature> {
        let bytes = self.codec.decode_bytes(text)?;
        Ok(Signature::from_bytes(bytes))
    }
}
