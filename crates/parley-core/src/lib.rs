//! # Parley Core
//!
//! Pure cryptographic primitives for two-party messaging: identities,
//! authenticated symmetric encryption, bounded RSA encryption, RSA
//! signatures, and packet encoding.
//!
//! This crate contains no I/O, no storage, no networking. Every component is
//! `Send + Sync` and holds only immutable configuration, so one instance can
//! serve any number of threads.
//!
//! ## Components
//!
//! - [`IdentityKeyStore`] - generates an [`Identity`] (name + RSA keypair)
//! - [`SymmetricChannel`] - AEAD under a [`SharedSecret`], producing [`CipherPacket`]s
//! - [`AsymmetricChannel`] - RSA encryption with a hard plaintext ceiling
//! - [`SignatureService`] - SHA-256 RSA signatures
//! - [`PacketCodec`] - binary framing and transport text
//!
//! ## Wire Format
//!
//! ```text
//! CipherPacket := NONCE(12 bytes) || CIPHERTEXT || TAG(16 bytes)
//! ```

pub mod asymmetric;
pub mod codec;
pub mod error;
pub mod identity;
pub mod packet;
pub mod random;
pub mod signature;
pub mod symmetric;

pub use asymmetric::{
    AsymmetricChannel, AsymmetricCipher, AsymmetricPadding, RsaOaepSha256, RsaPkcs1v15,
};
pub use codec::{PacketCodec, TextEncoding};
pub use error::{CoreError, Result};
pub use identity::{
    Identity, IdentityKeyStore, KeyFingerprint, PrivateKey, PublicKey, DEFAULT_MODULUS_BITS,
    MAX_MODULUS_BITS, MIN_MODULUS_BITS,
};
pub use packet::{CipherPacket, Nonce, MIN_PACKET_LEN, NONCE_LEN, TAG_LEN};
pub use signature::{Signature, SignatureScheme, SignatureService};
pub use symmetric::{
    AeadAlgorithm, AeadCipher, Aes256GcmCipher, ChaCha20Poly1305Cipher, SharedSecret,
    SymmetricChannel,
};
