//! # Parley
//!
//! Two-party cryptographic messaging: authenticated symmetric encryption,
//! bounded public-key encryption, and digital signatures over byte
//! sequences the caller already holds.
//!
//! ## Overview
//!
//! - **Identities**: one RSA keypair per actor, created once and immutable
//! - **Sessions**: AES-256-GCM (or ChaCha20-Poly1305) under a 256-bit shared secret
//! - **Small payloads**: RSA encryption with a hard size ceiling
//! - **Signatures**: SHA-256 RSA signatures, verified as a plain boolean
//!
//! Key exchange, certificates, transport and key persistence are left to
//! the caller.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use parley::{Engine, EngineConfig};
//!
//! fn example() -> parley::Result<()> {
//!     let engine = Engine::new(EngineConfig::default())?;
//!
//!     let alice = engine.create_identity("alice")?;
//!     let bob = engine.create_identity("bob")?;
//!
//!     // Shared-secret session
//!     let secret = engine.generate_shared_secret()?;
//!     let text = engine.seal_text(&secret, b"meet me at 3pm")?;
//!     assert_eq!(engine.open_text(&secret, &text)?, b"meet me at 3pm");
//!
//!     // Small payload to Bob's public key
//!     let ciphertext = engine.seal_for(bob.public_key(), b"Secret token: 12345")?;
//!     assert_eq!(engine.open_from(&bob, &ciphertext)?, b"Secret token: 12345");
//!
//!     // Alice signs, anyone with her public key verifies
//!     let signature = engine.sign(&alice, b"I approve")?;
//!     assert!(engine.verify(alice.public_key(), b"I approve", &signature));
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `parley::core` - the component primitives

pub mod config;
pub mod engine;
pub mod error;

pub use parley_core as core;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, Result};

pub use parley_core::{
    AeadAlgorithm, AsymmetricPadding, CipherPacket, CoreError, Identity, KeyFingerprint,
    PublicKey, SharedSecret, Signature, SignatureScheme, TextEncoding,
};
