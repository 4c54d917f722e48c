//! # Parley Testkit
//!
//! Testing utilities for Parley.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Known-answer vectors**: published AES-256-GCM test cases
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: cached, seeded identities for multi-party tests
//!
//! ## Known-Answer Vectors
//!
//! ```rust
//! use parley_testkit::vectors::verify_all_vectors;
//!
//! for (name, ok) in verify_all_vectors() {
//!     assert!(ok, "{name}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use parley_testkit::generators::{plaintext, shared_secret};
//!
//! proptest! {
//!     #[test]
//!     fn roundtrip(key in shared_secret(), pt in plaintext(1024)) {
//!         let channel = parley_core::SymmetricChannel::default();
//!         let packet = channel.encrypt(&key, &pt).unwrap();
//!         prop_assert_eq!(channel.decrypt(&key, &packet).unwrap(), pt);
//!     }
//! }
//! ```
//!
//! ## Fixtures
//!
//! RSA key generation is slow, so fixture identities are generated once
//! per process from fixed seeds and shared by reference:
//!
//! ```rust,no_run
//! use parley_testkit::fixtures::{alice, bob};
//!
//! let alice = alice();
//! let bob = bob();
//! assert_ne!(alice.public_key(), bob.public_key());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{alice, bob, eve, test_engine, test_key, TEST_KEY};
pub use vectors::{all_vectors, verify_all_vectors, AeadVector};
