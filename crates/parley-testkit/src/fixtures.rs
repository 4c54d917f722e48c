//! Test fixtures and helpers.
//!
//! Identities are generated once per process from fixed seeds. Tests borrow
//! them; nothing here touches the OS randomness source for key generation.

use std::sync::OnceLock;

use parley::{Engine, EngineConfig};
use parley_core::{Identity, IdentityKeyStore, SharedSecret};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Fixed 256-bit key: bytes 0x00 through 0x1f.
pub const TEST_KEY: [u8; 32] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
    0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f,
];

/// The fixed test key as a [`SharedSecret`].
pub fn test_key() -> SharedSecret {
    SharedSecret::from_bytes(TEST_KEY)
}

/// Generate a 2048-bit identity from a seed.
pub fn identity_from_seed(name: &str, seed: u64) -> Identity {
    IdentityKeyStore::default()
        .create_identity_with_rng(name, &mut StdRng::seed_from_u64(seed))
        .expect("seeded key generation cannot run out of randomness")
}

fn cached(slot: &'static OnceLock<Identity>, name: &str, seed: u64) -> &'static Identity {
    slot.get_or_init(|| identity_from_seed(name, seed))
}

/// Alice: the usual sender.
pub fn alice() -> &'static Identity {
    static ALICE: OnceLock<Identity> = OnceLock::new();
    cached(&ALICE, "alice", 0xA11CE)
}

/// Bob: the usual recipient.
pub fn bob() -> &'static Identity {
    static BOB: OnceLock<Identity> = OnceLock::new();
    cached(&BOB, "bob", 0xB0B)
}

/// Eve: an unrelated third party.
pub fn eve() -> &'static Identity {
    static EVE: OnceLock<Identity> = OnceLock::new();
    cached(&EVE, "eve", 0xE7E)
}

/// An engine with the default configuration.
pub fn test_engine() -> Engine {
    Engine::new(EngineConfig::default()).expect("default configuration is valid")
}
