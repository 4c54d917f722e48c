//! Proptest generators for property-based testing.

use proptest::prelude::*;

use parley_core::{AeadAlgorithm, CipherPacket, Nonce, SharedSecret, TextEncoding, TAG_LEN};

/// Generate a random shared secret.
pub fn shared_secret() -> impl Strategy<Value = SharedSecret> {
    any::<[u8; 32]>().prop_map(SharedSecret::from_bytes)
}

/// Generate a random nonce.
pub fn nonce() -> impl Strategy<Value = Nonce> {
    any::<[u8; 12]>().prop_map(Nonce::from_bytes)
}

/// Generate plaintext bytes of up to `max_len`.
pub fn plaintext(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate associated data of up to 64 bytes.
pub fn aad() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=64)
}

/// Generate a structurally valid packet with arbitrary contents.
pub fn cipher_packet() -> impl Strategy<Value = CipherPacket> {
    (nonce(), prop::collection::vec(any::<u8>(), TAG_LEN..=TAG_LEN + 512)).prop_map(
        |(nonce, sealed)| {
            CipherPacket::new(nonce, sealed).expect("sealed length includes a full tag")
        },
    )
}

/// Generate an AEAD algorithm.
pub fn aead_algorithm() -> impl Strategy<Value = AeadAlgorithm> {
    prop_oneof![
        Just(AeadAlgorithm::Aes256Gcm),
        Just(AeadAlgorithm::ChaCha20Poly1305),
    ]
}

/// Generate a text encoding.
pub fn text_encoding() -> impl Strategy<Value = TextEncoding> {
    prop_oneof![
        Just(TextEncoding::Base64),
        Just(TextEncoding::Base64Url),
        Just(TextEncoding::Hex),
    ]
}
