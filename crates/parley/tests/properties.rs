//! Security properties checked across the public API.

use std::collections::HashSet;
use std::sync::Mutex;
use std::thread;

use proptest::prelude::*;

use parley::core::{CipherPacket, CoreError, PacketCodec, SymmetricChannel};
use parley_testkit::generators::{aead_algorithm, plaintext, shared_secret, text_encoding};
use parley_testkit::{alice, bob, eve, test_engine, test_key};

#[test]
fn test_hello_scenario_under_fixed_key() {
    let channel = SymmetricChannel::default();
    let key = test_key();

    let packet = channel.encrypt(&key, b"HELLO!!").unwrap();
    assert_eq!(channel.decrypt(&key, &packet).unwrap(), b"HELLO!!");

    let mut bytes = packet.to_bytes();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    let tampered = CipherPacket::from_bytes(&bytes).unwrap();
    assert!(matches!(
        channel.decrypt(&key, &tampered),
        Err(CoreError::AuthenticationFailure)
    ));
}

#[test]
fn test_concurrent_nonces_do_not_collide() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 2_500;

    let channel = SymmetricChannel::default();
    let key = test_key();
    let seen = Mutex::new(HashSet::with_capacity(THREADS * PER_THREAD));

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                let nonces: Vec<_> = (0..PER_THREAD)
                    .map(|_| *channel.encrypt(&key, b"x").unwrap().nonce())
                    .collect();
                let mut seen = seen.lock().unwrap();
                for nonce in nonces {
                    assert!(seen.insert(nonce), "nonce repeated across threads");
                }
            });
        }
    });

    assert_eq!(seen.into_inner().unwrap().len(), THREADS * PER_THREAD);
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let engine = test_engine();
    let secret = engine.generate_shared_secret().unwrap();

    thread::scope(|s| {
        for i in 0..4u8 {
            let engine = &engine;
            let secret = &secret;
            s.spawn(move || {
                let msg = [i; 64];
                let text = engine.seal_text(secret, &msg).unwrap();
                assert_eq!(engine.open_text(secret, &text).unwrap(), msg);

                let sig = engine.sign(alice(), &msg).unwrap();
                assert!(engine.verify(alice().public_key(), &msg, &sig));
            });
        }
    });
}

proptest! {
    #[test]
    fn test_any_bit_flip_is_detected(
        algorithm in aead_algorithm(),
        key in shared_secret(),
        pt in plaintext(256),
        bit in any::<prop::sample::Index>(),
    ) {
        let channel = SymmetricChannel::new(algorithm);
        let mut bytes = channel.encrypt(&key, &pt).unwrap().to_bytes();
        let bit = bit.index(bytes.len() * 8);
        bytes[bit / 8] ^= 1 << (bit % 8);

        let tampered = CipherPacket::from_bytes(&bytes).unwrap();
        prop_assert!(matches!(
            channel.decrypt(&key, &tampered),
            Err(CoreError::AuthenticationFailure)
        ));
    }

    #[test]
    fn test_sealed_text_roundtrip(encoding in text_encoding(), key in shared_secret(), pt in plaintext(1024)) {
        let channel = SymmetricChannel::default();
        let codec = PacketCodec::new(encoding);

        let text = codec.to_transport_text(&channel.encrypt(&key, &pt).unwrap());
        let packet = codec.from_transport_text(&text).unwrap();
        prop_assert_eq!(channel.decrypt(&key, &packet).unwrap(), pt);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn test_public_key_roundtrip_under_ceiling(pt in plaintext(245)) {
        let engine = test_engine();
        let ct = engine.seal_for(bob().public_key(), &pt).unwrap();
        prop_assert_eq!(engine.open_from(bob(), &ct).unwrap(), pt);
    }

    #[test]
    fn test_public_key_rejects_over_ceiling(extra in 1usize..512) {
        let engine = test_engine();
        let pt = vec![0u8; 245 + extra];
        let result = engine.seal_for(bob().public_key(), &pt);
        prop_assert!(matches!(
            result,
            Err(parley::EngineError::Core(CoreError::PayloadTooLarge { .. }))
        ), "expected PayloadTooLarge");
    }

    #[test]
    fn test_signature_soundness(m1 in plaintext(128), m2 in plaintext(128)) {
        prop_assume!(m1 != m2);
        let engine = test_engine();
        let sig = engine.sign(alice(), &m1).unwrap();

        prop_assert!(engine.verify(alice().public_key(), &m1, &sig));
        prop_assert!(!engine.verify(alice().public_key(), &m2, &sig));
        prop_assert!(!engine.verify(eve().public_key(), &m1, &sig));
    }
}
