//! Alice and Bob exchange messages through every channel the Engine offers.

use parley::core::{CoreError, Identity, MIN_PACKET_LEN};
use parley::{
    AeadAlgorithm, AsymmetricPadding, Engine, EngineConfig, EngineError, SignatureScheme,
    TextEncoding,
};
use parley_testkit::{alice, bob, eve, test_engine};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[test]
fn test_shared_secret_session() {
    init_tracing();
    let engine = test_engine();
    let secret = engine.generate_shared_secret().unwrap();

    let msg = "Hi Bob \u{2014} meet me at 3pm. (AES/GCM)";
    let text = engine.seal_text(&secret, msg.as_bytes()).unwrap();
    let opened = engine.open_text(&secret, &text).unwrap();
    assert_eq!(String::from_utf8(opened).unwrap(), msg);
}

#[test]
fn test_tampered_session_message_is_rejected() {
    let engine = test_engine();
    let secret = engine.generate_shared_secret().unwrap();

    let packet = engine.seal(&secret, b"transfer 10").unwrap();
    let mut bytes = engine.codec().encode(&packet);
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    let tampered = engine.codec().decode(&bytes).unwrap();

    let err = engine.open(&secret, &tampered).unwrap_err();
    assert!(matches!(err, EngineError::Core(CoreError::AuthenticationFailure)));
    assert!(err.is_security_event());
}

#[test]
fn test_public_key_messages_both_directions() {
    let engine = test_engine();

    let to_bob = engine.seal_for(bob().public_key(), b"Secret token: 12345").unwrap();
    assert_eq!(engine.open_from(bob(), &to_bob).unwrap(), b"Secret token: 12345");

    let to_alice = engine.seal_for(alice().public_key(), b"Got it. -Bob").unwrap();
    assert_eq!(engine.open_from(alice(), &to_alice).unwrap(), b"Got it. -Bob");

    let err = engine.open_from(eve(), &to_bob).unwrap_err();
    assert!(matches!(err, EngineError::Core(CoreError::DecryptionFailure)));
}

#[test]
fn test_public_key_ceiling() {
    let engine = test_engine();
    let max = engine.max_sealed_for_len(bob().public_key());
    assert_eq!(max, 245);

    assert!(engine.seal_for(bob().public_key(), &vec![1u8; max]).is_ok());
    let err = engine
        .seal_for(bob().public_key(), &vec![1u8; max + 1])
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Core(CoreError::PayloadTooLarge { len: 246, max: 245 })
    ));
}

#[test]
fn test_signatures() {
    let engine = test_engine();
    let message = b"I, Alice, approve this transaction.";
    let signature = engine.sign(alice(), message).unwrap();

    assert!(engine.verify(alice().public_key(), message, &signature));
    assert!(!engine.verify(
        alice().public_key(),
        b"I, Alice, approve this transaction (CHANGED).",
        &signature
    ));
    assert!(!engine.verify(bob().public_key(), message, &signature));
}

#[test]
fn test_signature_transport_text() {
    let engine = test_engine();
    let signature = engine.sign(alice(), b"hello").unwrap();

    let text = engine.signature_to_text(&signature);
    let decoded = engine.signature_from_text(&text).unwrap();
    assert_eq!(decoded, signature);
    assert!(engine.verify(alice().public_key(), b"hello", &decoded));

    assert!(matches!(
        engine.signature_from_text("***"),
        Err(EngineError::Core(CoreError::DecodeError(_)))
    ));
}

#[test]
fn test_exported_identity_keeps_working() {
    let engine = test_engine();
    let der = alice().export_private_key_der().unwrap();
    let restored = Identity::from_private_key_der("alice", der.as_bytes()).unwrap();

    let signature = engine.sign(&restored, b"same key").unwrap();
    assert!(engine.verify(alice().public_key(), b"same key", &signature));

    let ciphertext = engine.seal_for(alice().public_key(), b"to alice").unwrap();
    assert_eq!(engine.open_from(&restored, &ciphertext).unwrap(), b"to alice");
}

#[test]
fn test_alternate_configuration() {
    init_tracing();
    let engine = Engine::new(EngineConfig {
        aead: AeadAlgorithm::ChaCha20Poly1305,
        padding: AsymmetricPadding::OaepSha256,
        signature: SignatureScheme::PssSha256,
        text_encoding: TextEncoding::Hex,
        ..EngineConfig::default()
    })
    .unwrap();

    let secret = engine.generate_shared_secret().unwrap();
    let text = engine.seal_text(&secret, b"over chacha").unwrap();
    assert!(text.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(text.len(), 2 * (MIN_PACKET_LEN + 11));
    assert_eq!(engine.open_text(&secret, &text).unwrap(), b"over chacha");

    assert_eq!(engine.max_sealed_for_len(bob().public_key()), 190);
    let ct = engine.seal_for(bob().public_key(), b"oaep").unwrap();
    assert_eq!(engine.open_from(bob(), &ct).unwrap(), b"oaep");

    let sig = engine.sign(alice(), b"pss").unwrap();
    assert!(engine.verify(alice().public_key(), b"pss", &sig));
}

#[test]
fn test_padding_mismatch_is_decryption_failure() {
    let pkcs = test_engine();
    let oaep = Engine::new(EngineConfig {
        padding: AsymmetricPadding::OaepSha256,
        ..EngineConfig::default()
    })
    .unwrap();

    let ct = pkcs.seal_for(bob().public_key(), b"v1.5").unwrap();
    assert!(matches!(
        oaep.open_from(bob(), &ct),
        Err(EngineError::Core(CoreError::DecryptionFailure))
    ));
}
