/// Unit tests for the magic-prefixed signed-message engine.
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use sha2::{Digest, Sha256};

use znn_swap_sdk::errors::SwapError;
use znn_swap_sdk::{message, PrivateKey, SIGNATURE_MAGIC};

fn test_key() -> PrivateKey {
    PrivateKey::from_slice(&[0x42u8; 32], true).unwrap()
}

#[test]
fn test_magic_hash_matches_manual_frame() {
    let body = "hello swap";

    let mut frame = Vec::new();
    frame.push(SIGNATURE_MAGIC.len() as u8);
    frame.extend_from_slice(SIGNATURE_MAGIC.as_bytes());
    frame.push(body.len() as u8);
    frame.extend_from_slice(body.as_bytes());
    let expected: [u8; 32] = Sha256::digest(Sha256::digest(&frame)).into();

    assert_eq!(message::magic_hash(body).unwrap(), expected);
}

#[test]
fn test_magic_prefix_is_26_bytes() {
    assert_eq!(SIGNATURE_MAGIC.len(), 26);
    assert_eq!(SIGNATURE_MAGIC, "Zenon secp256k1 signature:");
}

#[test]
fn test_sign_produces_65_byte_compact_signature() {
    let signature = message::sign(&test_key(), "attest").unwrap();
    assert_eq!(signature.len(), 88); // Base64 of 65 bytes

    let bytes = BASE64.decode(&signature).unwrap();
    assert_eq!(bytes.len(), 65);
    assert!((27..=34).contains(&bytes[0]), "header {}", bytes[0]);
}

#[test]
fn test_verify_after_sign() {
    let key = test_key();
    let body = "ZNN swap retrieve assets probe z1qxy";
    let signature = message::sign(&key, body).unwrap();

    let verified =
        message::verify_with_public_key(&key.public_key(), body, &signature).unwrap();
    assert!(verified);
}

#[test]
fn test_verify_rejects_altered_message() {
    let key = test_key();
    let signature = message::sign(&key, "original").unwrap();

    let verified =
        message::verify_with_public_key(&key.public_key(), "originaX", &signature).unwrap();
    assert!(!verified);
}

#[test]
fn test_verify_rejects_altered_signature() {
    let key = test_key();
    let body = "tamper probe";
    let signature = message::sign(&key, body).unwrap();

    // Flip one bit inside r and re-encode.
    let mut bytes = BASE64.decode(&signature).unwrap();
    bytes[10] ^= 0x01;
    let tampered = BASE64.encode(&bytes);

    let verified = message::verify_with_public_key(&key.public_key(), body, &tampered).unwrap();
    assert!(!verified);
}

#[test]
fn test_verify_rejects_wrong_key() {
    let key = test_key();
    let other = PrivateKey::from_slice(&[0x43u8; 32], true).unwrap();
    let body = "key mismatch";
    let signature = message::sign(&key, body).unwrap();

    let verified =
        message::verify_with_public_key(&other.public_key(), body, &signature).unwrap();
    assert!(!verified);
}

#[test]
fn test_verify_rejects_wrong_length_signature() {
    let key = test_key();
    let short = BASE64.encode([0u8; 10]);
    let err = message::verify_with_public_key(&key.public_key(), "msg", &short).unwrap_err();
    assert!(matches!(err, SwapError::InvalidParameter(_)), "{err:?}");
}

#[test]
fn test_sign_rejects_oversized_body() {
    let body = "x".repeat(253);
    let err = message::sign(&test_key(), &body).unwrap_err();
    assert!(matches!(err, SwapError::InvalidParameter(_)), "{err:?}");
}

#[test]
fn test_sign_uncompressed_header_range() {
    let key = PrivateKey::from_slice(&[0x42u8; 32], false).unwrap();
    let signature = message::sign(&key, "uncompressed").unwrap();
    let bytes = BASE64.decode(&signature).unwrap();
    // v = 27 + i for uncompressed keys.
    assert!((27..=30).contains(&bytes[0]), "header {}", bytes[0]);

    let compressed_sig = message::sign(&test_key(), "uncompressed").unwrap();
    let compressed_bytes = BASE64.decode(&compressed_sig).unwrap();
    // v = 31 + i once the compression bit is set.
    assert!(
        (31..=34).contains(&compressed_bytes[0]),
        "header {}",
        compressed_bytes[0]
    );
}
