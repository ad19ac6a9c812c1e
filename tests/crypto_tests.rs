/// Unit tests for the secp256k1 primitives: WIF parsing, public-key DER
/// handling, signing with low-s normalization, recovery, and the compact
/// and DER signature encodings.
use sha2::{Digest, Sha256};

use znn_swap_sdk::crypto::{
    is_low_s, recover_public_key, PrivateKey, PublicKey, Signature, WIF_VERSION,
};
use znn_swap_sdk::errors::SwapError;

fn test_key(compressed: bool) -> PrivateKey {
    PrivateKey::from_slice(&[0x42u8; 32], compressed).unwrap()
}

fn digest_of(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

#[test]
fn test_private_key_rejects_zero_scalar() {
    let err = PrivateKey::from_slice(&[0u8; 32], true).unwrap_err();
    assert!(matches!(err, SwapError::InvalidKey(_)), "{err:?}");
}

#[test]
fn test_private_key_rejects_scalar_at_order() {
    // The group order itself is out of range.
    let order = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
        0x41, 0x41,
    ];
    assert!(PrivateKey::from_slice(&order, true).is_err());
}

#[test]
fn test_private_key_from_hex() {
    let key = PrivateKey::from_hex(&hex::encode([0x42u8; 32]), true).unwrap();
    assert_eq!(key.secret_bytes(), [0x42u8; 32]);
}

#[test]
fn test_wif_roundtrip_compressed() {
    let key = test_key(true);
    let wif = key.to_wif();
    assert_eq!(wif.len(), 52);

    let parsed = PrivateKey::from_wif(&wif).unwrap();
    assert_eq!(parsed.secret_bytes(), key.secret_bytes());
    assert!(parsed.compressed);
    assert_eq!(parsed.wif_version, WIF_VERSION);
    assert_eq!(parsed.to_wif(), wif);
}

#[test]
fn test_wif_roundtrip_uncompressed() {
    let key = test_key(false);
    let wif = key.to_wif();
    assert_eq!(wif.len(), 51);
    assert!(wif.starts_with('5'));

    let parsed = PrivateKey::from_wif(&wif).unwrap();
    assert_eq!(parsed.secret_bytes(), key.secret_bytes());
    assert!(!parsed.compressed);
    assert_eq!(parsed.to_wif(), wif);
}

#[test]
fn test_wif_rejects_bad_length() {
    let err = PrivateKey::from_wif("tooshort").unwrap_err();
    assert!(matches!(err, SwapError::InvalidKey(_)), "{err:?}");
}

#[test]
fn test_wif_prefix_demands_52_characters() {
    // 51 characters is normally legal, but not when the string starts with
    // 'W' or 'X'.
    let wif = format!("W{}", "1".repeat(50));
    let err = PrivateKey::from_wif(&wif).unwrap_err();
    assert!(matches!(err, SwapError::InvalidKey(_)), "{err:?}");
}

#[test]
fn test_wif_rejects_corrupted_checksum() {
    let mut chars: Vec<char> = test_key(true).to_wif().chars().collect();
    chars[20] = if chars[20] == '4' { '5' } else { '4' };
    let corrupted: String = chars.into_iter().collect();

    let err = PrivateKey::from_wif(&corrupted).unwrap_err();
    assert!(matches!(err, SwapError::InvalidChecksum(_)), "{err:?}");
}

#[test]
fn test_public_key_der_roundtrip_uncompressed() {
    let public_key = test_key(false).public_key();
    let der = public_key.to_der();
    assert_eq!(der.len(), 65);
    assert_eq!(der[0], 0x04);

    let parsed = PublicKey::from_der(&der, true).unwrap();
    assert!(parsed.point_eq(&public_key));
    assert!(!parsed.compressed);
}

#[test]
fn test_public_key_der_roundtrip_compressed() {
    let public_key = test_key(true).public_key();
    let der = public_key.to_der();
    assert_eq!(der.len(), 33);
    assert!(der[0] == 0x02 || der[0] == 0x03);

    let parsed = PublicKey::from_der(&der, true).unwrap();
    assert!(parsed.point_eq(&public_key));
    assert!(parsed.compressed);
}

#[test]
fn test_public_key_rejects_empty_buffer() {
    let err = PublicKey::from_der(&[], true).unwrap_err();
    assert!(matches!(err, SwapError::InvalidParameter(_)), "{err:?}");
}

#[test]
fn test_public_key_rejects_unknown_prefix() {
    let err = PublicKey::from_der(&[0x05u8; 33], true).unwrap_err();
    assert!(matches!(err, SwapError::InvalidPoint(_)), "{err:?}");
}

#[test]
fn test_public_key_rejects_off_curve_point() {
    // Valid prefix and length, x/y almost certainly not on the curve.
    let mut bytes = [0x01u8; 65];
    bytes[0] = 0x04;
    let err = PublicKey::from_der(&bytes, true).unwrap_err();
    assert!(matches!(err, SwapError::InvalidPoint(_)), "{err:?}");
}

#[test]
fn test_public_key_hybrid_prefix_gated_by_strict() {
    let public_key = test_key(false).public_key();
    let mut hybrid = public_key.serialize(false);
    // Hybrid prefix: 0x06 for even y, 0x07 for odd y.
    let parity = public_key.serialize(true)[0] - 0x02;
    hybrid[0] = 0x06 + parity;

    assert!(PublicKey::from_der(&hybrid, true).is_err());
    let parsed = PublicKey::from_der(&hybrid, false).unwrap();
    assert!(parsed.point_eq(&public_key));
}

#[test]
fn test_sign_is_deterministic() {
    let key = test_key(true);
    let digest = digest_of(b"deterministic");
    let a = Signature::sign(&key, &digest).unwrap();
    let b = Signature::sign(&key, &digest).unwrap();

    assert_eq!(a.r, b.r);
    assert_eq!(a.s, b.s);
    assert_eq!(a.recovery_id, b.recovery_id);
}

#[test]
fn test_sign_always_low_s() {
    let key = test_key(true);
    for i in 0u8..50 {
        let digest = digest_of(&[i]);
        let sig = Signature::sign(&key, &digest).unwrap();
        assert!(is_low_s(&sig.s), "s not normalized for message {i}");
    }
}

#[test]
fn test_recovery_returns_signer_key() {
    let key = test_key(true);
    let expected = key.public_key();
    for i in 0u8..10 {
        let digest = digest_of(&[0xA0, i]);
        let sig = Signature::sign(&key, &digest).unwrap();

        let recovered = sig.recover(&digest).unwrap();
        assert!(recovered.point_eq(&expected));

        let direct = recover_public_key(
            &sig.r,
            &sig.s,
            sig.recovery_id.unwrap(),
            &digest,
            sig.compressed,
        )
        .unwrap();
        assert!(direct.point_eq(&expected));
    }
}

#[test]
fn test_recover_rejects_out_of_range_index() {
    let key = test_key(true);
    let digest = digest_of(b"range");
    let sig = Signature::sign(&key, &digest).unwrap();

    let err = recover_public_key(&sig.r, &sig.s, 4, &digest, true).unwrap_err();
    assert!(matches!(err, SwapError::InvalidParameter(_)), "{err:?}");
}

#[test]
fn test_compact_roundtrip_all_headers() {
    for compressed in [false, true] {
        for recovery_id in 0u8..4 {
            let sig = Signature {
                r: [0x11; 32],
                s: [0x22; 32],
                recovery_id: Some(recovery_id),
                compressed,
                public_key: None,
            };
            let compact = sig.to_compact().unwrap();
            assert_eq!(
                compact[0],
                27 + if compressed { 4 } else { 0 } + recovery_id
            );

            let parsed = Signature::from_compact(&compact).unwrap();
            assert_eq!(parsed.r, sig.r);
            assert_eq!(parsed.s, sig.s);
            assert_eq!(parsed.recovery_id, Some(recovery_id));
            assert_eq!(parsed.compressed, compressed);
        }
    }
}

#[test]
fn test_compact_rejects_bad_input() {
    assert!(Signature::from_compact(&[0u8; 64]).is_err());

    let mut bytes = [0u8; 65];
    bytes[0] = 26;
    assert!(Signature::from_compact(&bytes).is_err());
    bytes[0] = 35;
    assert!(Signature::from_compact(&bytes).is_err());
}

#[test]
fn test_compact_requires_recovery_id() {
    let key = test_key(true);
    let digest = digest_of(b"der only");
    let der = Signature::sign(&key, &digest).unwrap().to_der().unwrap();

    let sig = Signature::from_der(&der).unwrap();
    assert_eq!(sig.recovery_id, None);
    let err = sig.to_compact().unwrap_err();
    assert!(matches!(err, SwapError::Signature(_)), "{err:?}");
}

#[test]
fn test_der_roundtrip() {
    let key = test_key(false);
    let digest = digest_of(b"asn.1");
    let sig = Signature::sign(&key, &digest).unwrap();

    let der = sig.to_der().unwrap();
    assert_eq!(der[0], 0x30); // SEQUENCE

    let parsed = Signature::from_der(&der).unwrap();
    assert_eq!(parsed.r, sig.r);
    assert_eq!(parsed.s, sig.s);
    assert!(parsed.verify(&digest, &key.public_key()));
}

#[test]
fn test_verify_after_sign() {
    let key = test_key(true);
    let digest = digest_of(b"verify me");
    let sig = Signature::sign(&key, &digest).unwrap();

    assert!(sig.verify(&digest, &key.public_key()));

    // Wrong digest.
    assert!(!sig.verify(&digest_of(b"other"), &key.public_key()));

    // Wrong key.
    let other = PrivateKey::from_slice(&[0x43u8; 32], true).unwrap();
    assert!(!sig.verify(&digest, &other.public_key()));

    // Corrupted r.
    let mut tampered = sig.clone();
    tampered.r[7] ^= 0x01;
    assert!(!tampered.verify(&digest, &key.public_key()));
}

#[test]
fn test_signature_carries_signer_public_key() {
    let key = test_key(true);
    let digest = digest_of(b"carried key");
    let sig = Signature::sign(&key, &digest).unwrap();

    let carried = sig.public_key.expect("signing attaches the signer's key");
    assert!(carried.point_eq(&key.public_key()));
}
