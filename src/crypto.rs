use secp256k1::ecdsa::{self, RecoverableSignature, RecoveryId};
/// secp256k1 primitives for the legacy swap: private keys (including WIF
/// parsing), public keys (DER encode/decode/decompress), and ECDSA
/// signatures with public-key recovery.
///
/// Implements:
/// - WIF private-key parsing with the legacy length/shape rules
/// - Public-key DER parsing with a `strict` flag gating hybrid prefixes
/// - Deterministic (RFC 6979) signing with low-s normalization
/// - The recovery-index search: try each `i` in 0..4 and adopt the one
///   whose recovered point matches the signer
/// - 65-byte compact encoding `v || r || s` with `v = 27 + 4·compressed + i`
use secp256k1::{Message, Secp256k1, SecretKey};

use crate::base58;
use crate::errors::SwapError;

/// Half of the secp256k1 group order, used for low-s normalization.
const SECP256K1_ORDER_HALF: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Full secp256k1 group order.
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Default WIF version byte, used when a key is built from raw material
/// rather than parsed from a WIF string.
pub const WIF_VERSION: u8 = 0x80;

/// Byte length of a compact recoverable signature: header + r + s.
pub const COMPACT_SIGNATURE_LENGTH: usize = 65;

/// Compare two 32-byte big-endian numbers: returns true if a > b.
fn gt_be(a: &[u8; 32], b: &[u8; 32]) -> bool {
    for i in 0..32 {
        if a[i] > b[i] {
            return true;
        }
        if a[i] < b[i] {
            return false;
        }
    }
    false
}

/// Negate a 32-byte big-endian number modulo the secp256k1 order.
/// result = ORDER - value
fn negate_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;
    for i in (0..32).rev() {
        let mut diff = SECP256K1_ORDER[i] as i32 - s[i] as i32 - borrow;
        if diff < 0 {
            diff += 256;
            borrow = 1;
        } else {
            borrow = 0;
        }
        result[i] = diff as u8;
    }
    result
}

/// A secp256k1 private key with its serialization preferences: the
/// `compressed` flag governs both the derived public key's encoding and the
/// compact-signature header, and the WIF version byte survives a parse so
/// re-serialization reproduces the original string.
#[derive(Debug, Clone)]
pub struct PrivateKey {
    secret: SecretKey,
    pub compressed: bool,
    pub wif_version: u8,
}

impl PrivateKey {
    /// Build a key from a raw 32-byte scalar. Rejects zero and values at or
    /// above the group order.
    pub fn from_slice(bytes: &[u8], compressed: bool) -> Result<Self, SwapError> {
        let secret = SecretKey::from_slice(bytes)?;
        Ok(Self {
            secret,
            compressed,
            wif_version: WIF_VERSION,
        })
    }

    /// Build a key from a hex-encoded scalar.
    pub fn from_hex(hex_scalar: &str, compressed: bool) -> Result<Self, SwapError> {
        let bytes = hex::decode(hex_scalar)?;
        Self::from_slice(&bytes, compressed)
    }

    /// Parse a WIF string.
    ///
    /// The string must be 51 or 52 characters (52 when it begins with `W` or
    /// `X`); the Base58Check payload is one version byte followed by either
    /// a 32-byte scalar (uncompressed) or a 33-byte scalar whose trailing
    /// byte is `0x01` (compressed).
    pub fn from_wif(wif: &str) -> Result<Self, SwapError> {
        if wif.len() != 51 && wif.len() != 52 {
            return Err(SwapError::InvalidKey(format!(
                "invalid WIF length: {} characters",
                wif.len()
            )));
        }
        if wif.starts_with(['W', 'X']) && wif.len() != 52 {
            return Err(SwapError::InvalidKey(
                "invalid WIF length for key prefix".to_string(),
            ));
        }

        let payload = base58::decode_check(wif)?;
        if payload.is_empty() {
            return Err(SwapError::InvalidKey("empty WIF payload".to_string()));
        }
        let version = payload[0];
        let body = &payload[1..];
        match body.len() {
            32 => {
                let mut key = Self::from_slice(body, false)?;
                key.wif_version = version;
                Ok(key)
            }
            33 if body[32] == 0x01 => {
                let mut key = Self::from_slice(&body[..32], true)?;
                key.wif_version = version;
                Ok(key)
            }
            _ => Err(SwapError::InvalidKey(format!(
                "invalid WIF payload length: {} bytes",
                body.len()
            ))),
        }
    }

    /// Serialize as WIF with this key's version byte and compression flag.
    pub fn to_wif(&self) -> String {
        let mut payload = Vec::with_capacity(34);
        payload.push(self.wif_version);
        payload.extend_from_slice(&self.secret.secret_bytes());
        if self.compressed {
            payload.push(0x01);
        }
        base58::encode_check(&payload)
    }

    /// The raw 32-byte scalar.
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.secret.secret_bytes()
    }

    /// Derive the public key `Q = d·G`, carrying over the compression flag.
    pub fn public_key(&self) -> PublicKey {
        let secp = Secp256k1::new();
        PublicKey {
            inner: secp256k1::PublicKey::from_secret_key(&secp, &self.secret),
            compressed: self.compressed,
        }
    }

    pub(crate) fn secret(&self) -> &SecretKey {
        &self.secret
    }
}

/// A point on secp256k1 with a `compressed` flag governing its default
/// serialization.
#[derive(Debug, Clone, Copy)]
pub struct PublicKey {
    inner: secp256k1::PublicKey,
    pub compressed: bool,
}

impl PublicKey {
    /// Parse a DER-encoded point.
    ///
    /// Accepts `04 || X || Y` (65 bytes, uncompressed) and `02`/`03 || X`
    /// (33 bytes, decompressed by parity). The hybrid prefixes `06`/`07` are
    /// accepted only when `strict` is false. Off-curve and zero points are
    /// rejected.
    pub fn from_der(bytes: &[u8], strict: bool) -> Result<Self, SwapError> {
        let Some(&prefix) = bytes.first() else {
            return Err(SwapError::InvalidParameter(
                "empty public key buffer".to_string(),
            ));
        };
        let compressed = match (prefix, bytes.len()) {
            (0x04, 65) => false,
            (0x02 | 0x03, 33) => true,
            (0x06 | 0x07, 65) if !strict => false,
            _ => {
                return Err(SwapError::InvalidPoint(format!(
                    "invalid public key prefix 0x{prefix:02x} for {} bytes",
                    bytes.len()
                )))
            }
        };
        let inner = secp256k1::PublicKey::from_slice(bytes)?;
        Ok(Self { inner, compressed })
    }

    /// Serialize to 33 bytes (compressed) or 65 bytes (uncompressed).
    pub fn serialize(&self, compressed: bool) -> Vec<u8> {
        if compressed {
            self.inner.serialize().to_vec()
        } else {
            self.inner.serialize_uncompressed().to_vec()
        }
    }

    /// Serialize per this key's own compression flag.
    pub fn to_der(&self) -> Vec<u8> {
        self.serialize(self.compressed)
    }

    /// Point equality, ignoring the serialization flag.
    pub fn point_eq(&self, other: &PublicKey) -> bool {
        self.inner == other.inner
    }
}

/// An ECDSA signature `(r, s)` with an optional recovery index, the
/// compression flag encoded into the compact header, and the public key it
/// is associated with — either the signer's (after signing) or a recovered
/// one. No back-pointers: all fields are plain values.
#[derive(Debug, Clone)]
pub struct Signature {
    pub r: [u8; 32],
    pub s: [u8; 32],
    pub recovery_id: Option<u8>,
    pub compressed: bool,
    pub public_key: Option<PublicKey>,
}

impl Signature {
    /// Sign a 32-byte digest with a deterministic (RFC 6979) nonce,
    /// normalize `s` to the low half of the order, and compute the recovery
    /// index by searching `i ∈ 0..4` for the candidate that recovers the
    /// signer's point.
    pub fn sign(private_key: &PrivateKey, digest: &[u8; 32]) -> Result<Self, SwapError> {
        let secp = Secp256k1::new();
        let message = Message::from_digest(*digest);
        let sig = secp.sign_ecdsa(&message, private_key.secret());

        let compact = sig.serialize_compact();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&compact[0..32]);
        s.copy_from_slice(&compact[32..64]);

        // Low-s normalization
        if gt_be(&s, &SECP256K1_ORDER_HALF) {
            s = negate_s(&s);
        }

        let public_key = private_key.public_key();
        let mut out = Self {
            r,
            s,
            recovery_id: None,
            compressed: private_key.compressed,
            public_key: Some(public_key),
        };
        out.calculate_recovery_id(digest, &public_key)?;
        Ok(out)
    }

    /// Search `i ∈ 0..4` for the recovery index whose recovered point equals
    /// `expected`, adopting the matching candidate's compression flag.
    pub fn calculate_recovery_id(
        &mut self,
        digest: &[u8; 32],
        expected: &PublicKey,
    ) -> Result<(), SwapError> {
        for i in 0..4u8 {
            let candidate = match recover_public_key(&self.r, &self.s, i, digest, self.compressed)
            {
                Ok(candidate) => candidate,
                Err(_) => continue,
            };
            if candidate.point_eq(expected) {
                self.recovery_id = Some(i);
                self.compressed = candidate.compressed;
                return Ok(());
            }
        }
        Err(SwapError::Signature("no recovery factor found".to_string()))
    }

    /// Recover the public key from `(r, s, i)` and the signed digest.
    pub fn recover(&self, digest: &[u8; 32]) -> Result<PublicKey, SwapError> {
        let recovery_id = self.recovery_id.ok_or_else(|| {
            SwapError::Signature("recovery factor not calculated".to_string())
        })?;
        recover_public_key(&self.r, &self.s, recovery_id, digest, self.compressed)
    }

    /// Encode as the 65-byte compact form `v || r || s` with
    /// `v = 27 + 4·compressed + i`.
    pub fn to_compact(&self) -> Result<[u8; COMPACT_SIGNATURE_LENGTH], SwapError> {
        let recovery_id = self.recovery_id.ok_or_else(|| {
            SwapError::Signature("recovery factor not calculated".to_string())
        })?;
        let mut out = [0u8; COMPACT_SIGNATURE_LENGTH];
        out[0] = 27 + if self.compressed { 4 } else { 0 } + recovery_id;
        out[1..33].copy_from_slice(&self.r);
        out[33..65].copy_from_slice(&self.s);
        Ok(out)
    }

    /// Decode the 65-byte compact form. The header must lie in `27..=34`.
    pub fn from_compact(bytes: &[u8]) -> Result<Self, SwapError> {
        if bytes.len() != COMPACT_SIGNATURE_LENGTH {
            return Err(SwapError::InvalidParameter(format!(
                "compact signature must be {COMPACT_SIGNATURE_LENGTH} bytes, got {}",
                bytes.len()
            )));
        }
        let header = bytes[0];
        if !(27..=34).contains(&header) {
            return Err(SwapError::Signature(format!(
                "invalid compact signature header {header}"
            )));
        }
        let v = header - 27;
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[1..33]);
        s.copy_from_slice(&bytes[33..65]);
        Ok(Self {
            r,
            s,
            recovery_id: Some(v & 3),
            compressed: v & 4 != 0,
            public_key: None,
        })
    }

    /// Encode `(r, s)` as an ASN.1 DER SEQUENCE of two INTEGERs.
    pub fn to_der(&self) -> Result<Vec<u8>, SwapError> {
        let sig = ecdsa::Signature::from_compact(&self.rs_bytes())?;
        Ok(sig.serialize_der().to_vec())
    }

    /// Decode a DER signature. The result carries no recovery index.
    pub fn from_der(bytes: &[u8]) -> Result<Self, SwapError> {
        let sig = ecdsa::Signature::from_der(bytes)?;
        let compact = sig.serialize_compact();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&compact[0..32]);
        s.copy_from_slice(&compact[32..64]);
        Ok(Self {
            r,
            s,
            recovery_id: None,
            compressed: false,
            public_key: None,
        })
    }

    /// Standard ECDSA verification of this `(r, s)` against a digest and
    /// public key.
    pub fn verify(&self, digest: &[u8; 32], public_key: &PublicKey) -> bool {
        let Ok(sig) = ecdsa::Signature::from_compact(&self.rs_bytes()) else {
            return false;
        };
        let secp = Secp256k1::new();
        secp.verify_ecdsa(&Message::from_digest(*digest), &sig, &public_key.inner)
            .is_ok()
    }

    fn rs_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }
}

/// Recover a candidate public key from `(r, s, i)` and the signed digest
/// (SEC 1 §4.1.6). The `compressed` flag is propagated onto the result.
pub fn recover_public_key(
    r: &[u8; 32],
    s: &[u8; 32],
    recovery_id: u8,
    digest: &[u8; 32],
    compressed: bool,
) -> Result<PublicKey, SwapError> {
    if recovery_id > 3 {
        return Err(SwapError::InvalidParameter(format!(
            "recovery id {recovery_id} out of range"
        )));
    }
    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(r);
    compact[32..].copy_from_slice(s);

    let rec_id = RecoveryId::from_i32(recovery_id as i32)?;
    let sig = RecoverableSignature::from_compact(&compact, rec_id)?;
    let secp = Secp256k1::new();
    let inner = secp
        .recover_ecdsa(&Message::from_digest(*digest), &sig)
        .map_err(|_| SwapError::Signature("public key recovery failed".to_string()))?;
    Ok(PublicKey { inner, compressed })
}

/// Whether a 32-byte big-endian `s` value already lies in the low half of
/// the group order.
pub fn is_low_s(s: &[u8; 32]) -> bool {
    !gt_be(s, &SECP256K1_ORDER_HALF)
}
