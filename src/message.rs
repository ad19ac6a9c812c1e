//! Magic-prefixed signed messages.
//!
//! A message is framed as `[len(magic)] || magic || [len(body)] || body`
//! with single-byte lengths, then hashed with double SHA-256 ("magic hash")
//! and signed with a recoverable compact signature, Base64-encoded for
//! transport.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::crypto::{PrivateKey, PublicKey, Signature, COMPACT_SIGNATURE_LENGTH};
use crate::errors::SwapError;
use crate::hash::double_sha256;

/// The magic prefix bound into every signed message.
pub const SIGNATURE_MAGIC: &str = "Zenon secp256k1 signature:";

/// Largest message body representable with a single-byte length prefix.
const MAX_BODY_LENGTH: usize = 252;

fn frame(message: &str) -> Result<Vec<u8>, SwapError> {
    let magic = SIGNATURE_MAGIC.as_bytes();
    let body = message.as_bytes();
    if body.len() > MAX_BODY_LENGTH {
        return Err(SwapError::InvalidParameter(format!(
            "message body too long: {} bytes (max {MAX_BODY_LENGTH})",
            body.len()
        )));
    }
    let mut out = Vec::with_capacity(2 + magic.len() + body.len());
    out.push(magic.len() as u8);
    out.extend_from_slice(magic);
    out.push(body.len() as u8);
    out.extend_from_slice(body);
    Ok(out)
}

/// Double SHA-256 of the magic-framed message.
pub fn magic_hash(message: &str) -> Result<[u8; 32], SwapError> {
    Ok(double_sha256(&frame(message)?))
}

/// Sign `message` with the key, returning the Base64 of the 65-byte compact
/// signature.
pub fn sign(private_key: &PrivateKey, message: &str) -> Result<String, SwapError> {
    let digest = magic_hash(message)?;
    let signature = Signature::sign(private_key, &digest)?;
    Ok(BASE64.encode(signature.to_compact()?))
}

/// Verify a Base64 compact signature against an asserted public key.
///
/// The claimed key is first recovered from the signature and the magic hash;
/// verification succeeds only when the recovered point equals the asserted
/// point and standard ECDSA verification passes. Recovery failures report as
/// a non-match rather than an error; malformed input (bad Base64, wrong
/// length, bad header) is an error.
pub fn verify_with_public_key(
    public_key: &PublicKey,
    message: &str,
    signature_b64: &str,
) -> Result<bool, SwapError> {
    let bytes = BASE64.decode(signature_b64)?;
    if bytes.len() != COMPACT_SIGNATURE_LENGTH {
        return Err(SwapError::InvalidParameter(format!(
            "compact signature must be {COMPACT_SIGNATURE_LENGTH} bytes, got {}",
            bytes.len()
        )));
    }
    let signature = Signature::from_compact(&bytes)?;
    let digest = magic_hash(message)?;
    let recovered = match signature.recover(&digest) {
        Ok(recovered) => recovered,
        Err(_) => return Ok(false),
    };
    Ok(recovered.point_eq(public_key) && signature.verify(&digest, &recovered))
}
