//! Base58 and Base58Check codecs (Bitcoin alphabet).
//!
//! Raw base-58 conversion is delegated to `bs58`, which preserves leading
//! zero bytes (one per leading `'1'`) and reports the exact offending
//! character on bad input. The checked variants append and verify the
//! classic 4-byte double-SHA-256 checksum.

use crate::errors::SwapError;
use crate::hash::double_sha256;

/// Length of the trailing checksum in a Base58Check string.
pub const CHECKSUM_LENGTH: usize = 4;

/// Encode `data` as base-58, preserving leading zeros.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Decode a base-58 string, preserving leading zeros.
///
/// A character outside the alphabet fails with
/// [`SwapError::IllegalCharacter`] naming the character and its position.
pub fn decode(input: &str) -> Result<Vec<u8>, SwapError> {
    Ok(bs58::decode(input).into_vec()?)
}

/// Encode `payload` with a trailing 4-byte double-SHA-256 checksum.
pub fn encode_check(payload: &[u8]) -> String {
    let checksum = double_sha256(payload);
    let mut buf = Vec::with_capacity(payload.len() + CHECKSUM_LENGTH);
    buf.extend_from_slice(payload);
    buf.extend_from_slice(&checksum[..CHECKSUM_LENGTH]);
    encode(&buf)
}

/// Decode a Base58Check string and verify its checksum, returning the
/// payload without the checksum bytes.
pub fn decode_check(input: &str) -> Result<Vec<u8>, SwapError> {
    let decoded = decode(input)?;
    if decoded.len() < CHECKSUM_LENGTH {
        return Err(SwapError::InvalidParameter(format!(
            "Base58Check input too short: {} bytes",
            decoded.len()
        )));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LENGTH);
    let expected = double_sha256(payload);
    if checksum != &expected[..CHECKSUM_LENGTH] {
        return Err(SwapError::InvalidChecksum(
            "Invalid Base58Check checksum".to_string(),
        ));
    }
    Ok(payload.to_vec())
}
