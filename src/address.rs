//! Legacy-chain address derivation.
//!
//! An address is the version byte `0x50` followed by the 20-byte hash160 of
//! a public key encoding, rendered as Base58Check.

use std::fmt;

use crate::base58;
use crate::crypto::PublicKey;
use crate::errors::SwapError;
use crate::hash::hash160;

/// Version byte prefixed to the pubkey hash (decimal 80).
pub const ADDRESS_VERSION: u8 = 0x50;

/// A parsed or derived legacy address: version byte plus pubkey hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub version: u8,
    pub pubkey_hash: Vec<u8>,
}

impl Address {
    /// Derive from a public key, hashing its DER encoding per the key's own
    /// compression flag.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        Self::from_encoded(&public_key.to_der())
    }

    /// Derive from an already-encoded public key byte string.
    pub fn from_encoded(encoded_pubkey: &[u8]) -> Self {
        Self {
            version: ADDRESS_VERSION,
            pubkey_hash: hash160(encoded_pubkey).to_vec(),
        }
    }

    /// Derive from a hex-encoded public key string.
    pub fn from_hex(encoded_pubkey_hex: &str) -> Result<Self, SwapError> {
        Ok(Self::from_encoded(&hex::decode(encoded_pubkey_hex)?))
    }

    /// Parse a Base58Check address string.
    ///
    /// Input must be 25 or 34 characters long; the checked payload splits
    /// into a version byte and the pubkey hash. The 25-character form decodes
    /// to a short hash and is accepted as-is.
    pub fn from_base58(address: &str) -> Result<Self, SwapError> {
        if address.len() != 25 && address.len() != 34 {
            return Err(SwapError::InvalidParameter(format!(
                "invalid address length: {} characters",
                address.len()
            )));
        }
        let payload = base58::decode_check(address)?;
        if payload.is_empty() {
            return Err(SwapError::InvalidParameter(
                "empty address payload".to_string(),
            ));
        }
        Ok(Self {
            version: payload[0],
            pubkey_hash: payload[1..].to_vec(),
        })
    }

    /// Base58Check rendering: version byte, pubkey hash, 4-byte checksum.
    pub fn to_base58(&self) -> String {
        let mut payload = Vec::with_capacity(1 + self.pubkey_hash.len());
        payload.push(self.version);
        payload.extend_from_slice(&self.pubkey_hash);
        base58::encode_check(&payload)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}
