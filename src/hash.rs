//! Digest helpers shared by the codec, address, and signing layers.
//!
//! - `sha256` — single SHA-256
//! - `double_sha256` — SHA-256 applied twice (checksums, magic hash)
//! - `hash160` — RIPEMD-160 over SHA-256 (public key to address hash)

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 applied twice.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// RIPEMD-160 of SHA-256, the standard pubkey-to-hash function.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(sha256(data)).into()
}
