//! Passphrase stretching for swap-wallet decryption.
//!
//! PBKDF2-HMAC-SHA-256 with parameters fixed by the legacy format: salt
//! `"znn"`, 120 000 iterations, 32-byte output. Two derivations feed each
//! decrypt: the cipher key from the passphrase itself, and the IV from the
//! code-point-reversed passphrase (first 16 bytes of that derivation).

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

pub const KDF_SALT: &[u8] = b"znn";
pub const KDF_ITERATIONS: u32 = 120_000;
pub const KDF_KEY_LENGTH: usize = 32;

/// AES initialization vector length, taken from the head of the IV-seed
/// derivation.
pub const IV_LENGTH: usize = 16;

fn stretch(passphrase: &str) -> Zeroizing<[u8; KDF_KEY_LENGTH]> {
    let mut out = Zeroizing::new([0u8; KDF_KEY_LENGTH]);
    pbkdf2_hmac::<Sha256>(
        passphrase.as_bytes(),
        KDF_SALT,
        KDF_ITERATIONS,
        out.as_mut(),
    );
    out
}

/// Derive the 32-byte AES key from the passphrase.
pub fn derive_key(passphrase: &str) -> Zeroizing<[u8; KDF_KEY_LENGTH]> {
    stretch(passphrase)
}

/// Derive the 16-byte AES IV: the first half of the same stretch applied to
/// the passphrase with its Unicode code points reversed.
pub fn derive_iv(passphrase: &str) -> Zeroizing<[u8; IV_LENGTH]> {
    let reversed: Zeroizing<String> = Zeroizing::new(passphrase.chars().rev().collect());
    let seed = stretch(&reversed);
    let mut iv = Zeroizing::new([0u8; IV_LENGTH]);
    iv.copy_from_slice(&seed[..IV_LENGTH]);
    iv
}
