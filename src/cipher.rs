//! AES-256-CBC decryption of swap-wallet key records.
//!
//! Key and IV come from the fixed-parameter PBKDF2 stretch in [`crate::kdf`].
//! The plaintext of a record is UTF-8 text whose first 52 bytes are the WIF
//! private-key string; anything after that is ignored.

use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, KeyIvInit};
use zeroize::Zeroizing;

use crate::errors::SwapError;
use crate::kdf;

/// Byte length of the WIF string carried at the head of a decrypted record.
pub const WIF_PLAINTEXT_LENGTH: usize = 52;

type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Decrypt `ciphertext` with the passphrase-derived key and IV, and return
/// the WIF string from the head of the plaintext.
///
/// Callers on the swap-signing path must coalesce any error from here into
/// [`SwapError::invalid_passphrase`]; the detail below is for diagnostics
/// only and never reaches the signing API surface.
pub fn decrypt_wif(passphrase: &str, ciphertext: &[u8]) -> Result<Zeroizing<String>, SwapError> {
    let key = kdf::derive_key(passphrase);
    let iv = kdf::derive_iv(passphrase);

    let mut buf = Zeroizing::new(ciphertext.to_vec());
    let plaintext = Aes256CbcDec::new_from_slices(key.as_ref(), iv.as_ref())
        .map_err(|e| SwapError::InvalidKey(format!("cipher init: {e}")))?
        .decrypt_padded_mut::<Pkcs7>(&mut buf)
        .map_err(|_| SwapError::InvalidKey("bad padding".to_string()))?;

    if plaintext.len() < WIF_PLAINTEXT_LENGTH {
        return Err(SwapError::InvalidKey(format!(
            "plaintext too short: {} bytes",
            plaintext.len()
        )));
    }
    let wif = std::str::from_utf8(&plaintext[..WIF_PLAINTEXT_LENGTH])
        .map_err(|_| SwapError::InvalidKey("plaintext is not UTF-8".to_string()))?;
    Ok(Zeroizing::new(wif.to_string()))
}
