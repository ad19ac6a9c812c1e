/// Error types for the Zenon swap SDK.
///
/// One flat enum covers every failure surface of the crate: file and
/// checksum validation, Base58/DER parsing, curve-point and key validation,
/// signature handling, and the export bridge.
use thiserror::Error;

/// The primary error type for the swap SDK.
#[derive(Error, Debug)]
pub enum SwapError {
    /// Swap-wallet file missing or unreadable at the given path.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// SHA-256 trailer of a swap file, or a Base58Check checksum, does not
    /// match the payload.
    #[error("{0}")]
    InvalidChecksum(String),

    /// Base-58 decoding hit a character outside the alphabet.
    #[error("Illegal character '{character}' at position {position}")]
    IllegalCharacter { character: char, position: usize },

    /// Malformed input: wrong length, wrong extension, empty buffer.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// EC point off-curve, at infinity, or otherwise not a valid public key.
    #[error("Invalid point: {0}")]
    InvalidPoint(String),

    /// Private-key material rejected: bad WIF shape, scalar out of range, or
    /// any failure inside the decrypt pipeline (deliberately coalesced).
    #[error("{0}")]
    InvalidKey(String),

    /// Signature construction, encoding, or recovery failure.
    #[error("Signature error: {0}")]
    Signature(String),

    // Ambient errors
    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    /// Export-bridge failure: library not found, symbol missing, or a
    /// non-empty status string from the native exporter.
    #[error("Export bridge error: {0}")]
    Bridge(String),

    // Generic
    #[error("{0}")]
    Other(String),
}

/// The single user-visible message for every failure between decryption and
/// WIF parsing. Wrong passphrase, bad padding, and a garbled key all look
/// identical to the caller.
const INVALID_PASSPHRASE_MESSAGE: &str = "Invalid decryption passphrase, please check again";

impl SwapError {
    /// The coalesced decrypt-pipeline error.
    pub fn invalid_passphrase() -> Self {
        SwapError::InvalidKey(INVALID_PASSPHRASE_MESSAGE.to_string())
    }

    /// Returns true if this error is the coalesced wrong-passphrase error.
    pub fn is_invalid_passphrase(&self) -> bool {
        matches!(self, SwapError::InvalidKey(msg) if msg == INVALID_PASSPHRASE_MESSAGE)
    }
}

impl From<std::io::Error> for SwapError {
    fn from(err: std::io::Error) -> Self {
        SwapError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SwapError {
    fn from(err: serde_json::Error) -> Self {
        SwapError::Json(err.to_string())
    }
}

impl From<bs58::decode::Error> for SwapError {
    fn from(err: bs58::decode::Error) -> Self {
        match err {
            bs58::decode::Error::InvalidCharacter { character, index } => {
                SwapError::IllegalCharacter {
                    character,
                    position: index,
                }
            }
            other => SwapError::InvalidParameter(format!("Base58 decode: {other}")),
        }
    }
}

impl From<base64::DecodeError> for SwapError {
    fn from(err: base64::DecodeError) -> Self {
        SwapError::InvalidParameter(format!("Base64 decode: {err}"))
    }
}

impl From<hex::FromHexError> for SwapError {
    fn from(err: hex::FromHexError) -> Self {
        SwapError::InvalidParameter(format!("Hex decode: {err}"))
    }
}

impl From<secp256k1::Error> for SwapError {
    fn from(err: secp256k1::Error) -> Self {
        use secp256k1::Error::*;
        match err {
            InvalidPublicKey | InvalidPublicKeySum => SwapError::InvalidPoint(err.to_string()),
            InvalidSecretKey | InvalidTweak => SwapError::InvalidKey(err.to_string()),
            InvalidSignature | InvalidRecoveryId | IncorrectSignature => {
                SwapError::Signature(err.to_string())
            }
            other => SwapError::Other(other.to_string()),
        }
    }
}
