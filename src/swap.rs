/// Swap-wallet codec and attestation signing.
///
/// A swap wallet is a UTF-8 `.swp` file: a JSON object mapping Base64
/// legacy public keys to `[ciphertext, keyIdHash]` pairs, followed by the
/// lowercase SHA-256 hex of that JSON body as a 64-character trailer.
/// Each entry can sign the two attestation message families binding its
/// legacy key to a recipient address on the successor chain.
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::cipher;
use crate::crypto::{PrivateKey, PublicKey};
use crate::errors::SwapError;
use crate::hash::sha256;
use crate::message;

/// Required file extension for swap wallets.
pub const SWAP_FILE_EXTENSION: &str = "swp";

/// Length of the hex SHA-256 trailer at the end of a swap file.
const TRAILER_LENGTH: usize = 64;

/// Template prefix for asset-retrieval attestations.
pub const ASSETS_TEMPLATE_PREFIX: &str = "ZNN swap retrieve assets ";

/// Template prefix for legacy-pillar attestations.
pub const LEGACY_PILLAR_TEMPLATE_PREFIX: &str = "ZNN swap retrieve legacy pillar ";

/// The two attestation message families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapMessageKind {
    LegacyPillar,
    Assets,
}

impl SwapMessageKind {
    /// The literal template prefix for this message family.
    pub fn template_prefix(self) -> &'static str {
        match self {
            SwapMessageKind::LegacyPillar => LEGACY_PILLAR_TEMPLATE_PREFIX,
            SwapMessageKind::Assets => ASSETS_TEMPLATE_PREFIX,
        }
    }
}

/// One key record from a swap wallet.
///
/// `pub_key` is empty after load and is populated with the Base64 of the
/// uncompressed derived public key by the first successful sign.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapEntry {
    /// Legacy address, derived from the record's public key at load time.
    pub address: String,
    /// Base64 of the derived public key; empty until the first successful
    /// sign.
    pub pub_key: String,
    /// Opaque key-id hash, carried through unmodified.
    pub key_id_hash: String,
    /// Base64 AES-256-CBC ciphertext of the WIF private key.
    pub encrypted_priv_key: String,
}

impl SwapEntry {
    /// Sign one attestation for this entry.
    ///
    /// Decrypts the private key with `passphrase`, builds the message
    /// `<template prefix><derived pubkey base64> <recipient>`, signs its
    /// magic hash, caches the derived public key on the entry, and returns
    /// the Base64 compact signature.
    pub fn sign(
        &mut self,
        kind: SwapMessageKind,
        passphrase: &str,
        recipient_address: &str,
    ) -> Result<String, SwapError> {
        let private_key = self.decrypt_private_key(passphrase)?;
        let derived_pub_key = BASE64.encode(private_key.public_key().serialize(false));
        let body = format!(
            "{}{} {}",
            kind.template_prefix(),
            derived_pub_key,
            recipient_address
        );
        let signature = message::sign(&private_key, &body)?;
        debug!("signed {kind:?} attestation for {}", self.address);
        self.pub_key = derived_pub_key;
        Ok(signature)
    }

    /// Sign the asset-retrieval attestation.
    pub fn sign_assets(
        &mut self,
        passphrase: &str,
        recipient_address: &str,
    ) -> Result<String, SwapError> {
        self.sign(SwapMessageKind::Assets, passphrase, recipient_address)
    }

    /// Sign the legacy-pillar attestation.
    pub fn sign_legacy_pillar(
        &mut self,
        passphrase: &str,
        recipient_address: &str,
    ) -> Result<String, SwapError> {
        self.sign(SwapMessageKind::LegacyPillar, passphrase, recipient_address)
    }

    /// Probe whether `passphrase` decrypts this entry by running a full
    /// sign against an empty recipient and discarding the signature. A clean
    /// return means the passphrase is correct (and `pub_key` is populated
    /// as a side effect).
    pub fn can_decrypt_with(&mut self, passphrase: &str) -> Result<(), SwapError> {
        self.sign(SwapMessageKind::LegacyPillar, passphrase, "")
            .map(|_| ())
    }

    /// Decrypt and parse this entry's private key.
    ///
    /// Every failure — Base64, padding, UTF-8, WIF shape, scalar range — is
    /// coalesced into the single invalid-passphrase error so the caller
    /// learns nothing about which step failed.
    fn decrypt_private_key(&self, passphrase: &str) -> Result<PrivateKey, SwapError> {
        let ciphertext = BASE64
            .decode(&self.encrypted_priv_key)
            .map_err(|_| SwapError::invalid_passphrase())?;
        let wif = cipher::decrypt_wif(passphrase, &ciphertext)
            .map_err(|_| SwapError::invalid_passphrase())?;
        PrivateKey::from_wif(&wif).map_err(|_| SwapError::invalid_passphrase())
    }
}

/// A parsed swap wallet.
#[derive(Debug, Clone)]
pub struct SwapFile {
    /// Entries sorted by legacy public key Base64.
    pub entries: Vec<SwapEntry>,
}

impl SwapFile {
    /// Read, verify, and parse a swap wallet from disk.
    ///
    /// The path must end in `.swp`; the file content is trimmed of
    /// surrounding whitespace, split into JSON body and 64-hex trailer, and
    /// rejected unless the trailer equals the lowercase SHA-256 hex of the
    /// body.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SwapError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext == SWAP_FILE_EXTENSION => {}
            _ => {
                return Err(SwapError::InvalidParameter(format!(
                    "swap wallet file must have a .{SWAP_FILE_EXTENSION} extension"
                )))
            }
        }
        let content = fs::read_to_string(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                SwapError::InvalidPath(path.display().to_string())
            } else {
                SwapError::Io(err.to_string())
            }
        })?;
        let file = Self::parse(&content)?;
        debug!(
            "loaded swap wallet {}: {} entries",
            path.display(),
            file.entries.len()
        );
        Ok(file)
    }

    /// Parse swap-wallet content that has already been read into memory.
    pub fn parse(content: &str) -> Result<Self, SwapError> {
        let trimmed = content.trim();
        if trimmed.len() <= TRAILER_LENGTH {
            return Err(SwapError::InvalidParameter(
                "swap wallet content too short".to_string(),
            ));
        }
        let split = trimmed.len() - TRAILER_LENGTH;
        if !trimmed.is_char_boundary(split) {
            // A multi-byte character in the trailer region cannot be a hex
            // digest.
            return Err(SwapError::InvalidChecksum(
                "Invalid swap wallet checksum".to_string(),
            ));
        }
        let (body, trailer) = trimmed.split_at(split);
        if hex::encode(sha256(body.as_bytes())) != trailer {
            return Err(SwapError::InvalidChecksum(
                "Invalid swap wallet checksum".to_string(),
            ));
        }

        let records: BTreeMap<String, (String, String)> = serde_json::from_str(body)?;
        let mut entries = Vec::with_capacity(records.len());
        for (pub_key_b64, (encrypted_priv_key, key_id_hash)) in records {
            let pubkey_der = BASE64.decode(&pub_key_b64)?;
            let public_key = PublicKey::from_der(&pubkey_der, true)?;
            let address = Address::from_encoded(&public_key.serialize(true));
            entries.push(SwapEntry {
                address: address.to_base58(),
                // Left empty at load time; populated by the first
                // successful sign.
                pub_key: String::new(),
                key_id_hash,
                encrypted_priv_key,
            });
        }
        Ok(Self { entries })
    }
}
