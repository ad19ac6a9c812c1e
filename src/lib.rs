//! Zenon swap SDK for Rust.
//!
//! A library for holders of legacy-chain funds: it reads a legacy swap
//! wallet (`.swp`), decrypts its keys with a passphrase, and produces
//! signed attestation messages binding each legacy key to a recipient
//! address on the successor network.
//!
//! # What This SDK Provides
//!
//! - Swap-wallet loading with checksum verification: [`SwapFile`]
//! - Per-entry attestation signing: [`SwapEntry`]
//! - The legacy secp256k1 primitives: [`PrivateKey`], [`PublicKey`],
//!   [`Signature`], [`Address`]
//! - Magic-prefixed message signing and verification: [`message`]
//! - An async offload wrapper for the CPU-bound signing path: [`offload`]
//! - A thin bridge to the native wallet-conversion library: [`ExportBridge`]
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use znn_swap_sdk::SwapFile;
//!
//! fn main() -> Result<(), znn_swap_sdk::SwapError> {
//!     let mut wallet = SwapFile::load("wallet.swp")?;
//!
//!     for entry in &mut wallet.entries {
//!         let signature = entry.sign_assets("passphrase", "z1qxy...")?;
//!         println!("{} -> {signature}", entry.address);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Recommended Workflow
//!
//! 1. Export the legacy wallet to a `.swp` file (via [`ExportBridge`] or the
//!    standalone conversion tool).
//! 2. Load it with [`SwapFile::load`].
//! 3. Check the passphrase once with [`SwapEntry::can_decrypt_with`].
//! 4. Sign the attestations you need with [`SwapEntry::sign_assets`] /
//!    [`SwapEntry::sign_legacy_pillar`], or their [`offload`] variants from
//!    async contexts.
//! 5. Verify before submission with [`message::verify_with_public_key`].
//!
//! ## Passphrase Check and Async Signing
//!
//! ```rust,no_run
//! use znn_swap_sdk::{offload, SwapFile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), znn_swap_sdk::SwapError> {
//!     let mut wallet = SwapFile::load("wallet.swp")?;
//!     let entry = &mut wallet.entries[0];
//!
//!     offload::can_decrypt_with(entry, "passphrase").await?;
//!     let signature = offload::sign_assets(entry, "passphrase", "z1qxy...").await?;
//!     println!("{signature}");
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! This crate emits debug-level logs through the [`log`](https://docs.rs/log/)
//! facade for wallet loading, signing, and bridge probing. Configure any
//! compatible logger in your binary, then set `RUST_LOG=debug` to inspect
//! the flow.
//!
//! # Errors
//!
//! All fallible operations return [`SwapError`]. Two messages are part of
//! the format's contract and worth matching on:
//!
//! - every failure inside the decrypt pipeline surfaces as the single
//!   invalid-passphrase error ([`SwapError::is_invalid_passphrase`]) — the
//!   caller deliberately learns nothing about which step failed;
//! - a corrupted wallet surfaces as `InvalidChecksum` before any record is
//!   parsed.
//!
//! See [`guides::error_handling`] for recovery patterns.
//!
//! # Guides
//!
//! The [`guides`] module contains integration guides covering common
//! workflows and patterns:
//!
//! - [`guides::swap_signing`] — Loading wallets and producing attestations
//! - [`guides::error_handling`] — Error taxonomy and handling patterns
//! - [`guides::export_bridge`] — Deploying the native conversion library
pub mod address;
pub mod base58;
pub mod bridge;
pub mod cipher;
pub mod crypto;
pub mod errors;
pub mod guides;
pub mod hash;
pub mod kdf;
pub mod message;
pub mod offload;
pub mod swap;

// Re-export primary types for convenience.
pub use address::{Address, ADDRESS_VERSION};
pub use bridge::ExportBridge;
pub use crypto::{recover_public_key, PrivateKey, PublicKey, Signature};
pub use errors::SwapError;
pub use message::SIGNATURE_MAGIC;
pub use swap::{SwapEntry, SwapFile, SwapMessageKind, SWAP_FILE_EXTENSION};
