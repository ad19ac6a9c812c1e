//! Integration guides for the Zenon swap SDK.
//!
//! These guides cover common patterns and workflows for producing swap
//! attestations. Each sub-module contains a standalone guide rendered from
//! Markdown.
//!
//! # Available Guides
//!
//! | Guide | Description |
//! |-------|-------------|
//! | [`swap_signing`] | Loading swap wallets and signing the two attestation families |
//! | [`error_handling`] | The error taxonomy and the invalid-passphrase contract |
//! | [`export_bridge`] | Locating and invoking the native wallet-conversion library |

#[doc = include_str!("../docs/guides/swap-signing.md")]
pub mod swap_signing {}

#[doc = include_str!("../docs/guides/error-handling.md")]
pub mod error_handling {}

#[doc = include_str!("../docs/guides/export-bridge.md")]
pub mod export_bridge {}
