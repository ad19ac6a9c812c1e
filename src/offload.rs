//! Asynchronous offload for the CPU-bound signing path.
//!
//! PBKDF2 at 120 000 iterations dominates signing latency, so each of these
//! wrappers clones the entry, runs the synchronous signer on a blocking
//! worker via [`tokio::task::spawn_blocking`], and awaits the single
//! completion value. Errors propagate verbatim. Cancelling the returned
//! future abandons the wait; the worker may still finish in the background
//! and its result is discarded. Concurrent calls on the same entry are
//! independent; every successful derivation caches the same pubkey bytes,
//! so the last writer is indistinguishable from the first.

use tokio::task;

use crate::errors::SwapError;
use crate::swap::{SwapEntry, SwapMessageKind};

/// Async [`SwapEntry::sign_assets`].
pub async fn sign_assets(
    entry: &mut SwapEntry,
    passphrase: &str,
    recipient_address: &str,
) -> Result<String, SwapError> {
    sign(entry, SwapMessageKind::Assets, passphrase, recipient_address).await
}

/// Async [`SwapEntry::sign_legacy_pillar`].
pub async fn sign_legacy_pillar(
    entry: &mut SwapEntry,
    passphrase: &str,
    recipient_address: &str,
) -> Result<String, SwapError> {
    sign(
        entry,
        SwapMessageKind::LegacyPillar,
        passphrase,
        recipient_address,
    )
    .await
}

/// Async [`SwapEntry::can_decrypt_with`].
pub async fn can_decrypt_with(entry: &mut SwapEntry, passphrase: &str) -> Result<(), SwapError> {
    sign(entry, SwapMessageKind::LegacyPillar, passphrase, "")
        .await
        .map(|_| ())
}

/// Async [`SwapEntry::sign`]: one blocking worker per call, one awaited
/// completion value.
pub async fn sign(
    entry: &mut SwapEntry,
    kind: SwapMessageKind,
    passphrase: &str,
    recipient_address: &str,
) -> Result<String, SwapError> {
    let mut scratch = entry.clone();
    let passphrase = passphrase.to_owned();
    let recipient_address = recipient_address.to_owned();

    let (result, scratch) = task::spawn_blocking(move || {
        let result = scratch.sign(kind, &passphrase, &recipient_address);
        (result, scratch)
    })
    .await
    .map_err(|err| SwapError::Other(format!("signing worker failed: {err}")))?;

    let signature = result?;
    entry.pub_key = scratch.pub_key;
    Ok(signature)
}
