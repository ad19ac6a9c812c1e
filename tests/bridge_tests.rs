/// Unit tests for the export-bridge adapter. The full conversion path needs
/// the real native library and is gated behind the `integration` feature.
use znn_swap_sdk::errors::SwapError;
use znn_swap_sdk::ExportBridge;

#[test]
fn test_library_file_name_is_platform_specific() {
    let name = ExportBridge::library_file_name();
    assert!(name.contains("znnswap"));
    if cfg!(target_os = "windows") {
        assert!(name.ends_with(".dll"));
    } else if cfg!(target_os = "macos") {
        assert!(name.ends_with(".dylib"));
    } else {
        assert!(name.ends_with(".so"));
    }
}

#[test]
fn test_candidate_directories_are_probed_in_order() {
    let dirs = ExportBridge::candidate_directories();
    assert!(!dirs.is_empty());
    // The working directory comes first so a locally deployed library wins.
    assert_eq!(dirs[0], std::env::current_dir().unwrap());
}

#[test]
fn test_open_missing_library_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join(ExportBridge::library_file_name());
    let err = ExportBridge::open(&missing).unwrap_err();
    assert!(matches!(err, SwapError::Bridge(_)), "{err:?}");
}

/// Requires the real conversion library on the probe path plus a legacy
/// wallet; run with `cargo test --features integration`.
#[test]
#[cfg(feature = "integration")]
fn test_locate_and_export() {
    let bridge = ExportBridge::locate().expect("export library deployed");
    bridge
        .export_swap_file("wallet.dat", "passphrase")
        .expect("conversion succeeds");
}
