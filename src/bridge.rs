//! Export bridge to the native legacy-wallet conversion library.
//!
//! The legacy wallet is converted into a swap file by a pre-existing native
//! library exposing a single symbol:
//! `exportSwapFile(walletPath, passphrase) -> statusString`, where an empty
//! status means success (a `wallet.swp` is written next to the input) and
//! anything else is the error message. This module only locates the library
//! and forwards the call; the conversion itself is an external concern.

use std::env;
use std::ffi::{CStr, CString};
use std::fmt;
use std::os::raw::c_char;
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use log::debug;

use crate::errors::SwapError;

/// Exported symbol name in the native library.
const EXPORT_SYMBOL: &[u8] = b"exportSwapFile\0";

#[allow(unsafe_code)]
type ExportSwapFileFn = unsafe extern "C" fn(*const c_char, *const c_char) -> *const c_char;

/// Owned handle to the native conversion library.
///
/// Acquire once with [`ExportBridge::locate`] (or [`ExportBridge::open`]
/// with an explicit path) and reuse; callers wanting a process-wide handle
/// can wrap it in their own one-shot initialization.
pub struct ExportBridge {
    library: Library,
    path: PathBuf,
}

impl fmt::Debug for ExportBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportBridge")
            .field("path", &self.path)
            .finish()
    }
}

impl ExportBridge {
    /// Platform file name of the native library.
    pub fn library_file_name() -> &'static str {
        if cfg!(target_os = "windows") {
            "znnswap.dll"
        } else if cfg!(target_os = "macos") {
            "libznnswap.dylib"
        } else {
            "libznnswap.so"
        }
    }

    /// Candidate directories, probed in order: the working directory, the
    /// running executable's directory, and a `lib/` subdirectory of each.
    pub fn candidate_directories() -> Vec<PathBuf> {
        let mut dirs = Vec::with_capacity(4);
        if let Ok(cwd) = env::current_dir() {
            dirs.push(cwd.clone());
            dirs.push(cwd.join("lib"));
        }
        if let Some(exe_dir) = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            dirs.push(exe_dir.clone());
            dirs.push(exe_dir.join("lib"));
        }
        dirs
    }

    /// Probe the candidate directories for the native library and open the
    /// first match.
    pub fn locate() -> Result<Self, SwapError> {
        let file_name = Self::library_file_name();
        for dir in Self::candidate_directories() {
            let candidate = dir.join(file_name);
            debug!("probing for export library at {}", candidate.display());
            if candidate.is_file() {
                return Self::open(&candidate);
            }
        }
        Err(SwapError::Bridge(format!(
            "export library {file_name} not found"
        )))
    }

    /// Open the native library at an explicit path.
    #[allow(unsafe_code)]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SwapError> {
        let path = path.as_ref();
        // SAFETY: loading runs the library's initializers; the export
        // library is a trusted local artifact selected by the operator.
        let library = unsafe { Library::new(path) }
            .map_err(|err| SwapError::Bridge(format!("{}: {err}", path.display())))?;
        debug!("opened export library {}", path.display());
        Ok(Self {
            library,
            path: path.to_path_buf(),
        })
    }

    /// Convert the legacy wallet at `wallet_path` into a swap file written
    /// next to it. An empty status string from the native side is success;
    /// any other status surfaces as [`SwapError::Bridge`].
    #[allow(unsafe_code)]
    pub fn export_swap_file(&self, wallet_path: &str, passphrase: &str) -> Result<(), SwapError> {
        let wallet = CString::new(wallet_path).map_err(|_| {
            SwapError::InvalidParameter("wallet path contains a NUL byte".to_string())
        })?;
        let pass = CString::new(passphrase).map_err(|_| {
            SwapError::InvalidParameter("passphrase contains a NUL byte".to_string())
        })?;

        // SAFETY: the symbol signature matches the published bridge
        // contract; both arguments outlive the call, and the returned
        // pointer (when non-null) is a NUL-terminated string owned by the
        // library.
        let status = unsafe {
            let export: Symbol<ExportSwapFileFn> =
                self.library.get(EXPORT_SYMBOL).map_err(|err| {
                    SwapError::Bridge(format!("exportSwapFile symbol missing: {err}"))
                })?;
            let raw = export(wallet.as_ptr(), pass.as_ptr());
            if raw.is_null() {
                String::new()
            } else {
                CStr::from_ptr(raw).to_string_lossy().into_owned()
            }
        };

        if status.is_empty() {
            Ok(())
        } else {
            Err(SwapError::Bridge(status))
        }
    }
}
