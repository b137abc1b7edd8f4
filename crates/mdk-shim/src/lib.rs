//! Drop-in C ABI for the MDK media SDK.
//!
//! Link against this library instead of the SDK. It exports every SDK
//! function the loader knows about under the SDK's own name and signature,
//! plus four loader entry points:
//!
//! ```c
//! bool mdkloader_load(const char* path);
//! bool mdkloader_isLoaded(void);
//! int  mdkloader_version(void);
//! void mdkloader_cleanup(void);
//! ```
//!
//! Until `mdkloader_load` succeeds every SDK function returns its fallback
//! value (null, `false`, `MDK_VERSION`, ...). Set `MDKLOADER_LOG` to get the
//! loader's own `tracing` output on stderr, filtered by `RUST_LOG`.
//!
//! A Rust panic never unwinds into the caller: it is logged and the fallback
//! value is returned.

#![allow(non_snake_case)]
#![deny(unsafe_op_in_unsafe_fn)]

use std::ffi::{c_char, c_int, CStr};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;

use mdk_loader::{global, logging, LoadError};
use tracing::error;

/// Environment variable that turns on loader logging.
pub const LOG_ENV: &str = "MDKLOADER_LOG";

fn guard<R>(function: &'static str, fallback: impl FnOnce() -> R, body: impl FnOnce() -> R) -> R {
    catch_unwind(AssertUnwindSafe(body)).unwrap_or_else(|_| {
        error!(function, "Panic caught at the C boundary");
        fallback()
    })
}

/// # Safety
///
/// `path` must be null or a valid NUL-terminated string.
unsafe fn path_from_c(path: *const c_char) -> Result<PathBuf, LoadError> {
    if path.is_null() {
        return Err(LoadError::NullPath);
    }
    let path = unsafe { CStr::from_ptr(path) };

    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        Ok(PathBuf::from(std::ffi::OsStr::from_bytes(path.to_bytes())))
    }
    #[cfg(windows)]
    {
        ansi_to_path(path.to_bytes())
    }
}

/// Decode a path in the process ANSI code page, as the C runtime would.
#[cfg(windows)]
fn ansi_to_path(bytes: &[u8]) -> Result<PathBuf, LoadError> {
    use std::os::windows::ffi::OsStringExt;
    use windows::Win32::Globalization::{MultiByteToWideChar, CP_ACP, MULTI_BYTE_TO_WIDE_CHAR_FLAGS};

    if bytes.is_empty() {
        return Ok(PathBuf::new());
    }

    let flags = MULTI_BYTE_TO_WIDE_CHAR_FLAGS(0);
    let len = unsafe { MultiByteToWideChar(CP_ACP, flags, bytes, None) };
    if len <= 0 {
        return Err(LoadError::InvalidPath);
    }

    let mut wide = vec![0u16; len as usize];
    let written = unsafe { MultiByteToWideChar(CP_ACP, flags, bytes, Some(&mut wide)) };
    if written <= 0 {
        return Err(LoadError::InvalidPath);
    }
    wide.truncate(written as usize);
    Ok(PathBuf::from(std::ffi::OsString::from_wide(&wide)))
}

/// Load the SDK from `path` and resolve its symbols.
///
/// Returns `true` only if the library opened and every symbol resolved. A
/// library with missing symbols stays loaded and its resolved functions work.
///
/// A null `path` keeps whatever is loaded and reports [`mdkloader_isLoaded`].
///
/// ## Safety
/// - `path` must be either null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn mdkloader_load(path: *const c_char) -> bool {
    guard("mdkloader_load", || false, || {
        if std::env::var_os(LOG_ENV).is_some() {
            logging::init();
        }

        let path = match unsafe { path_from_c(path) } {
            Ok(path) => path,
            Err(LoadError::NullPath) => return global::is_loaded(),
            Err(err) => {
                error!("{err}");
                return false;
            }
        };
        global::load(path).is_ok()
    })
}

/// `true` if a library is loaded and every symbol resolved.
#[no_mangle]
pub extern "C" fn mdkloader_isLoaded() -> bool {
    guard("mdkloader_isLoaded", || false, global::is_loaded)
}

/// The loaded SDK's packed version, or the header version.
#[no_mangle]
pub extern "C" fn mdkloader_version() -> c_int {
    guard("mdkloader_version", || mdk_sys::MDK_VERSION, global::version)
}

/// Unload the SDK. Functions return their fallbacks afterwards.
#[no_mangle]
pub extern "C" fn mdkloader_cleanup() {
    guard("mdkloader_cleanup", || (), global::cleanup)
}

macro_rules! export_forwarders {
    ($(
        $group:ident {
            $( fn $name:ident ( $($arg:ident : $ty:ty),* ) -> $ret:ty = $fallback:expr; )*
        }
    )*) => {
        $($(
            #[doc = concat!("Exported `", stringify!($name), "`, forwarded to the loaded SDK.")]
            ///
            /// ## Safety
            /// Same contract as the SDK function.
            #[no_mangle]
            #[allow(clippy::unused_unit)]
            pub unsafe extern "C" fn $name($($arg: $ty),*) -> $ret {
                guard(stringify!($name), || $fallback, || unsafe { global::$name($($arg),*) })
            }
        )*)*
    };
}

mdk_sys::for_each_symbol!(export_forwarders);
