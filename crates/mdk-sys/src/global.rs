//! Declarations from `global.h`: version, log levels and the log handler.

use std::ffi::{c_char, c_int, c_void};

// =====================================================================
// Version
// =====================================================================

/// Major version of the headers these declarations mirror.
pub const MDK_MAJOR: c_int = 0;
/// Minor version of the headers these declarations mirror.
pub const MDK_MINOR: c_int = 8;
/// Micro version of the headers these declarations mirror.
pub const MDK_MICRO: c_int = 1;

/// Packed header version, `major << 16 | minor << 8 | micro`.
///
/// Returned by version forwarders when the loaded library does not export
/// `MDK_version`.
pub const MDK_VERSION: c_int = MDK_version_int(MDK_MAJOR, MDK_MINOR, MDK_MICRO);

pub const fn MDK_version_int(major: c_int, minor: c_int, micro: c_int) -> c_int {
    (major << 16) | (minor << 8) | micro
}

pub const fn MDK_version_major(v: c_int) -> c_int {
    (v >> 16) & 0xff
}

pub const fn MDK_version_minor(v: c_int) -> c_int {
    (v >> 8) & 0xff
}

pub const fn MDK_version_micro(v: c_int) -> c_int {
    v & 0xff
}

// =====================================================================
// Logging
// =====================================================================

/// Log level of the SDK.
///
/// A transparent integer rather than a Rust enum: the library may hand back
/// levels newer than these headers and that must not be undefined behaviour.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MDK_LogLevel(pub c_int);

impl MDK_LogLevel {
    pub const Off: Self = Self(0);
    pub const Error: Self = Self(1);
    pub const Warning: Self = Self(2);
    pub const Info: Self = Self(3);
    pub const Debug: Self = Self(4);
    pub const All: Self = Self(5);
}

/// Log callback invoked by the SDK from any of its threads.
pub type mdkLogCallback =
    unsafe extern "C" fn(level: MDK_LogLevel, msg: *const c_char, opaque: *mut c_void);

/// Log handler passed by value to `MDK_setLogHandler`.
///
/// A null `cb` turns SDK logging off.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct mdkLogHandler {
    pub cb: Option<mdkLogCallback>,
    pub opaque: *mut c_void,
}

impl Default for mdkLogHandler {
    fn default() -> Self {
        Self {
            cb: None,
            opaque: std::ptr::null_mut(),
        }
    }
}
