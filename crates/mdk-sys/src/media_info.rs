//! Declarations from `MediaInfo.h` used by the loader.
//!
//! Stream and codec descriptors are owned by the SDK and only reached through
//! pointers, so they are declared opaque here.

use std::ffi::{c_char, c_void};

use crate::opaque_type;

opaque_type!(mdkAudioStreamInfo);
opaque_type!(mdkVideoStreamInfo);
opaque_type!(mdkMediaInfo);
opaque_type!(mdkAudioCodecParameters);
opaque_type!(mdkVideoCodecParameters);

/// Cursor for the `*Metadata` queries.
///
/// Start with a zeroed entry to iterate every pair; `priv_` is the SDK's
/// iteration state. Set `key` before the first call to look up one value.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct mdkStringMapEntry {
    pub key: *const c_char,
    pub value: *const c_char,
    pub priv_: *mut c_void,
}

impl Default for mdkStringMapEntry {
    fn default() -> Self {
        Self {
            key: std::ptr::null(),
            value: std::ptr::null(),
            priv_: std::ptr::null_mut(),
        }
    }
}
