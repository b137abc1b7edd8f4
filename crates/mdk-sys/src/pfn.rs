//! The fixed list of SDK exports resolved at runtime, and a function-pointer
//! typedef for each.
//!
//! [`for_each_symbol!`] is the single source of truth for the list. It hands
//! every symbol, grouped by the header that declares it, to a callback macro:
//!
//! ```text
//! Group {
//!     fn name(arg: Type, ...) -> Ret = fallback;
//!     ...
//! }
//! ```
//!
//! `fallback` is what a forwarder returns when the symbol could not be
//! resolved. The loader, the process-global facade and the C shim are all
//! generated from it.

use std::ffi::c_void;

/// Invoke `$callback!` with the complete symbol list.
#[macro_export]
macro_rules! for_each_symbol {
    ($callback:ident) => {
        $callback! {
            Global {
                fn MDK_javaVM(value: *mut ::std::ffi::c_void) -> *mut ::std::ffi::c_void
                    = ::std::ptr::null_mut();
                fn MDK_setLogLevel(value: $crate::MDK_LogLevel) -> () = ();
                fn MDK_logLevel() -> $crate::MDK_LogLevel = $crate::MDK_LogLevel::Debug;
                fn MDK_setLogHandler(value: $crate::mdkLogHandler) -> () = ();
                fn MDK_setGlobalOptionString(
                    key: *const ::std::ffi::c_char,
                    value: *const ::std::ffi::c_char
                ) -> () = ();
                fn MDK_setGlobalOptionInt32(
                    key: *const ::std::ffi::c_char,
                    value: ::std::ffi::c_int
                ) -> () = ();
                fn MDK_setGlobalOptionPtr(
                    key: *const ::std::ffi::c_char,
                    value: *mut ::std::ffi::c_void
                ) -> () = ();
                fn MDK_strdup(value: *const ::std::ffi::c_char) -> *mut ::std::ffi::c_char
                    = ::std::ptr::null_mut();
                fn MDK_version() -> ::std::ffi::c_int = $crate::MDK_VERSION;
            }
            MediaInfo {
                fn MDK_AudioStreamCodecParameters(
                    asi: *const $crate::mdkAudioStreamInfo,
                    acp: *mut $crate::mdkAudioCodecParameters
                ) -> () = ();
                fn MDK_AudioStreamMetadata(
                    asi: *const $crate::mdkAudioStreamInfo,
                    sme: *mut $crate::mdkStringMapEntry
                ) -> bool = false;
                fn MDK_VideoStreamCodecParameters(
                    vsi: *const $crate::mdkVideoStreamInfo,
                    vcp: *mut $crate::mdkVideoCodecParameters
                ) -> () = ();
                fn MDK_VideoStreamMetadata(
                    vsi: *const $crate::mdkVideoStreamInfo,
                    sme: *mut $crate::mdkStringMapEntry
                ) -> bool = false;
                fn MDK_MediaMetadata(
                    mi: *const $crate::mdkMediaInfo,
                    sme: *mut $crate::mdkStringMapEntry
                ) -> bool = false;
            }
            Player {
                fn mdkPlayerAPI_new() -> *mut $crate::mdkPlayerAPI = ::std::ptr::null_mut();
                fn mdkPlayerAPI_delete(value: *mut *mut $crate::mdkPlayerAPI) -> () = ();
                fn MDK_foreignGLContextDestroyed() -> () = ();
            }
            VideoFrame {
                fn mdkVideoFrameAPI_new(
                    w: ::std::ffi::c_int,
                    h: ::std::ffi::c_int,
                    f: $crate::MDK_PixelFormat
                ) -> *mut $crate::mdkVideoFrameAPI = ::std::ptr::null_mut();
                fn mdkVideoFrameAPI_delete(value: *mut *mut $crate::mdkVideoFrameAPI) -> () = ();
            }
        }
    };
}

macro_rules! define_pfns {
    ($(
        $group:ident {
            $( fn $name:ident ( $($arg:ident : $ty:ty),* ) -> $ret:ty = $fallback:expr; )*
        }
    )*) => {
        $($(
            ::paste::paste! {
                #[doc = concat!("Function pointer definition for `", stringify!($name), "`.")]
                pub type [<PFN_ $name>] = unsafe extern "C" fn($($arg: $ty),*) -> $ret;
            }
        )*)*

        /// Every symbol name, in resolution order.
        pub const SYMBOL_NAMES: &[&str] = &[$($(stringify!($name)),*),*];
    };
}

crate::for_each_symbol!(define_pfns);

/// Untyped symbol address, as returned by `dlsym`/`GetProcAddress`.
pub type RawSymbol = *mut c_void;
