//! Hardcoded MDK C API constants and C-repr structs.
//!
//! Nothing in this crate links against the SDK. Every declaration mirrors the
//! SDK's public C headers (`global.h`, `RenderAPI.h`, `MediaInfo.h`,
//! `Player.h`, `VideoFrame.h`) so values can cross a plugin boundary and be
//! handed to a dynamically loaded `mdk` library.
//!
//! Use [`mdk-loader`](https://docs.rs/mdk-loader) to actually open the library.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![deny(unsafe_op_in_unsafe_fn)]

/// Declares a zero-sized opaque C type that is only ever used behind a pointer.
macro_rules! opaque_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[repr(C)]
        pub struct $name {
            _data: [u8; 0],
            _marker: ::core::marker::PhantomData<(*mut u8, ::core::marker::PhantomPinned)>,
        }
    };
}

pub(crate) use opaque_type;

pub mod global;
pub mod media_info;
pub mod pfn;
pub mod player;
pub mod render_api;
pub mod video_frame;

pub use global::*;
pub use media_info::*;
pub use player::*;
pub use render_api::*;
pub use video_frame::*;
