//! Declarations from `VideoFrame.h` used by the loader.

use std::ffi::c_int;

use crate::opaque_type;

opaque_type! {
    /// The SDK's video frame function table, created by `mdkVideoFrameAPI_new`.
    mdkVideoFrameAPI
}

/// Pixel format of a video frame.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MDK_PixelFormat(pub c_int);

impl MDK_PixelFormat {
    pub const Unknown: Self = Self(-1);
    pub const YUV420P: Self = Self(0);
    pub const NV12: Self = Self(1);
    pub const YUV422P: Self = Self(2);
    pub const YUV444P: Self = Self(3);
    pub const P010LE: Self = Self(4);
    pub const P016LE: Self = Self(5);
    pub const YUV420P10LE: Self = Self(6);
    pub const UYVY422: Self = Self(7);
    pub const RGB24: Self = Self(8);
    pub const RGBA: Self = Self(9);
    pub const RGBX: Self = Self(10);
    pub const BGRA: Self = Self(11);
    pub const BGRX: Self = Self(12);
    pub const RGB565LE: Self = Self(13);
    pub const RGB48LE: Self = Self(14);
    pub const GBRP: Self = Self(15);
    pub const GBRP10LE: Self = Self(16);
    pub const XYZ12LE: Self = Self(17);
    pub const YUVA420P: Self = Self(18);
    pub const BC1: Self = Self(19);
    pub const BC3: Self = Self(20);
    pub const RGBA64: Self = Self(21);
    pub const BGRA64: Self = Self(22);
    pub const RGBP16: Self = Self(23);
    pub const RGBPF32: Self = Self(24);
    pub const BGRAF32: Self = Self(25);
}

impl Default for MDK_PixelFormat {
    fn default() -> Self {
        Self::Unknown
    }
}
