//! Owned SDK objects that are deleted through the loaded library on drop.

use std::ffi::c_int;
use std::ptr::NonNull;

use mdk_sys::{mdkPlayerAPI, mdkVideoFrameAPI, MDK_PixelFormat};

use crate::api::MdkApi;

/// A player created by `mdkPlayerAPI_new`.
///
/// Borrows the [`MdkApi`] it came from so the library outlives it.
#[derive(Debug)]
pub struct Player<'a> {
    api: &'a MdkApi,
    raw: NonNull<mdkPlayerAPI>,
}

impl<'a> Player<'a> {
    /// `None` if the export is missing or the SDK returned null.
    pub fn new(api: &'a MdkApi) -> Option<Self> {
        let raw = NonNull::new(unsafe { api.mdkPlayerAPI_new() })?;
        Some(Self { api, raw })
    }

    /// The SDK's player function table.
    pub fn as_ptr(&self) -> *mut mdkPlayerAPI {
        self.raw.as_ptr()
    }
}

impl Drop for Player<'_> {
    fn drop(&mut self) {
        let mut raw = self.raw.as_ptr();
        unsafe { self.api.mdkPlayerAPI_delete(&mut raw) }
    }
}

/// A video frame created by `mdkVideoFrameAPI_new`.
#[derive(Debug)]
pub struct VideoFrame<'a> {
    api: &'a MdkApi,
    raw: NonNull<mdkVideoFrameAPI>,
    width: c_int,
    height: c_int,
    format: MDK_PixelFormat,
}

impl<'a> VideoFrame<'a> {
    /// `None` if the export is missing or the SDK returned null.
    pub fn new(api: &'a MdkApi, width: c_int, height: c_int, format: MDK_PixelFormat) -> Option<Self> {
        let raw = NonNull::new(unsafe { api.mdkVideoFrameAPI_new(width, height, format) })?;
        Some(Self {
            api,
            raw,
            width,
            height,
            format,
        })
    }

    pub fn as_ptr(&self) -> *mut mdkVideoFrameAPI {
        self.raw.as_ptr()
    }

    pub fn dimensions(&self) -> (c_int, c_int) {
        (self.width, self.height)
    }

    pub fn format(&self) -> MDK_PixelFormat {
        self.format
    }
}

impl Drop for VideoFrame<'_> {
    fn drop(&mut self) {
        let mut raw = self.raw.as_ptr();
        unsafe { self.api.mdkVideoFrameAPI_delete(&mut raw) }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static LIVE_FRAMES: AtomicUsize = AtomicUsize::new(0);

    #[repr(C)]
    struct FakeFrame {
        width: c_int,
        height: c_int,
        format: MDK_PixelFormat,
    }

    unsafe extern "C" fn new_frame(w: c_int, h: c_int, f: MDK_PixelFormat) -> *mut mdkVideoFrameAPI {
        LIVE_FRAMES.fetch_add(1, Ordering::SeqCst);
        Box::into_raw(Box::new(FakeFrame { width: w, height: h, format: f })).cast()
    }

    unsafe extern "C" fn delete_frame(frame: *mut *mut mdkVideoFrameAPI) {
        let frame = unsafe { &mut *frame };
        drop(unsafe { Box::from_raw(frame.cast::<FakeFrame>()) });
        *frame = std::ptr::null_mut();
        LIVE_FRAMES.fetch_sub(1, Ordering::SeqCst);
    }

    #[test]
    fn frame_is_deleted_on_drop() {
        let mut api = MdkApi::for_tests();
        api.mdkVideoFrameAPI_new = Some(new_frame);
        api.mdkVideoFrameAPI_delete = Some(delete_frame);

        {
            let frame = VideoFrame::new(&api, 1920, 1080, MDK_PixelFormat::NV12).expect("frame");
            assert_eq!(LIVE_FRAMES.load(Ordering::SeqCst), 1);
            assert_eq!(frame.dimensions(), (1920, 1080));
            assert_eq!(frame.format(), MDK_PixelFormat::NV12);

            let fake = unsafe { &*frame.as_ptr().cast::<FakeFrame>() };
            assert_eq!((fake.width, fake.height, fake.format), (1920, 1080, MDK_PixelFormat::NV12));
        }
        assert_eq!(LIVE_FRAMES.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn missing_exports_create_nothing() {
        let api = MdkApi::for_tests();
        assert!(Player::new(&api).is_none());
        assert!(VideoFrame::new(&api, 16, 16, MDK_PixelFormat::RGBA).is_none());
    }
}
