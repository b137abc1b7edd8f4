//! Reading metadata maps through the `*Metadata` exports.

use std::ffi::{c_char, CStr, CString};

use mdk_sys::{mdkAudioStreamInfo, mdkMediaInfo, mdkStringMapEntry, mdkVideoStreamInfo};

use crate::api::MdkApi;
use crate::error::LoadError;

/// Upper bound on entries read from one map, in case the SDK never ends iteration.
const MAX_ENTRIES: usize = 4096;

/// Which SDK object to read metadata from.
#[derive(Debug, Copy, Clone)]
pub enum MetadataSource {
    Media(*const mdkMediaInfo),
    AudioStream(*const mdkAudioStreamInfo),
    VideoStream(*const mdkVideoStreamInfo),
}

/// # Safety
///
/// `ptr` must be a valid NUL-terminated string.
unsafe fn lossy(ptr: *const c_char) -> String {
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

impl MdkApi {
    unsafe fn query_metadata(&self, source: MetadataSource, entry: &mut mdkStringMapEntry) -> bool {
        unsafe {
            match source {
                MetadataSource::Media(info) => self.MDK_MediaMetadata(info, entry),
                MetadataSource::AudioStream(info) => self.MDK_AudioStreamMetadata(info, entry),
                MetadataSource::VideoStream(info) => self.MDK_VideoStreamMetadata(info, entry),
            }
        }
    }

    /// Every `(key, value)` pair of `source`'s metadata, in SDK order.
    ///
    /// Empty if the matching export is unresolved.
    ///
    /// # Safety
    ///
    /// The pointer in `source` must be a live object owned by the SDK.
    pub unsafe fn metadata(&self, source: MetadataSource) -> Vec<(String, String)> {
        let mut entry = mdkStringMapEntry::default();
        let mut pairs = Vec::new();

        for _ in 0..MAX_ENTRIES {
            if !unsafe { self.query_metadata(source, &mut entry) } {
                break;
            }
            if entry.key.is_null() || entry.value.is_null() {
                continue;
            }
            pairs.push(unsafe { (lossy(entry.key), lossy(entry.value)) });
        }

        pairs
    }

    /// The value stored under `key`, if any.
    ///
    /// # Safety
    ///
    /// The pointer in `source` must be a live object owned by the SDK.
    pub unsafe fn metadata_value(
        &self,
        source: MetadataSource,
        key: &str,
    ) -> Result<Option<String>, LoadError> {
        let key = CString::new(key)?;
        let mut entry = mdkStringMapEntry {
            key: key.as_ptr(),
            ..mdkStringMapEntry::default()
        };

        if !unsafe { self.query_metadata(source, &mut entry) } || entry.value.is_null() {
            return Ok(None);
        }
        Ok(Some(unsafe { lossy(entry.value) }))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::ffi::c_void;

    const PAIRS: [(&CStr, &CStr); 3] = [
        (c"title", c"Big Buck Bunny"),
        (c"artist", c"Blender Foundation"),
        (c"comment", c"caf\xc3\xa9 \xff"),
    ];

    /// Iterates `PAIRS` with `priv_` holding the next index; a key with a null
    /// cursor is a lookup.
    unsafe extern "C" fn fake_media_metadata(_: *const mdkMediaInfo, entry: *mut mdkStringMapEntry) -> bool {
        let entry = unsafe { &mut *entry };

        if entry.priv_.is_null() && !entry.key.is_null() {
            let wanted = unsafe { CStr::from_ptr(entry.key) };
            return match PAIRS.iter().find(|(k, _)| *k == wanted) {
                Some((_, v)) => {
                    entry.value = v.as_ptr();
                    true
                }
                None => false,
            };
        }

        let index = entry.priv_ as usize;
        let Some((k, v)) = PAIRS.get(index) else {
            return false;
        };
        entry.key = k.as_ptr();
        entry.value = v.as_ptr();
        entry.priv_ = (index + 1) as *mut c_void;
        true
    }

    unsafe extern "C" fn endless_metadata(_: *const mdkVideoStreamInfo, entry: *mut mdkStringMapEntry) -> bool {
        let entry = unsafe { &mut *entry };
        entry.key = c"k".as_ptr();
        entry.value = c"v".as_ptr();
        true
    }

    #[test]
    fn iterates_every_pair() {
        let mut api = MdkApi::for_tests();
        api.MDK_MediaMetadata = Some(fake_media_metadata);

        let pairs = unsafe { api.metadata(MetadataSource::Media(std::ptr::null())) };
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], ("title".to_string(), "Big Buck Bunny".to_string()));
        assert_eq!(pairs[1].1, "Blender Foundation");
        assert_eq!(pairs[2].1, "café \u{fffd}");
    }

    #[test]
    fn looks_up_single_key() {
        let mut api = MdkApi::for_tests();
        api.MDK_MediaMetadata = Some(fake_media_metadata);
        let source = MetadataSource::Media(std::ptr::null());

        let value = unsafe { api.metadata_value(source, "artist") }.expect("valid key");
        assert_eq!(value.as_deref(), Some("Blender Foundation"));

        let value = unsafe { api.metadata_value(source, "album") }.expect("valid key");
        assert_eq!(value, None);
    }

    #[test]
    fn unresolved_export_yields_nothing() {
        let api = MdkApi::for_tests();
        let pairs = unsafe { api.metadata(MetadataSource::AudioStream(std::ptr::null())) };
        assert!(pairs.is_empty());
    }

    #[test]
    fn runaway_iteration_is_capped() {
        let mut api = MdkApi::for_tests();
        api.MDK_VideoStreamMetadata = Some(endless_metadata);
        let pairs = unsafe { api.metadata(MetadataSource::VideoStream(std::ptr::null())) };
        assert_eq!(pairs.len(), MAX_ENTRIES);
    }
}
