//! One process-wide [`MdkApi`] behind free functions.
//!
//! This is the surface for code written against the SDK's C API: load once,
//! then call the forwarders below as if the SDK were linked. Every forwarder
//! returns its fallback while nothing is loaded.
//!
//! The installed table is swapped atomically. A call that is already running
//! holds its own reference, so [`cleanup`] or a reload never unmaps the
//! library under it.

use std::ffi::c_int;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use mdk_sys::MDK_VERSION;
use once_cell::sync::Lazy;
use tracing::{error, info, warn};

use crate::api::MdkApi;
use crate::error::LoadError;
use crate::options::LoaderOptions;

static API: Lazy<RwLock<Option<Arc<MdkApi>>>> = Lazy::new(|| RwLock::new(None));

fn install(api: Option<Arc<MdkApi>>) -> Option<Arc<MdkApi>> {
    let mut slot = API.write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *slot, api)
}

/// The currently installed table, if any.
pub fn api() -> Option<Arc<MdkApi>> {
    API.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Load the library at `path` and install it, replacing any previous one.
///
/// If the file opens but some symbols are missing the partial table is still
/// installed and [`LoadError::MissingSymbols`] is returned. If it does not
/// open, nothing is installed afterwards.
pub fn load(path: impl AsRef<Path>) -> Result<(), LoadError> {
    finish(MdkApi::load(path))
}

/// Like [`load`], locating the library through `options`.
pub fn load_with(options: &LoaderOptions) -> Result<(), LoadError> {
    finish(MdkApi::load_with(options))
}

fn finish(loaded: Result<MdkApi, LoadError>) -> Result<(), LoadError> {
    let api = match loaded {
        Ok(api) => api,
        Err(err) => {
            error!("{err}");
            install(None);
            return Err(err);
        }
    };

    let missing = api.missing();
    install(Some(Arc::new(api)));

    if missing.is_empty() {
        info!("All MDK symbols have been resolved successfully");
        Ok(())
    } else {
        let err = LoadError::MissingSymbols(missing);
        warn!("{err}");
        Err(err)
    }
}

/// True if a library is installed and every symbol resolved.
pub fn is_loaded() -> bool {
    api().is_some_and(|api| api.is_complete())
}

/// Packed version of the installed SDK, or [`MDK_VERSION`].
pub fn version() -> c_int {
    api().map_or(MDK_VERSION, |api| api.version())
}

/// Uninstall the library. It is unloaded once the last in-flight call returns.
pub fn cleanup() {
    if install(None).is_some() {
        info!("The MDK library has been released");
    }
}

macro_rules! define_forwarders {
    ($(
        $group:ident {
            $( fn $name:ident ( $($arg:ident : $ty:ty),* ) -> $ret:ty = $fallback:expr; )*
        }
    )*) => {
        $($(
            #[doc = concat!("Forward to `", stringify!($name), "` of the installed library.")]
            ///
            /// # Safety
            ///
            /// Same contract as the SDK function.
            #[allow(non_snake_case, clippy::unused_unit)]
            pub unsafe fn $name($($arg: $ty),*) -> $ret {
                match api() {
                    Some(api) => unsafe { api.$name($($arg),*) },
                    None => $fallback,
                }
            }
        )*)*
    };
}

mdk_sys::for_each_symbol!(define_forwarders);
