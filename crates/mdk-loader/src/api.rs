//! [`MdkApi`]: one opened SDK library and its resolved symbol table.

use std::ffi::{c_char, c_int, c_void, CString};
use std::fmt;
use std::path::{Path, PathBuf};

use libloading::Library;
use mdk_sys::pfn::RawSymbol;
use mdk_sys::*;
use tracing::{debug, info, warn};

use crate::error::LoadError;
use crate::logging::LogLevel;
use crate::options::LoaderOptions;

/// The SDK header that declares a symbol.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SymbolGroup {
    Global,
    MediaInfo,
    Player,
    VideoFrame,
}

impl SymbolGroup {
    pub const ALL: [SymbolGroup; 4] = [
        SymbolGroup::Global,
        SymbolGroup::MediaInfo,
        SymbolGroup::Player,
        SymbolGroup::VideoFrame,
    ];

    pub fn header(self) -> &'static str {
        match self {
            SymbolGroup::Global => "global.h",
            SymbolGroup::MediaInfo => "MediaInfo.h",
            SymbolGroup::Player => "Player.h",
            SymbolGroup::VideoFrame => "VideoFrame.h",
        }
    }
}

impl fmt::Display for SymbolGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub name: &'static str,
    pub group: SymbolGroup,
}

/// Look up `name` and reinterpret its address as the function pointer `T`.
///
/// # Safety
///
/// `T` must be the function pointer type the library actually exports under `name`.
unsafe fn lookup<T: Copy>(library: &Library, name: &'static str) -> Option<T> {
    debug_assert_eq!(std::mem::size_of::<T>(), std::mem::size_of::<RawSymbol>());

    let address = match unsafe { library.get::<RawSymbol>(name.as_bytes()) } {
        Ok(symbol) => *symbol,
        Err(err) => {
            warn!(symbol = name, "Failed to resolve symbol: {err}");
            return None;
        }
    };

    if address.is_null() {
        warn!(symbol = name, "Symbol resolved to a null address");
        return None;
    }

    Some(unsafe { std::mem::transmute_copy::<RawSymbol, T>(&address) })
}

macro_rules! define_api {
    ($(
        $group:ident {
            $( fn $name:ident ( $($arg:ident : $ty:ty),* ) -> $ret:ty = $fallback:expr; )*
        }
    )*) => { ::paste::paste! {
        /// Every resolved symbol, in resolution order.
        pub const SYMBOLS: &[SymbolInfo] = &[
            $($( SymbolInfo { name: stringify!($name), group: SymbolGroup::$group }, )*)*
        ];

        /// An opened SDK library and its symbol table.
        ///
        /// Each SDK export has a forwarding method of the same name and
        /// signature. Forwarders of unresolved symbols return the fallback
        /// documented on them. Dropping the value unloads the library.
        #[allow(non_snake_case)]
        pub struct MdkApi {
            $($( pub(crate) $name: Option<mdk_sys::pfn::[<PFN_ $name>]>, )*)*
            path: PathBuf,
            _library: Library,
        }

        impl MdkApi {
            /// Build the symbol table for an already opened library.
            ///
            /// Missing symbols are logged and left unresolved.
            pub fn resolve(library: Library, path: impl Into<PathBuf>) -> Self {
                Self {
                    $($( $name: unsafe { lookup::<mdk_sys::pfn::[<PFN_ $name>]>(&library, stringify!($name)) }, )*)*
                    path: path.into(),
                    _library: library,
                }
            }

            /// Names of the symbols that could not be resolved.
            pub fn missing(&self) -> Vec<&'static str> {
                let mut missing = Vec::new();
                $($(
                    if self.$name.is_none() {
                        missing.push(stringify!($name));
                    }
                )*)*
                missing
            }

            /// True if every symbol declared by `group`'s header resolved.
            pub fn group_complete(&self, group: SymbolGroup) -> bool {
                match group {
                    $( SymbolGroup::$group => true $( && self.$name.is_some() )*, )*
                }
            }

            /// True if the symbol called `name` resolved.
            pub fn has_symbol(&self, name: &str) -> bool {
                match name {
                    $($( stringify!($name) => self.$name.is_some(), )*)*
                    _ => false,
                }
            }

            $($(
                #[doc = concat!("Forward to `", stringify!($name), "`.")]
                ///
                #[doc = concat!("Returns `", stringify!($fallback), "` if the symbol is unresolved.")]
                ///
                /// # Safety
                ///
                /// Same contract as the SDK function.
                #[allow(non_snake_case, clippy::unused_unit)]
                pub unsafe fn $name(&self, $($arg: $ty),*) -> $ret {
                    match self.$name {
                        Some(f) => unsafe { f($($arg),*) },
                        None => $fallback,
                    }
                }
            )*)*
        }
    } };
}

mdk_sys::for_each_symbol!(define_api);

impl MdkApi {
    /// Open the library at `path` and resolve its symbols.
    ///
    /// Succeeds even if some symbols are missing; see [`MdkApi::require_complete`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let library = open(path)?;
        info!(path = %path.display(), "The MDK library has been loaded successfully");
        Ok(Self::resolve(library, path))
    }

    /// Try every candidate from `options` in order and load the first that opens.
    pub fn load_with(options: &LoaderOptions) -> Result<Self, LoadError> {
        if let Some(path) = &options.path {
            return Self::load(path);
        }

        let tried = options.candidates();
        for candidate in &tried {
            match open(candidate) {
                Ok(library) => {
                    info!(path = %candidate.display(), "The MDK library has been loaded successfully");
                    return Ok(Self::resolve(library, candidate));
                }
                Err(err) => debug!("Skipping candidate: {err}"),
            }
        }

        Err(LoadError::NotFound { tried })
    }

    /// Turn a partially resolved table into an error.
    pub fn require_complete(self) -> Result<Self, LoadError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(self)
        } else {
            Err(LoadError::MissingSymbols(missing))
        }
    }

    /// True if every symbol resolved.
    pub fn is_complete(&self) -> bool {
        SymbolGroup::ALL.iter().all(|&group| self.group_complete(group))
    }

    /// The file the library was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Packed SDK version, or the header version if `MDK_version` is missing.
    pub fn version(&self) -> c_int {
        unsafe { self.MDK_version() }
    }

    /// `(major, minor, micro)` of [`MdkApi::version`].
    pub fn version_triple(&self) -> (c_int, c_int, c_int) {
        let v = self.version();
        (MDK_version_major(v), MDK_version_minor(v), MDK_version_micro(v))
    }

    pub fn set_log_level(&self, level: LogLevel) {
        unsafe { self.MDK_setLogLevel(level.into()) }
    }

    /// The SDK's log level, `None` if it reports a level unknown to this crate.
    pub fn log_level(&self) -> Option<LogLevel> {
        LogLevel::try_from(unsafe { self.MDK_logLevel() }).ok()
    }

    /// Set a process-wide SDK option.
    pub fn set_global_option(&self, key: &str, value: GlobalOption<'_>) -> Result<(), LoadError> {
        let key = CString::new(key)?;
        match value {
            GlobalOption::Str(value) => {
                let value = CString::new(value)?;
                unsafe { self.MDK_setGlobalOptionString(key.as_ptr(), value.as_ptr()) }
            }
            GlobalOption::Int(value) => unsafe { self.MDK_setGlobalOptionInt32(key.as_ptr(), value) },
            GlobalOption::Ptr(value) => unsafe { self.MDK_setGlobalOptionPtr(key.as_ptr(), value) },
        }
        Ok(())
    }

    /// Duplicate `value` with the SDK's allocator.
    ///
    /// Returns `Ok(None)` if `MDK_strdup` is unavailable. The caller owns the
    /// returned string and must free it the way the SDK documents.
    pub fn strdup(&self, value: &str) -> Result<Option<*mut c_char>, LoadError> {
        let value = CString::new(value)?;
        let dup = unsafe { self.MDK_strdup(value.as_ptr()) };
        Ok((!dup.is_null()).then_some(dup))
    }

    /// Tell the SDK the caller's GL context is gone, so GL resources are not
    /// released against it.
    pub fn foreign_gl_context_destroyed(&self) {
        unsafe { self.MDK_foreignGLContextDestroyed() }
    }

    /// Store the Android `JavaVM*` for the SDK and return the previous one.
    ///
    /// # Safety
    ///
    /// `vm` must be null or a valid `JavaVM*` for the life of the process.
    pub unsafe fn set_java_vm(&self, vm: *mut c_void) -> *mut c_void {
        unsafe { self.MDK_javaVM(vm) }
    }
}

impl fmt::Debug for MdkApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MdkApi")
            .field("path", &self.path)
            .field("missing", &self.missing())
            .finish_non_exhaustive()
    }
}

impl Drop for MdkApi {
    fn drop(&mut self) {
        debug!(path = %self.path.display(), "Unloading the MDK library");
    }
}

/// A value for [`MdkApi::set_global_option`].
#[derive(Debug, Copy, Clone)]
pub enum GlobalOption<'a> {
    Str(&'a str),
    Int(i32),
    Ptr(*mut c_void),
}

fn open(path: &Path) -> Result<Library, LoadError> {
    // RTLD_LAZY | RTLD_LOCAL on Unix, LoadLibraryExW on Windows.
    unsafe { Library::new(path) }.map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
impl MdkApi {
    /// A table over the running process, which exports none of the SDK
    /// symbols. Tests plug fakes into the fields directly.
    #[cfg(unix)]
    pub(crate) fn for_tests() -> Self {
        Self::resolve(libloading::os::unix::Library::this().into(), "<process>")
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};

    static LEVEL: AtomicI32 = AtomicI32::new(0);

    unsafe extern "C" fn fake_version() -> c_int {
        MDK_version_int(0, 29, 1)
    }

    unsafe extern "C" fn fake_set_log_level(level: MDK_LogLevel) {
        LEVEL.store(level.0, Ordering::SeqCst);
    }

    unsafe extern "C" fn fake_log_level() -> MDK_LogLevel {
        MDK_LogLevel(LEVEL.load(Ordering::SeqCst))
    }

    #[test]
    fn unresolved_symbols_return_fallbacks() {
        let api = MdkApi::for_tests();

        assert!(!api.is_complete());
        assert_eq!(api.missing().len(), SYMBOLS.len());
        assert_eq!(api.version(), MDK_VERSION);
        assert_eq!(unsafe { api.MDK_logLevel() }, MDK_LogLevel::Debug);
        assert!(unsafe { api.MDK_javaVM(std::ptr::null_mut()) }.is_null());
        assert!(unsafe { api.mdkPlayerAPI_new() }.is_null());
        assert!(!unsafe { api.MDK_MediaMetadata(std::ptr::null(), std::ptr::null_mut()) });
        assert_eq!(api.strdup("x").ok().flatten(), None);

        // void forwarders are no-ops.
        api.set_log_level(LogLevel::Info);
        api.foreign_gl_context_destroyed();
        api.set_global_option("videoout.clear_on_stop", GlobalOption::Int(1))
            .expect("valid key");
    }

    #[test]
    fn resolved_symbols_are_called() {
        let mut api = MdkApi::for_tests();
        api.MDK_version = Some(fake_version);
        api.MDK_setLogLevel = Some(fake_set_log_level);
        api.MDK_logLevel = Some(fake_log_level);

        assert_eq!(api.version_triple(), (0, 29, 1));
        api.set_log_level(LogLevel::Warning);
        assert_eq!(api.log_level(), Some(LogLevel::Warning));
        assert!(api.has_symbol("MDK_version"));
        assert!(!api.has_symbol("MDK_strdup"));
        assert!(!api.has_symbol("not_a_symbol"));
        assert!(!api.missing().contains(&"MDK_logLevel"));
    }

    #[test]
    fn unknown_sdk_log_level_maps_to_none() {
        unsafe extern "C" fn future_log_level() -> MDK_LogLevel {
            MDK_LogLevel(42)
        }

        let mut api = MdkApi::for_tests();
        api.MDK_logLevel = Some(future_log_level);
        assert_eq!(api.log_level(), None);
    }

    #[test]
    fn groups_report_completeness_independently() {
        let mut api = MdkApi::for_tests();
        assert!(!api.group_complete(SymbolGroup::Player));

        unsafe extern "C" fn new_player() -> *mut mdkPlayerAPI {
            std::ptr::null_mut()
        }
        unsafe extern "C" fn delete_player(_: *mut *mut mdkPlayerAPI) {}
        unsafe extern "C" fn gl_destroyed() {}

        api.mdkPlayerAPI_new = Some(new_player);
        api.mdkPlayerAPI_delete = Some(delete_player);
        api.MDK_foreignGLContextDestroyed = Some(gl_destroyed);

        assert!(api.group_complete(SymbolGroup::Player));
        assert!(!api.group_complete(SymbolGroup::VideoFrame));
        assert!(!api.is_complete());
    }

    #[test]
    fn interior_nul_is_rejected() {
        let api = MdkApi::for_tests();
        let err = api
            .set_global_option("bad\0key", GlobalOption::Str("v"))
            .unwrap_err();
        assert!(matches!(err, LoadError::InvalidString(_)));
    }

    #[test]
    fn table_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MdkApi>();
    }

    #[test]
    fn symbol_table_matches_sys_names() {
        let names: Vec<_> = SYMBOLS.iter().map(|s| s.name).collect();
        assert_eq!(names, mdk_sys::pfn::SYMBOL_NAMES);
        assert_eq!(
            SYMBOLS.iter().filter(|s| s.group == SymbolGroup::Global).count(),
            9
        );
    }
}
