//! Opens a real shared object that exports none of the SDK symbols.
#![cfg(all(target_os = "linux", target_env = "gnu"))]

use mdk_loader::sys::MDK_VERSION;
use mdk_loader::{global, LoadError, MdkApi, SymbolGroup, SYMBOLS};

const NOT_MDK: &str = "libc.so.6";

#[test]
fn instance_load_keeps_partial_table() {
    let api = MdkApi::load(NOT_MDK).expect("libc opens");

    assert!(!api.is_complete());
    assert_eq!(api.missing().len(), SYMBOLS.len());
    for group in SymbolGroup::ALL {
        assert!(!api.group_complete(group), "{group} should be incomplete");
    }
    assert_eq!(api.version(), MDK_VERSION);
    assert_eq!(api.path(), std::path::Path::new(NOT_MDK));

    match api.require_complete() {
        Err(LoadError::MissingSymbols(names)) => assert_eq!(names.len(), SYMBOLS.len()),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn global_load_installs_partial_table_until_cleanup() {
    let err = global::load(NOT_MDK).unwrap_err();
    assert!(err.is_partial());

    let installed = global::api().expect("partial table installed");
    assert!(!global::is_loaded());
    assert_eq!(global::version(), MDK_VERSION);

    global::cleanup();
    assert!(global::api().is_none());

    // The snapshot taken before cleanup is still usable.
    assert_eq!(installed.version(), MDK_VERSION);
}
