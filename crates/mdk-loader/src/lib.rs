//! Runtime loader for the MDK media SDK.
//!
//! The SDK is never linked at build time. Instead its shared library is opened
//! at runtime, a fixed list of exports is resolved by name, and thin
//! forwarders with the SDK's own signatures call through the resolved
//! pointers. A forwarder whose symbol is missing returns a fixed fallback
//! (null, `false`, the header version, ...) instead of crashing.
//!
//! # Overview
//!
//! - [`MdkApi`] owns one loaded library and its symbol table.
//! - [`global`] keeps one process-wide [`MdkApi`] behind free functions, for
//!   code written against the SDK's C API.
//! - [`LoaderOptions`] decides where the library is looked for.
//! - [`Player`], [`VideoFrame`] and [`MetadataSource`] are small safe wrappers
//!   over the raw forwarders.
//! - [`logging`] sets up `tracing` and bridges the SDK's own log output into it.
//!
//! Raw ABI types live in [`mdk_sys`], re-exported as [`sys`].

#![deny(unsafe_op_in_unsafe_fn)]

pub mod api;
pub mod error;
pub mod global;
pub mod logging;
pub mod metadata;
pub mod objects;
pub mod options;

pub use api::{GlobalOption, MdkApi, SymbolGroup, SymbolInfo, SYMBOLS};
pub use error::LoadError;
pub use logging::LogLevel;
pub use metadata::MetadataSource;
pub use objects::{Player, VideoFrame};
pub use options::LoaderOptions;

pub use mdk_sys as sys;
