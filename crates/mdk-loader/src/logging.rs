//! `tracing` setup and the bridge from the SDK's log callback into it.

use std::ffi::{c_char, c_void, CStr};
use std::str::FromStr;

use mdk_sys::{mdkLogHandler, MDK_LogLevel};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use once_cell::sync::OnceCell;
use tracing::{debug, error, info, trace, warn, Level};
use tracing_subscriber::EnvFilter;

use crate::api::MdkApi;

/// `tracing` target used for messages coming from the SDK itself.
pub const SDK_TARGET: &str = "mdk";

static INIT: OnceCell<()> = OnceCell::new();

/// Install a `fmt` subscriber on stderr filtered by `RUST_LOG` (default `info`).
///
/// Only the first call does anything. If the application already installed a
/// global subscriber that one is kept.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// SDK log level.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive)]
#[repr(i32)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warning = 2,
    Info = 3,
    Debug = 4,
    All = 5,
}

impl LogLevel {
    /// The `tracing` level SDK messages of this level are emitted at.
    pub fn to_tracing(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warning => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::All => Some(Level::TRACE),
        }
    }
}

impl From<LogLevel> for MDK_LogLevel {
    fn from(level: LogLevel) -> Self {
        MDK_LogLevel(level as i32)
    }
}

impl TryFrom<MDK_LogLevel> for LogLevel {
    type Error = MDK_LogLevel;

    fn try_from(raw: MDK_LogLevel) -> Result<Self, MDK_LogLevel> {
        LogLevel::from_i32(raw.0).ok_or(raw)
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "all" | "trace" => Ok(LogLevel::All),
            _ => Err(format!("unknown log level `{s}`")),
        }
    }
}

/// Level SDK messages are re-emitted at. Unknown levels and `Off` go to `TRACE`.
fn event_level(level: MDK_LogLevel) -> Level {
    LogLevel::try_from(level)
        .ok()
        .and_then(LogLevel::to_tracing)
        .unwrap_or(Level::TRACE)
}

unsafe extern "C" fn forward_to_tracing(level: MDK_LogLevel, msg: *const c_char, _opaque: *mut c_void) {
    if msg.is_null() {
        return;
    }
    let msg = unsafe { CStr::from_ptr(msg) }.to_string_lossy();
    let msg = msg.trim_end();

    match event_level(level) {
        Level::ERROR => error!(target: SDK_TARGET, "{msg}"),
        Level::WARN => warn!(target: SDK_TARGET, "{msg}"),
        Level::INFO => info!(target: SDK_TARGET, "{msg}"),
        Level::DEBUG => debug!(target: SDK_TARGET, "{msg}"),
        _ => trace!(target: SDK_TARGET, "{msg}"),
    }
}

/// A log handler that re-emits SDK messages through `tracing`.
pub fn tracing_log_handler() -> mdkLogHandler {
    mdkLogHandler {
        cb: Some(forward_to_tracing),
        opaque: std::ptr::null_mut(),
    }
}

impl MdkApi {
    /// Route the SDK's log output into `tracing` under [`SDK_TARGET`].
    pub fn forward_logs_to_tracing(&self) {
        unsafe { self.MDK_setLogHandler(tracing_log_handler()) }
    }

    /// Silence the SDK's log output.
    pub fn disable_logs(&self) {
        unsafe { self.MDK_setLogHandler(mdkLogHandler::default()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_convert_both_ways() {
        for raw in 0..=5 {
            let level = LogLevel::try_from(MDK_LogLevel(raw)).expect("known level");
            assert_eq!(MDK_LogLevel::from(level).0, raw);
        }
        assert_eq!(LogLevel::try_from(MDK_LogLevel(6)), Err(MDK_LogLevel(6)));
        assert_eq!(LogLevel::try_from(MDK_LogLevel::Warning), Ok(LogLevel::Warning));
    }

    #[test]
    fn levels_parse_from_cli_spelling() {
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!("all".parse::<LogLevel>(), Ok(LogLevel::All));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn off_has_no_tracing_level() {
        assert_eq!(LogLevel::Off.to_tracing(), None);
        assert_eq!(LogLevel::Error.to_tracing(), Some(Level::ERROR));
        assert_eq!(LogLevel::All.to_tracing(), Some(Level::TRACE));
    }

    #[test]
    fn sdk_messages_use_the_public_level_mapping() {
        for raw in 1..=5 {
            let level = LogLevel::try_from(MDK_LogLevel(raw)).expect("known level");
            assert_eq!(Some(event_level(MDK_LogLevel(raw))), level.to_tracing());
        }
        assert_eq!(event_level(MDK_LogLevel::Off), Level::TRACE);
        assert_eq!(event_level(MDK_LogLevel(42)), Level::TRACE);
    }

    #[test]
    fn handler_tolerates_null_and_unknown_levels() {
        let handler = tracing_log_handler();
        let cb = handler.cb.expect("callback set");
        unsafe {
            cb(MDK_LogLevel::Info, std::ptr::null(), std::ptr::null_mut());
            cb(MDK_LogLevel(99), c"future level\n".as_ptr(), std::ptr::null_mut());
            cb(MDK_LogLevel::Error, c"decoder failed".as_ptr(), std::ptr::null_mut());
        }
    }

    #[test]
    fn init_is_idempotent() {
        init();
        init();
    }
}
