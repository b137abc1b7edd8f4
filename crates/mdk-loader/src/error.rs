use std::ffi::NulError;
use std::path::PathBuf;

use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("The library path was null.")]
    NullPath,
    #[error("The library path could not be decoded.")]
    InvalidPath,
    #[error("Failed to load the MDK library {}.", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
    #[error("The MDK library was not found (tried {tried:?}).")]
    NotFound { tried: Vec<PathBuf> },
    #[error("Failed to resolve {} MDK symbol(s): {}.", .0.len(), .0.join(", "))]
    MissingSymbols(Vec<&'static str>),
    #[error("The string contained an interior NUL byte.")]
    InvalidString(#[from] NulError),
}

impl LoadError {
    /// True for the non-fatal case where the library opened but some exports
    /// are absent.
    pub fn is_partial(&self) -> bool {
        matches!(self, LoadError::MissingSymbols(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_symbols_message_lists_names() {
        let err = LoadError::MissingSymbols(vec!["MDK_version", "MDK_strdup"]);
        assert_eq!(
            err.to_string(),
            "Failed to resolve 2 MDK symbol(s): MDK_version, MDK_strdup."
        );
        assert!(err.is_partial());
        assert!(!LoadError::NullPath.is_partial());
    }
}
