//! Where to look for the SDK's shared library.

use std::path::{Path, PathBuf};

/// Environment variable naming the library file, or a directory containing it.
pub const LIBRARY_PATH_ENV: &str = "MDK_LIBRARY_PATH";

/// File names the SDK ships under on the current platform, most specific first.
pub fn default_library_names() -> &'static [&'static str] {
    if cfg!(target_os = "windows") {
        &["mdk.dll"]
    } else if cfg!(target_os = "macos") {
        &["libmdk.dylib", "mdk.framework/mdk"]
    } else {
        &["libmdk.so.0", "libmdk.so"]
    }
}

/// Options for locating the SDK.
///
/// With an explicit [`path`](Self::path) nothing else is tried. Otherwise the
/// attempt order is: [`env_path`](Self::env_path), each of
/// [`search_dirs`](Self::search_dirs), then the bare platform names so the OS
/// loader's own search path applies.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    pub path: Option<PathBuf>,
    /// Captured from [`LIBRARY_PATH_ENV`] by [`LoaderOptions::from_env`].
    pub env_path: Option<PathBuf>,
    pub search_dirs: Vec<PathBuf>,
}

impl LoaderOptions {
    /// Default options with [`LIBRARY_PATH_ENV`] consulted.
    pub fn from_env() -> Self {
        Self {
            env_path: std::env::var_os(LIBRARY_PATH_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            ..Self::default()
        }
    }

    /// Options that only try `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    /// Ordered, de-duplicated list of paths to try.
    pub fn candidates(&self) -> Vec<PathBuf> {
        if let Some(path) = &self.path {
            return vec![path.clone()];
        }

        let names = default_library_names();
        let mut out = Vec::new();

        if let Some(env_path) = &self.env_path {
            if env_path.is_dir() {
                out.extend(in_dir(env_path, names));
            } else {
                out.push(env_path.clone());
            }
        }

        for dir in &self.search_dirs {
            out.extend(in_dir(dir, names));
        }

        out.extend(names.iter().map(PathBuf::from));

        let mut seen = std::collections::HashSet::new();
        out.retain(|p| seen.insert(p.clone()));
        out
    }
}

fn in_dir<'a>(dir: &'a Path, names: &'a [&str]) -> impl Iterator<Item = PathBuf> + 'a {
    names.iter().map(move |name| dir.join(name))
}
