//! Load the MDK media SDK and report which exports resolved.
//!
//! Exit status: 0 when every symbol resolved, 1 when some are missing, 2 when
//! the library could not be opened.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use mdk_loader::{LoadError, LoaderOptions, LogLevel, MdkApi};

mod report;

use report::Report;

#[derive(Parser, Debug)]
#[command(version, about = "Load the MDK media SDK and report which exports resolved")]
struct Args {
    /// Library file to load. Skips every other location.
    #[arg(long, short)]
    library: Option<PathBuf>,

    /// Extra directory to search, may be repeated.
    #[arg(long = "search-dir", value_name = "DIR")]
    search_dirs: Vec<PathBuf>,

    /// Route the SDK's own log output through this tool's logger.
    #[arg(long)]
    forward_logs: bool,

    /// SDK log level (off, error, warning, info, debug, all).
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn loader_options(&self) -> LoaderOptions {
        let mut options = match &self.library {
            Some(path) => LoaderOptions::with_path(path),
            None => LoaderOptions::from_env(),
        };
        options.search_dirs.extend(self.search_dirs.iter().cloned());
        options
    }
}

fn main() -> anyhow::Result<ExitCode> {
    mdk_loader::logging::init();
    let args = Args::parse();

    let api = match MdkApi::load_with(&args.loader_options()) {
        Ok(api) => api,
        Err(err @ (LoadError::Open { .. } | LoadError::NotFound { .. })) => {
            tracing::error!("{err}");
            return Ok(ExitCode::from(2));
        }
        Err(err) => return Err(err).context("failed to load the MDK library"),
    };

    if args.forward_logs {
        api.forward_logs_to_tracing();
    }
    if let Some(level) = args.log_level {
        api.set_log_level(level);
    }

    let report = Report::new(&api);
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{json}");
    } else {
        print!("{report}");
    }

    Ok(if report.complete {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_library_ignores_environment() {
        let args = Args::parse_from(["mdk-probe", "--library", "/opt/libmdk.so", "--search-dir", "/x"]);
        let options = args.loader_options();
        assert_eq!(options.path.as_deref(), Some(std::path::Path::new("/opt/libmdk.so")));
        assert_eq!(options.env_path, None);
        assert_eq!(options.search_dirs, vec![PathBuf::from("/x")]);
    }

    #[test]
    fn log_level_flag_parses() {
        let args = Args::parse_from(["mdk-probe", "--log-level", "warning", "--json"]);
        assert_eq!(args.log_level, Some(LogLevel::Warning));
        assert!(args.json);
        assert!(Args::try_parse_from(["mdk-probe", "--log-level", "shouty"]).is_err());
    }
}
