//! Logging setup for imgshelf.
//!
//! Events go to stdout and, when possible, are appended to the configured
//! log file. `RUST_LOG` directives are combined with the configured level.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::{Result, ShelfError};

fn parse_level(level: &str) -> Level {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::from_default_env().add_directive(parse_level(level).into())
}

/// Open the log file for appending, creating its folder first.
fn open_log_file(file: &Path) -> Result<File> {
    if let Some(dir) = file.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(file)?)
}

/// Initialize logging to stdout and the configured log file.
///
/// Fails if the log file cannot be opened or a global subscriber is
/// already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let log_file = Arc::new(open_log_file(Path::new(&config.file))?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout.and(log_file))
                .with_ansi(false),
        )
        .with(build_filter(&config.level))
        .try_init()
        .map_err(|e| ShelfError::Config(format!("logging already initialized: {e}")))
}

/// Initialize console-only logging.
///
/// Used when the log file cannot be opened. Does nothing if a subscriber is
/// already installed.
pub fn init_console_only(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(build_filter(level))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_parse_level_case_insensitive() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level(" Info "), Level::INFO);
        assert_eq!(parse_level("error"), Level::ERROR);
    }

    #[test]
    fn test_parse_level_warning_alias() {
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("warning"), Level::WARN);
    }

    #[test]
    fn test_parse_level_default() {
        assert_eq!(parse_level("verbose"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }

    #[test]
    fn test_open_log_file_creates_folder() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("logs").join("nested").join("imgshelf.log");

        open_log_file(&file).unwrap();

        assert!(file.is_file());
    }

    #[test]
    fn test_open_log_file_appends() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("imgshelf.log");

        writeln!(open_log_file(&file).unwrap(), "first").unwrap();
        writeln!(open_log_file(&file).unwrap(), "second").unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "first\nsecond\n");
    }
}
