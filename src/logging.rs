//! File logging for the terminal front end.
//!
//! The TUI owns stdout and stderr, so log records go to a file instead.
//! Nothing is logged unless [`init_file_logger`] is called.

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::{fs::File, path::Path};

/// Route `log` records to `path`, truncating it.
///
/// The level defaults to `info` and can be overridden with `RUST_LOG`.
pub fn init_file_logger(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("Failed to install logger")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_logger_writes_to_file_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.log");

        init_file_logger(&path).unwrap();
        assert!(path.exists());

        // A second logger cannot replace the first
        assert!(init_file_logger(&dir.path().join("other.log")).is_err());
    }

    #[test]
    fn test_missing_directory_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("snake.log");

        let err = init_file_logger(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to create log file"));
    }
}
