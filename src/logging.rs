//! Optional file logging.
//!
//! The terminal belongs to the game, so log records can only go to a file.
//! Without `--log` no logger is installed and the `log` macros are no-ops.

use crate::error::{AppError, Result};
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l:<5} {t} - {m}{n}";

/// Build the log4rs config for a single file appender.
pub fn file_config(path: &Path, level: LevelFilter) -> Result<Config> {
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .append(false)
        .build(path)
        .map_err(|source| AppError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;

    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)))
        .build(Root::builder().appender("file").build(level))?;
    Ok(config)
}

/// Install the global logger writing to `path`.
pub fn init_file_logger(path: &Path) -> Result<()> {
    let config = file_config(path, LevelFilter::Debug)?;
    log4rs::init_config(config)?;
    log::info!(
        "logging to {} (build {} {})",
        path.display(),
        crate::build_info::BUILD_COMMIT,
        crate::build_info::BUILD_DATE
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_config_creates_log_file() {
        let path = std::env::temp_dir().join(format!(
            "flappy-biry-log-test-{}.log",
            std::process::id()
        ));
        let config = file_config(&path, LevelFilter::Info).unwrap();
        assert_eq!(config.root().level(), LevelFilter::Info);
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_config_reports_bad_path() {
        // FileAppender creates missing parent dirs, but not underneath a file.
        let blocker = std::env::temp_dir().join(format!(
            "flappy-biry-blocker-{}",
            std::process::id()
        ));
        std::fs::write(&blocker, b"x").unwrap();
        let under_file = blocker.join("game.log");
        let err = file_config(&under_file, LevelFilter::Info).unwrap_err();
        assert!(matches!(err, AppError::LogFile { .. }));
        let _ = std::fs::remove_file(&blocker);
    }
}
