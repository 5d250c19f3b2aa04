use chrono::Local;
use log::{LevelFilter, Metadata, Record};

/// Writes timestamped log records to stderr
pub struct CliLogger {
    level: LevelFilter,
}

impl CliLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Map `-v` / `--quiet` flags to a level
    pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
        match (quiet, verbose) {
            (true, _) => LevelFilter::Error,
            (false, 0) => LevelFilter::Warn,
            (false, 1) => LevelFilter::Info,
            (false, _) => LevelFilter::Debug,
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!(
            "[{} {:<5}] {}",
            Local::now().format("%H:%M:%S"),
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log};

    fn enabled(logger: &CliLogger, level: Level) -> bool {
        logger.enabled(&Metadata::builder().level(level).build())
    }

    #[test]
    fn test_quiet_logger_only_shows_errors() {
        let logger = CliLogger::new(CliLogger::level_for(0, true));
        assert!(enabled(&logger, Level::Error));
        assert!(!enabled(&logger, Level::Warn));
        assert!(!enabled(&logger, Level::Info));
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(CliLogger::level_for(0, false), LevelFilter::Warn);
        assert_eq!(CliLogger::level_for(1, false), LevelFilter::Info);
        assert_eq!(CliLogger::level_for(3, false), LevelFilter::Debug);
        assert_eq!(CliLogger::level_for(2, true), LevelFilter::Error);
    }
}
