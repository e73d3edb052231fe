use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

/// Messages kept until the UI drains them
const BUFFER_LIMIT: usize = 100;

/// Routes `log` records into a buffer the log pane drains every frame.
pub struct TuiLogger {
    level: LevelFilter,
    log_buffer: Arc<Mutex<Vec<String>>>,
}

impl TuiLogger {
    pub fn new(level: LevelFilter) -> (Self, Arc<Mutex<Vec<String>>>) {
        let log_buffer = Arc::new(Mutex::new(Vec::new()));
        (
            TuiLogger {
                level,
                log_buffer: log_buffer.clone(),
            },
            log_buffer,
        )
    }

    /// Install as the global logger.
    pub fn install(level: LevelFilter) -> Result<Arc<Mutex<Vec<String>>>, log::SetLoggerError> {
        let (logger, log_buffer) = Self::new(level);
        log::set_boxed_logger(Box::new(logger)).map(|()| log::set_max_level(level))?;
        Ok(log_buffer)
    }
}

impl Log for TuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = match record.level() {
            Level::Error | Level::Warn => format!("{}: {}", record.level(), record.args()),
            _ => format!("{}", record.args()),
        };
        if let Ok(mut buffer) = self.log_buffer.lock() {
            buffer.push(msg);
            if buffer.len() > BUFFER_LIMIT {
                buffer.remove(0);
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(level: Level, msg: &str) -> Vec<String> {
        let (logger, buffer) = TuiLogger::new(LevelFilter::Info);
        logger.log(
            &Record::builder()
                .level(level)
                .args(format_args!("{msg}"))
                .build(),
        );
        let out = buffer.lock().unwrap().clone();
        out
    }

    #[test]
    fn test_info_is_plain() {
        assert_eq!(record(Level::Info, "Split hand 1"), vec!["Split hand 1"]);
    }

    #[test]
    fn test_warn_is_prefixed() {
        assert_eq!(record(Level::Warn, "Rejected"), vec!["WARN: Rejected"]);
    }

    #[test]
    fn test_debug_filtered_out() {
        assert!(record(Level::Debug, "noise").is_empty());
    }
}
