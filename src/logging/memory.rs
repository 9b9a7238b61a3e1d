//! In-memory logger for testing.
//!
//! `MemoryLogger` implements [`Logger`] and captures every message for later
//! assertion.
//!
//! # Example
//!
//! ```
//! use recipe_runner::logging::{LogLevel, Logger, MemoryLogger};
//!
//! let logger = MemoryLogger::new();
//! logger.info("Writing recipe to logs/login.json");
//!
//! assert!(logger.contains(LogLevel::Info, "login.json"));
//! assert!(logger.messages_at(LogLevel::Error).is_empty());
//! ```

use std::sync::Mutex;

use super::{LogLevel, Logger};

/// Logger that records messages instead of emitting them.
#[derive(Debug)]
pub struct MemoryLogger {
    min_level: LogLevel,
    records: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    /// Create a logger that records every level.
    pub fn new() -> Self {
        Self::with_min_level(LogLevel::Debug)
    }

    /// Create a logger that ignores messages below `min_level`.
    pub fn with_min_level(min_level: LogLevel) -> Self {
        Self {
            min_level,
            records: Mutex::new(Vec::new()),
        }
    }

    /// All recorded messages in order.
    pub fn records(&self) -> Vec<(LogLevel, String)> {
        self.lock().clone()
    }

    /// Messages recorded at exactly `level`.
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Whether any message at `level` contains `needle`.
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.lock()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(LogLevel, String)>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if self.is_enabled(level) {
            self.lock().push((level, message.to_string()));
        }
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let logger = MemoryLogger::new();
        logger.info("first");
        logger.error("second");

        assert_eq!(
            logger.records(),
            vec![
                (LogLevel::Info, "first".to_string()),
                (LogLevel::Error, "second".to_string()),
            ]
        );
    }

    #[test]
    fn min_level_filters_and_reports_enabled() {
        let logger = MemoryLogger::with_min_level(LogLevel::Info);
        logger.debug("hidden");
        logger.info("shown");

        assert!(!logger.is_enabled(LogLevel::Debug));
        assert!(logger.is_enabled(LogLevel::Warn));
        assert_eq!(logger.records().len(), 1);
    }

    #[test]
    fn contains_matches_level_and_substring() {
        let logger = MemoryLogger::new();
        logger.warn("silent mode is not enforced");

        assert!(logger.contains(LogLevel::Warn, "not enforced"));
        assert!(!logger.contains(LogLevel::Error, "not enforced"));
        assert!(!logger.contains(LogLevel::Warn, "something else"));
    }
}
