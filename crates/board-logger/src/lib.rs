//! Board Logger
//!
//! A `log::Log` implementation that writes `[LEVEL target] message` lines to
//! the browser console (stderr off wasm) and keeps the most recent records
//! in a bounded ring for the admin diagnostics panel.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use chrono::{DateTime, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Records kept when no capacity is given
pub const DEFAULT_CAPACITY: usize = 200;

/// One captured log line
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    pub fn line(&self) -> String {
        format!(
            "{} [{} {}] {}",
            self.at.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Bounded FIFO of log entries
#[derive(Debug)]
pub struct Ring {
    capacity: usize,
    entries: VecDeque<LogEntry>,
}

impl Ring {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}

struct BoardLogger {
    ring: Mutex<Ring>,
}

static LOGGER: OnceLock<BoardLogger> = OnceLock::new();

impl Log for BoardLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let entry = LogEntry {
            at: Utc::now(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        write_console(entry.level, &format!("[{} {}] {}", entry.level, entry.target, entry.message));
        if let Ok(mut ring) = self.ring.lock() {
            ring.push(entry);
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, line: &str) {
    eprintln!("{line}");
}

/// Install the logger; fails if another logger is already set
pub fn init_logger(level: LevelFilter, capacity: usize) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| BoardLogger {
        ring: Mutex::new(Ring::new(capacity)),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Entries currently held in the ring, oldest first
pub fn recent() -> Vec<LogEntry> {
    LOGGER
        .get()
        .and_then(|logger| logger.ring.lock().ok().map(|ring| ring.snapshot()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            at: Utc::now(),
            level: Level::Info,
            target: "menu_board".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_ring_drops_oldest() {
        let mut ring = Ring::new(2);
        ring.push(entry("a"));
        ring.push(entry("b"));
        ring.push(entry("c"));
        let messages: Vec<String> = ring.snapshot().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["b", "c"]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut ring = Ring::new(0);
        ring.push(entry("a"));
        ring.push(entry("b"));
        assert_eq!(ring.snapshot().len(), 1);
    }

    #[test]
    fn test_line_format() {
        let line = entry("loaded 3 items").line();
        assert!(line.ends_with("[INFO menu_board] loaded 3 items"));
    }

    #[test]
    fn test_logger_captures_records() {
        init_logger(LevelFilter::Debug, 8).unwrap();
        log::info!(target: "board_test", "hello ring");
        log::trace!(target: "board_test", "filtered out");
        let captured: Vec<String> = recent()
            .into_iter()
            .filter(|e| e.target == "board_test")
            .map(|e| e.message)
            .collect();
        assert_eq!(captured, vec!["hello ring"]);
    }
}
