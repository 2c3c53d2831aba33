//! Console Logger
//!
//! `log` backend writing to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line: JsValue = format_line(record.level(), record.target(), &record.args().to_string()).into();
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Calling twice keeps the first logger.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// `[LEVEL module] message`, with the crate prefix dropped from the target
fn format_line(level: Level, target: &str, message: &str) -> String {
    let module = target.split_once("::").map(|(_, rest)| rest).unwrap_or(target);
    format!("[{} {}] {}", level, module, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        assert_eq!(format_line(Level::Warn, "lab_ui::api::http", "GET /events failed"), "[WARN api::http] GET /events failed");
        assert_eq!(format_line(Level::Debug, "remote_collection", "stale"), "[DEBUG remote_collection] stale");
    }
}
