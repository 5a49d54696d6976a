//! Stderr logger for pipeline hosts and examples.
//!
//! Library code only ever talks to the `log` facade; hosts with their own
//! sink can ignore this module. The logger here is tuned for debugging
//! per-frame input processing: every record carries the elapsed time in
//! whole milliseconds (frames are short, so sub-second resolution matters)
//! and the emitting module, which separates table-construction noise from
//! per-event stage output.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

struct StageLogger {
    level: LevelFilter,
    started: Instant,
}

impl StageLogger {
    fn format(&self, record: &Record) -> String {
        let millis = self.started.elapsed().as_millis();
        // Errors and warnings name the module they come from so a malformed
        // config entry is attributable; chattier levels stay compact.
        match record.level() {
            Level::Error | Level::Warn => format!(
                "{millis:>6}ms {:<5} {}: {}",
                record.level(),
                record.target(),
                record.args()
            ),
            _ => format!("{millis:>6}ms {:<5} {}", record.level(), record.args()),
        }
    }
}

impl Log for StageLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(std::io::stderr(), "{}", self.format(record));
        }
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<StageLogger> = OnceLock::new();

/// Install the stderr logger with the given level filter.
///
/// Idempotent: after the first successful installation further calls are
/// no-ops.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StageLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}
