//! In-app log sink.
//!
//! The terminal belongs to the UI while the game runs, so log records are kept in a small ring
//! buffer and the footer shows the newest one instead of printing to standard output.

use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use color_eyre::eyre::{eyre, Result};
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Number of records kept before the oldest ones are dropped.
///
/// The footer only ever shows the newest record, so this is a small safety margin for bursts of
/// trace output during playback rather than a history meant to be browsed.
pub const DEFAULT_CAPACITY: usize = 32;

/// Process-wide logger installed by [`init`].
static LOGGER: OnceLock<AppLogger> = OnceLock::new();

/// One captured log record.
///
/// This structure holds an owned copy of everything the footer needs from a [`Record`], since the
/// record itself only lives for the duration of the [`Log::log`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Severity of the record, used to pick the color the footer shows it in.
    pub level: Level,
    /// Formatted message.
    pub text: String,
    /// Full module path the record came from, or `unknown` when the record carries none.
    pub source: String,
}

impl Message {
    /// Last segment of the module path the record came from.
    ///
    /// This function strips the crate and parent modules from [`source`](Message::source), so a
    /// record from `labyrintree::solver` reads as `solver` in the footer.
    pub fn module(&self) -> &str {
        self.source.rsplit("::").next().unwrap_or(&self.source)
    }
}

/// Logger keeping the most recent records in memory.
///
/// This structure implements the `log` facade's [`Log`] trait on top of a bounded queue. While the
/// game runs, the terminal belongs to Ratatui and anything written to standard output would tear
/// the frame, so records are kept here and drawn by the UI instead.
#[derive(Debug)]
pub struct AppLogger {
    /// Most verbose level that is recorded.
    max_level: LevelFilter,
    /// Maximum number of records kept.
    ///
    /// Once the queue is full, the oldest record is dropped for every new one. A capacity of zero
    /// keeps nothing.
    capacity: usize,
    /// Records, newest at the back.
    messages: Mutex<VecDeque<Message>>,
}

impl AppLogger {
    /// Creates a logger recording up to `max_level` and keeping `capacity` records.
    pub const fn new(max_level: LevelFilter, capacity: usize) -> Self {
        Self {
            max_level,
            capacity,
            messages: Mutex::new(VecDeque::new()),
        }
    }

    /// Locks the buffer, recovering it if a writer panicked mid-record.
    fn messages(&self) -> MutexGuard<'_, VecDeque<Message>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// This function returns a copy of the newest record, if any was kept. The UI calls it once per
    /// frame to fill the footer.
    pub fn latest(&self) -> Option<Message> {
        self.messages().back().cloned()
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) || self.capacity == 0 {
            return;
        }

        let mut messages = self.messages();
        while messages.len() >= self.capacity {
            let _ = messages.pop_front();
        }
        messages.push_back(Message {
            level: record.level(),
            text: record.args().to_string(),
            source: record.module_path().unwrap_or("unknown").to_owned(),
        });
    }

    fn flush(&self) {}
}

/// Installs the in-app logger as the global `log` backend.
///
/// This function creates the process-wide [`AppLogger`] on first use and hands it to the `log`
/// facade, so every `log` macro in the crate ends up in the ring buffer the footer reads from. The
/// maximum level is applied to the facade as well, which keeps filtered records from even being
/// formatted.
///
/// # Errors
///
/// Returns an error if another logger was installed first. The `log` crate's own error type is
/// converted here because it only implements [`std::error::Error`] with that crate's `std` feature.
pub fn init(max_level: LevelFilter) -> Result<&'static AppLogger> {
    let logger = LOGGER.get_or_init(|| AppLogger::new(max_level, DEFAULT_CAPACITY));
    log::set_logger(logger).map_err(|err| eyre!("failed to install logger: {err}"))?;
    log::set_max_level(max_level);

    Ok(logger)
}

/// This function returns the installed logger, or `None` if [`init`] never ran, as in unit tests
/// and library use without the binary.
pub fn logger() -> Option<&'static AppLogger> {
    LOGGER.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feeds one record straight into `logger`.
    fn record(logger: &AppLogger, level: Level, text: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .module_path(Some("labyrintree::tests"))
                .args(format_args!("{text}"))
                .build(),
        );
    }

    /// Texts of the kept records, newest first.
    fn kept_texts(logger: &AppLogger) -> Vec<String> {
        logger
            .messages()
            .iter()
            .rev()
            .map(|message| message.text.clone())
            .collect()
    }

    #[test]
    fn test_records_newest_last() {
        let logger = AppLogger::new(LevelFilter::Info, 4);

        record(&logger, Level::Info, "first");
        record(&logger, Level::Warn, "second");

        assert_eq!(
            logger.latest(),
            Some(Message {
                level: Level::Warn,
                text: "second".to_owned(),
                source: "labyrintree::tests".to_owned(),
            })
        );
        let texts = kept_texts(&logger);
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[test]
    fn test_filters_by_level() {
        let logger = AppLogger::new(LevelFilter::Info, 4);

        record(&logger, Level::Debug, "hidden");
        record(&logger, Level::Trace, "hidden too");

        assert!(logger.latest().is_none());
    }

    #[test]
    fn test_drops_oldest_beyond_capacity() {
        let logger = AppLogger::new(LevelFilter::Trace, 2);

        for text in ["one", "two", "three"] {
            record(&logger, Level::Info, text);
        }

        let texts = kept_texts(&logger);
        assert_eq!(texts, vec!["three", "two"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let logger = AppLogger::new(LevelFilter::Trace, 0);

        record(&logger, Level::Error, "lost");

        assert!(kept_texts(&logger).is_empty());
    }

    #[test]
    fn test_module_is_last_path_segment() {
        let logger = AppLogger::new(LevelFilter::Info, 4);
        record(&logger, Level::Info, "ready");

        let message = logger.latest().expect("one record was kept");

        assert_eq!(message.module(), "tests");
        let bare = Message {
            source: "unknown".to_owned(),
            ..message
        };
        assert_eq!(bare.module(), "unknown");
    }

    #[test]
    fn test_second_install_is_reported() {
        let first = init(LevelFilter::Info);
        let second = init(LevelFilter::Info);

        assert!(first.is_ok(), "no other test installs a global logger");
        let error = second.expect_err("the global logger can only be set once");
        assert!(error.to_string().contains("failed to install logger"));
        assert!(logger().is_some());
    }
}
