//! Logging backends that logger handles write through.
//! The registry never formats or filters; everything goes to a `LogBackend`.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use log::Level;

/// A logging sink provider: announces labels and receives records for them.
pub trait LogBackend: Send + Sync {
    /// Called once per label, the first time its handle is created.
    fn register(&self, label: &'static str);

    fn emit(&self, label: &'static str, level: Level, args: fmt::Arguments<'_>);

    fn flush(&self) {}
}

/// Forwards records to whatever `log` implementation the process installed,
/// using the handle's label as the record target.
///
/// With `oslog` the target becomes the os_log category, so every subsystem
/// shows up as its own category under the application's subsystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacade;

impl LogBackend for LogFacade {
    // The installed logger creates its per-target state lazily on the first record.
    fn register(&self, _label: &'static str) {}

    fn emit(&self, label: &'static str, level: Level, args: fmt::Arguments<'_>) {
        log::log!(target: label, level, "{}", args);
    }

    fn flush(&self) {
        log::logger().flush();
    }
}

/// Discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBackend;

impl LogBackend for NoopBackend {
    fn register(&self, _label: &'static str) {}

    fn emit(&self, _label: &'static str, _level: Level, _args: fmt::Arguments<'_>) {}
}

/// A record captured by [`MemoryBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    pub label: &'static str,
    pub level: Level,
    pub message: String,
}

/// Keeps registrations and records in memory so tests can assert on them.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    registrations: Mutex<Vec<&'static str>>,
    records: Mutex<Vec<CapturedRecord>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels in the order they were registered.
    pub fn registrations(&self) -> Vec<&'static str> {
        lock(&self.registrations).clone()
    }

    pub fn registration_count(&self, label: &str) -> usize {
        lock(&self.registrations)
            .iter()
            .filter(|registered| **registered == label)
            .count()
    }

    pub fn records(&self) -> Vec<CapturedRecord> {
        lock(&self.records).clone()
    }

    /// Records emitted under a single label.
    pub fn records_for(&self, label: &str) -> Vec<CapturedRecord> {
        lock(&self.records)
            .iter()
            .filter(|record| record.label == label)
            .cloned()
            .collect()
    }
}

impl LogBackend for MemoryBackend {
    fn register(&self, label: &'static str) {
        lock(&self.registrations).push(label);
    }

    fn emit(&self, label: &'static str, level: Level, args: fmt::Arguments<'_>) {
        lock(&self.records).push(CapturedRecord {
            label,
            level,
            message: args.to_string(),
        });
    }
}

// A panicking test thread must not hide what the other threads captured.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    struct CaptureLogger {
        records: Mutex<Vec<(String, Level, String)>>,
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            lock(&self.records).push((
                record.target().to_string(),
                record.level(),
                record.args().to_string(),
            ));
        }

        fn flush(&self) {}
    }

    fn capture_logger() -> &'static CaptureLogger {
        static LOGGER: OnceLock<CaptureLogger> = OnceLock::new();
        let logger = LOGGER.get_or_init(|| CaptureLogger {
            records: Mutex::new(Vec::new()),
        });
        if log::set_logger(logger).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
        logger
    }

    #[test]
    fn log_facade_uses_label_as_target() {
        let logger = capture_logger();

        LogFacade.emit(
            "net.mrmidi.fwa-control.Settings",
            Level::Warn,
            format_args!("facade record {}", 42),
        );

        let records = lock(&logger.records);
        assert!(records.contains(&(
            "net.mrmidi.fwa-control.Settings".to_string(),
            Level::Warn,
            "facade record 42".to_string(),
        )));
    }

    #[test]
    fn memory_backend_captures_in_order() {
        let backend = MemoryBackend::new();
        backend.register("a.b.One");
        backend.register("a.b.Two");
        backend.emit("a.b.One", Level::Info, format_args!("first"));
        backend.emit("a.b.Two", Level::Error, format_args!("second {}", "record"));

        assert_eq!(backend.registrations(), vec!["a.b.One", "a.b.Two"]);
        assert_eq!(backend.registration_count("a.b.One"), 1);
        assert_eq!(backend.registration_count("a.b.Three"), 0);
        assert_eq!(
            backend.records_for("a.b.Two"),
            vec![CapturedRecord {
                label: "a.b.Two",
                level: Level::Error,
                message: "second record".to_string(),
            }]
        );
    }
}
