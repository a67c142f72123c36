//! Named logger handles for every FWA-Control subsystem.
//!
//! A `LoggerRegistry` is built once at startup and handed to subsystems as
//! `Arc<LoggerRegistry>`. Each handle is created on first access, or all at
//! once through [`LoggerRegistry::initialize_all`], and is never replaced.

use std::fmt;
use std::sync::{Arc, OnceLock};

use log::Level;

use crate::backend::{LogBackend, LogFacade, NoopBackend};

/// Reverse-DNS prefix shared by every label.
pub const LABEL_NAMESPACE: &str = "net.mrmidi.fwa-control";

const SUBSYSTEM_COUNT: usize = 6;

/// The application subsystems that own a log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subsystem {
    App,
    DeviceManager,
    XpcManager,
    XpcHandler,
    DriverInstaller,
    Settings,
}

impl Subsystem {
    pub const ALL: [Subsystem; SUBSYSTEM_COUNT] = [
        Subsystem::App,
        Subsystem::DeviceManager,
        Subsystem::XpcManager,
        Subsystem::XpcHandler,
        Subsystem::DriverInstaller,
        Subsystem::Settings,
    ];

    /// Last component of the label. Also the key used in the logging config.
    pub const fn component(self) -> &'static str {
        match self {
            Subsystem::App => "App",
            Subsystem::DeviceManager => "DeviceManager",
            Subsystem::XpcManager => "XPCManager",
            Subsystem::XpcHandler => "XPCNotificationHandler",
            Subsystem::DriverInstaller => "DriverInstaller",
            Subsystem::Settings => "Settings",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Subsystem::App => "net.mrmidi.fwa-control.App",
            Subsystem::DeviceManager => "net.mrmidi.fwa-control.DeviceManager",
            Subsystem::XpcManager => "net.mrmidi.fwa-control.XPCManager",
            Subsystem::XpcHandler => "net.mrmidi.fwa-control.XPCNotificationHandler",
            Subsystem::DriverInstaller => "net.mrmidi.fwa-control.DriverInstaller",
            Subsystem::Settings => "net.mrmidi.fwa-control.Settings",
        }
    }

    pub fn from_component(component: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|subsystem| subsystem.component() == component)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component())
    }
}

/// A named logging sink. Cheap to clone; clones write to the same sink.
#[derive(Clone)]
pub struct LoggerHandle {
    label: &'static str,
    backend: Arc<dyn LogBackend>,
}

impl LoggerHandle {
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        self.backend.emit(self.label, level, args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, args);
    }

    pub fn flush(&self) {
        self.backend.flush();
    }

    /// True when both handles write to the same label on the same backend.
    pub fn same_sink(&self, other: &LoggerHandle) -> bool {
        self.label == other.label && Arc::ptr_eq(&self.backend, &other.backend)
    }
}

impl fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerHandle")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Owns one `LoggerHandle` per subsystem.
///
/// Handle creation is one-shot per subsystem: concurrent first access runs
/// the backend registration exactly once and every caller sees the same
/// handle afterwards.
pub struct LoggerRegistry {
    backend: Arc<dyn LogBackend>,
    handles: [OnceLock<LoggerHandle>; SUBSYSTEM_COUNT],
}

impl LoggerRegistry {
    pub fn new(backend: Arc<dyn LogBackend>) -> Self {
        Self {
            backend,
            handles: std::array::from_fn(|_| OnceLock::new()),
        }
    }

    /// Registry over the process-wide `log` facade.
    pub fn with_log_facade() -> Self {
        Self::new(Arc::new(LogFacade))
    }

    /// Registry whose handles discard everything.
    pub fn noop() -> Self {
        Self::new(Arc::new(NoopBackend))
    }

    pub fn get(&self, subsystem: Subsystem) -> &LoggerHandle {
        self.handles[subsystem.index()].get_or_init(|| {
            let label = subsystem.label();
            self.backend.register(label);
            LoggerHandle {
                label,
                backend: Arc::clone(&self.backend),
            }
        })
    }

    /// Creates every handle now so later accessor calls never wait on
    /// first-time initialization.
    pub fn initialize_all(&self) {
        for subsystem in Subsystem::ALL {
            self.get(subsystem);
        }
    }

    pub fn is_initialized(&self, subsystem: Subsystem) -> bool {
        self.handles[subsystem.index()].get().is_some()
    }

    /// All subsystems with their handles, initializing any that are missing.
    pub fn iter(&self) -> impl Iterator<Item = (Subsystem, &LoggerHandle)> + '_ {
        Subsystem::ALL
            .into_iter()
            .map(move |subsystem| (subsystem, self.get(subsystem)))
    }

    pub fn flush(&self) {
        self.backend.flush();
    }

    pub fn app(&self) -> &LoggerHandle {
        self.get(Subsystem::App)
    }

    pub fn device_manager(&self) -> &LoggerHandle {
        self.get(Subsystem::DeviceManager)
    }

    pub fn xpc_manager(&self) -> &LoggerHandle {
        self.get(Subsystem::XpcManager)
    }

    pub fn xpc_handler(&self) -> &LoggerHandle {
        self.get(Subsystem::XpcHandler)
    }

    pub fn driver_installer(&self) -> &LoggerHandle {
        self.get(Subsystem::DriverInstaller)
    }

    pub fn settings(&self) -> &LoggerHandle {
        self.get(Subsystem::Settings)
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let initialized: Vec<Subsystem> = Subsystem::ALL
            .into_iter()
            .filter(|subsystem| self.is_initialized(*subsystem))
            .collect();
        f.debug_struct("LoggerRegistry")
            .field("initialized", &initialized)
            .finish_non_exhaustive()
    }
}
