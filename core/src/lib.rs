pub mod backend;
pub mod loggers;
mod macros;

pub use backend::{CapturedRecord, LogBackend, LogFacade, MemoryBackend, NoopBackend};
pub use loggers::{LABEL_NAMESPACE, LoggerHandle, LoggerRegistry, Subsystem};
