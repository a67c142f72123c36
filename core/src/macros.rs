//! `log`-style macros that write through a [`LoggerHandle`](crate::LoggerHandle).
//!
//! ```ignore
//! use fwa_control_core::info;
//! info!(registry.device_manager(), "found {} devices", count);
//! ```

#[macro_export]
macro_rules! error {
    ($handle:expr, $($arg:tt)+) => {
        $handle.error(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warn {
    ($handle:expr, $($arg:tt)+) => {
        $handle.warn(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! info {
    ($handle:expr, $($arg:tt)+) => {
        $handle.info(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug {
    ($handle:expr, $($arg:tt)+) => {
        $handle.debug(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! trace {
    ($handle:expr, $($arg:tt)+) => {
        $handle.trace(format_args!($($arg)+))
    };
}
