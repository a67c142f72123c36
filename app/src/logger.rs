// Single responsibility: installing the platform logger behind the `log` facade.

use log::SetLoggerError;

use crate::config::LoggingConfig;

/// Installs os_log as the process logger. Each label becomes a category
/// under the `net.mrmidi.fwa-control` subsystem.
#[cfg(target_os = "macos")]
pub fn init_logger(config: &LoggingConfig) -> Result<(), SetLoggerError> {
    use fwa_control_core::LABEL_NAMESPACE;
    use oslog::OsLogger;

    let logger = config.subsystems.iter().fold(
        OsLogger::new(LABEL_NAMESPACE).level_filter(config.level),
        |logger, (subsystem, level)| logger.category_level_filter(subsystem.label(), *level),
    );
    logger.init()?;
    log::set_max_level(config.max_level());
    Ok(())
}

/// Installs env_logger as the process logger. `RUST_LOG` is applied on top
/// of the config file.
#[cfg(not(target_os = "macos"))]
pub fn init_logger(config: &LoggingConfig) -> Result<(), SetLoggerError> {
    let mut builder = env_builder(config);
    builder.parse_default_env();
    builder.try_init()
}

/// Global level plus one module filter per overridden label.
#[cfg(not(target_os = "macos"))]
fn env_builder(config: &LoggingConfig) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(config.level);
    for (subsystem, level) in &config.subsystems {
        builder.filter_module(subsystem.label(), *level);
    }
    builder
}
