//! Diagnostic shell for the FWA-Control logging setup.
//! Installs the platform logger, builds the subsystem logger registry and
//! lets you list labels, send a test record, or inspect the config.

mod config;
mod logger;
mod paths;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use fwa_control_core::{LoggerRegistry, Subsystem, error, info, warn};
use log::Level;

use crate::config::LoggingConfig;
use crate::paths::ConfigPaths;

#[derive(Parser)]
#[command(name = "fwa-control-log")]
#[command(about = "Inspect and exercise FWA-Control subsystem loggers", long_about = None)]
struct Cli {
    /// Logging config file (defaults to <config dir>/fwa-control/logging.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every subsystem with its logger label
    Labels,
    /// Send one record through a subsystem's logger
    Emit {
        #[arg(short, long, value_enum)]
        subsystem: SubsystemArg,
        #[arg(short, long, value_enum, default_value_t = LevelArg::Info)]
        level: LevelArg,
        message: String,
    },
    /// Print the effective logging configuration
    Config,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SubsystemArg {
    App,
    DeviceManager,
    XpcManager,
    XpcHandler,
    DriverInstaller,
    Settings,
}

impl From<SubsystemArg> for Subsystem {
    fn from(arg: SubsystemArg) -> Self {
        match arg {
            SubsystemArg::App => Subsystem::App,
            SubsystemArg::DeviceManager => Subsystem::DeviceManager,
            SubsystemArg::XpcManager => Subsystem::XpcManager,
            SubsystemArg::XpcHandler => Subsystem::XpcHandler,
            SubsystemArg::DriverInstaller => Subsystem::DriverInstaller,
            SubsystemArg::Settings => Subsystem::Settings,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LevelArg> for Level {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Error => Level::Error,
            LevelArg::Warn => Level::Warn,
            LevelArg::Info => Level::Info,
            LevelArg::Debug => Level::Debug,
            LevelArg::Trace => Level::Trace,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let paths = ConfigPaths::new(cli.config);

    // Nothing is installed behind the facade yet, so keep the error for later.
    let (config, load_error) = match LoggingConfig::load_with(&paths) {
        Ok(config) => (config, None),
        Err(e) => (LoggingConfig::default(), Some(e.to_string())),
    };

    if let Err(e) = logger::init_logger(&config) {
        eprintln!("Failed to install logger: {e}");
        return ExitCode::FAILURE;
    }

    let registry = Arc::new(LoggerRegistry::with_log_facade());
    registry.initialize_all();
    info!(registry.app(), "fwa-control-log starting");

    if let Some(e) = load_error {
        let log = registry.settings();
        error!(
            log,
            "Failed to load logging config from {:?}: {}",
            paths.config_path(),
            e
        );
        warn!(log, "Using default logging configuration");
    }

    let mut stdout = io::stdout().lock();
    let result = match cli.command {
        Commands::Labels => print_labels(&registry, &mut stdout),
        Commands::Emit {
            subsystem,
            level,
            message,
        } => {
            emit(&registry, subsystem.into(), level.into(), &message);
            Ok(())
        }
        Commands::Config => print_config(&config, &paths.config_path(), &mut stdout),
    };

    registry.flush();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(registry.app(), "Command failed: {}", e);
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn print_labels(registry: &LoggerRegistry, out: &mut impl Write) -> io::Result<()> {
    for (subsystem, handle) in registry.iter() {
        writeln!(out, "{}\t{}", subsystem, handle.label())?;
    }
    Ok(())
}

fn emit(registry: &LoggerRegistry, subsystem: Subsystem, level: Level, message: &str) {
    let handle = registry.get(subsystem);
    handle.log(level, format_args!("{message}"));
    handle.flush();
}

fn print_config(
    config: &LoggingConfig,
    path: &std::path::Path,
    out: &mut impl Write,
) -> io::Result<()> {
    let text = config.to_toml_string().map_err(io::Error::other)?;
    writeln!(out, "# {}", path.display())?;
    write!(out, "{}", text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fwa_control_core::MemoryBackend;
    use log::LevelFilter;

    #[test]
    fn labels_lists_all_subsystems() {
        let registry = LoggerRegistry::noop();
        let mut out = Vec::new();

        print_labels(&registry, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "App\tnet.mrmidi.fwa-control.App");
        assert_eq!(
            lines[3],
            "XPCNotificationHandler\tnet.mrmidi.fwa-control.XPCNotificationHandler"
        );
    }

    #[test]
    fn emit_goes_through_selected_subsystem() {
        let backend = Arc::new(MemoryBackend::new());
        let registry = LoggerRegistry::new(backend.clone());

        emit(
            &registry,
            SubsystemArg::DriverInstaller.into(),
            LevelArg::Warn.into(),
            "install pending",
        );

        let records = backend.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "net.mrmidi.fwa-control.DriverInstaller");
        assert_eq!(records[0].level, Level::Warn);
        assert_eq!(records[0].message, "install pending");
    }

    #[test]
    fn config_output_includes_path_and_overrides() {
        let mut config = LoggingConfig::default();
        config
            .subsystems
            .insert(Subsystem::DeviceManager, LevelFilter::Trace);
        let mut out = Vec::new();

        print_config(&config, std::path::Path::new("/tmp/logging.toml"), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("# /tmp/logging.toml\n"));
        assert!(text.contains("DeviceManager"));
    }

    #[test]
    fn cli_parses_emit() {
        let cli = Cli::try_parse_from([
            "fwa-control-log",
            "emit",
            "--subsystem",
            "xpc-handler",
            "--level",
            "debug",
            "hello",
        ])
        .unwrap();

        match cli.command {
            Commands::Emit {
                subsystem,
                level,
                message,
            } => {
                assert_eq!(Subsystem::from(subsystem), Subsystem::XpcHandler);
                assert_eq!(Level::from(level), Level::Debug);
                assert_eq!(message, "hello");
            }
            _ => panic!("expected emit"),
        }
    }

    #[test]
    fn cli_parses_config_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logging.toml");
        let cli = Cli::try_parse_from([
            "fwa-control-log",
            "--config",
            path.to_str().unwrap(),
            "labels",
        ])
        .unwrap();

        assert_eq!(cli.config.as_deref(), Some(path.as_path()));
        assert!(matches!(cli.command, Commands::Labels));
    }
}
