use std::path::PathBuf;

/// Where the logging config lives: `--config` if given, otherwise
/// `<config dir>/fwa-control/logging.toml`.
pub struct ConfigPaths {
    config_path: PathBuf,
    explicit: bool,
}

impl ConfigPaths {
    pub fn new(config_override: Option<PathBuf>) -> Self {
        match config_override {
            Some(config_path) => Self {
                config_path,
                explicit: true,
            },
            None => Self {
                config_path: default_config_path(),
                explicit: false,
            },
        }
    }

    #[cfg(test)]
    pub fn with_default_path(config_path: PathBuf) -> Self {
        Self {
            config_path,
            explicit: false,
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// True when the path came from the command line.
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fwa-control")
        .join("logging.toml")
}
