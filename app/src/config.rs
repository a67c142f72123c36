//! Logging configuration for the backend installed at startup.
//! The shell decides where the file lives; see `paths.rs`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use fwa_control_core::Subsystem;
use log::{LevelFilter, debug, info};
use serde::{Deserialize, Serialize};

use crate::paths::ConfigPaths;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: LevelFilter,
    /// Per-subsystem overrides, keyed by component name (`DeviceManager`, ...).
    #[serde(default, with = "subsystem_levels")]
    pub subsystems: BTreeMap<Subsystem, LevelFilter>,
}

fn default_level() -> LevelFilter {
    LevelFilter::Info
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            subsystems: BTreeMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Load configuration from the provided paths.
    /// A missing default file is created; a missing `--config` file is an error.
    pub fn load_with(paths: &ConfigPaths) -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = paths.config_path();

        if !config_path.exists() {
            if paths.is_explicit() {
                return Err(format!("config file {:?} does not exist", config_path).into());
            }
            info!(
                "Logging config not found at {:?}, creating default config",
                config_path
            );
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        debug!("Loading logging config from {:?}", config_path);
        let content = fs::read_to_string(&config_path)?;
        let config = Self::from_toml_str(&content)?;

        info!(
            "Loaded logging config with {} subsystem overrides",
            config.subsystems.len()
        );
        Ok(config)
    }

    /// Save configuration, creating parent directories as needed.
    pub fn save_to(&self, config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(config_path, self.to_toml_string()?)?;

        info!("Saved logging config to {:?}", config_path);
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Level for a subsystem: its override if present, the global level otherwise.
    pub fn level_for(&self, subsystem: Subsystem) -> LevelFilter {
        self.subsystems
            .get(&subsystem)
            .copied()
            .unwrap_or(self.level)
    }

    /// Most verbose level any subsystem may log at.
    pub fn max_level(&self) -> LevelFilter {
        self.subsystems.values().copied().fold(self.level, Ord::max)
    }
}

// Subsystems are written by component name so the file matches the labels.
mod subsystem_levels {
    use std::collections::BTreeMap;

    use fwa_control_core::Subsystem;
    use log::LevelFilter;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        levels: &BTreeMap<Subsystem, LevelFilter>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        levels
            .iter()
            .map(|(subsystem, level)| (subsystem.component(), *level))
            .collect::<BTreeMap<&str, LevelFilter>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<Subsystem, LevelFilter>, D::Error> {
        let raw = BTreeMap::<String, LevelFilter>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(name, level)| {
                Subsystem::from_component(&name)
                    .map(|subsystem| (subsystem, level))
                    .ok_or_else(|| D::Error::custom(format!("unknown subsystem `{name}`")))
            })
            .collect()
    }
}
