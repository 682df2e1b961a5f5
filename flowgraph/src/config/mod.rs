pub mod layout;
pub mod log;
pub mod view;

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

pub use layout::LayoutConfig;
pub use log::LoggingConfig;
pub use view::ViewConfig;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub view: ViewConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        let view = &self.view;

        if !(layout.alpha_decay > 0.0 && layout.alpha_decay < 1.0) {
            return Err(ConfigError::InvalidValue(format!(
                "layout.alpha_decay must be in (0, 1), got {}",
                layout.alpha_decay
            )));
        }
        if !(layout.velocity_decay >= 0.0 && layout.velocity_decay <= 1.0) {
            return Err(ConfigError::InvalidValue(format!(
                "layout.velocity_decay must be in [0, 1], got {}",
                layout.velocity_decay
            )));
        }
        if layout.alpha_min <= 0.0 {
            return Err(ConfigError::InvalidValue("layout.alpha_min must be positive".to_string()));
        }
        if layout.charge_distance_min < 0.0 || layout.charge_distance_max <= layout.charge_distance_min {
            return Err(ConfigError::InvalidValue(format!(
                "layout.charge_distance_min ({}) must be non-negative and below charge_distance_max ({})",
                layout.charge_distance_min, layout.charge_distance_max
            )));
        }
        if layout.max_ticks == 0 || layout.max_ticks_per_frame == 0 {
            return Err(ConfigError::InvalidValue("layout tick limits must be positive".to_string()));
        }
        if !(view.min_scale > 0.0 && view.min_scale <= view.max_scale) {
            return Err(ConfigError::InvalidValue(format!(
                "view scale range [{}, {}] is empty",
                view.min_scale, view.max_scale
            )));
        }

        Ok(())
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::OpenFileError {
        path: path.display().to_string(),
        source,
    })?;
    let config: Config = toml::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}

/// Like [`load_config`], but a missing file yields the defaults.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("config::{}::not_found::using_defaults", path.display());
        return Ok(Config::default());
    }
    load_config(path)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config(
            r#"
            [layout]
            link_distance = 120.0

            [view]
            max_scale = 4.0
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.layout.link_distance, 120.0);
        assert_eq!(config.layout.charge_strength, -200.0);
        assert_eq!(config.view.max_scale, 4.0);
        assert_eq!(config.view.min_scale, 0.5);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_or_default(dir.path().join("Config.toml")).unwrap();
        assert_eq!(config, Config::default());

        assert!(matches!(
            load_config(dir.path().join("Config.toml")),
            Err(ConfigError::OpenFileError { .. })
        ));
    }

    #[test]
    fn rejects_inverted_scale_range() {
        let file = write_config("[view]\nmin_scale = 2.0\nmax_scale = 1.0\n");
        assert!(matches!(load_config(file.path()), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn rejects_malformed_toml() {
        let file = write_config("[layout\n");
        assert!(matches!(load_config(file.path()), Err(ConfigError::ParseError(_))));
    }
}
