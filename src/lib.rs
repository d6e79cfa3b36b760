use std::path::PathBuf;

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError};
use serde::Deserialize;

pub mod domain;
pub mod infrastructure;

#[derive(Clone, Debug, Deserialize)]
pub struct HotelierConfig {
    pub store: Store,
    pub logger: Logger,
}

impl HotelierConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(config::File::with_name("hotelier").required(false))
            .add_source(config::Environment::with_prefix("HOTELIER").separator("_"))
            .build()?
            .try_deserialize::<HotelierConfig>()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("store.directory", "data")?
            .set_default("logger.level", "INFO")
    }
}

/// レコードの保存先
#[derive(Clone, Debug, Deserialize)]
pub struct Store {
    pub directory: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Logger {
    pub level: Level,
}

#[derive(Clone, Debug, Deserialize)]
pub enum Level {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl From<&Level> for tracing::Level {
    fn from(value: &Level) -> Self {
        match value {
            Level::TRACE => tracing::Level::TRACE,
            Level::DEBUG => tracing::Level::DEBUG,
            Level::INFO => tracing::Level::INFO,
            Level::WARN => tracing::Level::WARN,
            Level::ERROR => tracing::Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_into_tracing() {
        assert_eq!(tracing::Level::from(&Level::WARN), tracing::Level::WARN);
        assert_eq!(tracing::Level::from(&Level::TRACE), tracing::Level::TRACE);
    }

    #[test]
    fn test_config_defaults() {
        let config = HotelierConfig::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize::<HotelierConfig>()
            .unwrap();
        assert_eq!(config.store.directory, PathBuf::from("data"));
        assert!(matches!(config.logger.level, Level::INFO));
    }
}
