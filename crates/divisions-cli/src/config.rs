use std::collections::HashMap;
use std::path::{Path, PathBuf};

use divisions_core::FuzzyOptions;
use serde::Deserialize;

/// Looked up in the working directory when `--config` is not given.
const DEFAULT_CONFIG: &str = "divisions";
const ENV_PREFIX: &str = "DIVISIONS";

#[derive(Debug, Deserialize, Default)]
pub struct DConfig {
    #[serde(default)]
    pub data: DDataConfig,
    #[serde(default)]
    pub fuzzy: FuzzyOptions,
    #[serde(default)]
    pub log: DLogConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct DDataConfig {
    pub input: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DLogConfig {
    pub default: Option<DLogLevel>,
    #[serde(flatten)]
    pub modules: HashMap<String, DLogLevel>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DLogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<DLogLevel> for log::LevelFilter {
    fn from(value: DLogLevel) -> log::LevelFilter {
        use log::LevelFilter;
        match value {
            DLogLevel::Off => LevelFilter::Off,
            DLogLevel::Error => LevelFilter::Error,
            DLogLevel::Warn => LevelFilter::Warn,
            DLogLevel::Info => LevelFilter::Info,
            DLogLevel::Debug => LevelFilter::Debug,
            DLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl DConfig {
    /// Layers, lowest priority first: built-in defaults, the TOML file,
    /// then `DIVISIONS_<SECTION>__<KEY>` env vars.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(p) => config_rs::File::from(p).required(true),
            None => config_rs::File::with_name(DEFAULT_CONFIG).required(false),
        };
        let config = config_rs::Config::builder()
            .add_source(file)
            .add_source(
                config_rs::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Install the global logger. `RUST_LOG` still wins over the file.
    pub fn init_logger(&self) {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(
            self.log
                .default
                .map(log::LevelFilter::from)
                .unwrap_or(log::LevelFilter::Warn),
        );
        for (module, level) in &self.log.modules {
            builder.filter_module(module, (*level).into());
        }
        builder.parse_default_env();
        // a logger may already be installed when embedded in tests
        let _ = builder.try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_vars_override_the_config_file() {
        let dir = std::env::temp_dir().join(format!("divisions-cfg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("divisions.toml");
        std::fs::write(&path, "[fuzzy]\nthreshold = 0.4\nmax_results = 7\n").unwrap();

        std::env::set_var("DIVISIONS_FUZZY__THRESHOLD", "0.77");
        let config = DConfig::load(Some(&path));
        std::env::remove_var("DIVISIONS_FUZZY__THRESHOLD");
        std::fs::remove_dir_all(&dir).unwrap();

        let config = config.unwrap();
        assert_eq!(config.fuzzy.threshold, 0.77);
        assert_eq!(config.fuzzy.max_results, 7);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        assert!(DConfig::load(Some(Path::new("/definitely/not/here.toml"))).is_err());
    }
}
