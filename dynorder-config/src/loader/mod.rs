pub mod error;

use std::{
    fs,
    path::{Path, PathBuf},
};

use dynorder_core::OrderingConfig;
use tracing::{debug, info};

use crate::models::{
    ConfigMetadata,
    sources::{EnvConfig, FileConfig},
};
use error::ConfigLoadError;

pub const DEFAULT_CONFIG_LOCATIONS: &[&str] =
    &["dynorder.toml", "config/dynorder.toml"];

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Load `.env`, read the process environment and compose the config
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.load_env_file()?;
        let env_config = EnvConfig::gather()?;
        self.compose(env_config, env_file_loaded)
    }

    /// Compose the config from an already gathered environment
    ///
    /// Neither `.env` nor the process environment is read.
    pub fn load_with_env(
        &self,
        env_config: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        self.compose(env_config, false)
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        if let Some(path) = &self.options.env_file {
            return match dotenvy::from_path(path) {
                Ok(()) => Ok(true),
                Err(err) if err.not_found() => {
                    Err(ConfigLoadError::MissingEnvFile { path: path.clone() })
                }
                Err(err) => Err(err.into()),
            };
        }

        // Only the implicit .env lookup may come up empty
        match dotenvy::dotenv() {
            Ok(_) => Ok(true),
            Err(err) if err.not_found() => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn compose(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let file = file_config.unwrap_or_default().ordering;
        let defaults = OrderingConfig::default();

        let config = OrderingConfig {
            field_matching: env
                .field_matching
                .or(file.field_matching)
                .unwrap_or(defaults.field_matching),
            text_collation: env
                .text_collation
                .or(file.text_collation)
                .unwrap_or(defaults.text_collation),
            default_order: env
                .default_order
                .or(file.default_order)
                .unwrap_or(defaults.default_order),
            max_clauses: env
                .max_clauses
                .or(file.max_clauses)
                .unwrap_or(defaults.max_clauses),
        };
        config.validate().map_err(ConfigLoadError::Invalid)?;

        info!(
            config_path = ?config_path,
            env_file_loaded,
            ?config,
            "loaded ordering configuration"
        );

        Ok(ConfigLoad {
            config,
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        })
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let mut source = ConfigPathSource::default();

        if let Some(explicit) = &self.options.config_path {
            source.explicit = Some(explicit.clone());
        } else if let Some(from_env) = &env_config.config_path {
            source.env = Some(from_env.clone());
        }

        if source.is_empty() {
            source.default = DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists());
        }

        let Some((path, provenance)) = source.resolved_path() else {
            debug!("no configuration file found, using environment and defaults");
            return Ok((None, None));
        };

        if !path.exists() {
            if provenance.is_explicit() {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let file_config = read_file_config(&path)?;
        debug!(path = %path.display(), ?provenance, "read configuration file");
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

#[derive(Debug, Default)]
struct ConfigPathSource {
    explicit: Option<PathBuf>,
    env: Option<PathBuf>,
    default: Option<PathBuf>,
}

impl ConfigPathSource {
    fn is_empty(&self) -> bool {
        self.explicit.is_none() && self.env.is_none() && self.default.is_none()
    }

    fn resolved_path(&self) -> Option<(PathBuf, ConfigPathProvenance)> {
        if let Some(path) = &self.explicit {
            return Some((path.clone(), ConfigPathProvenance::Explicit));
        }
        if let Some(path) = &self.env {
            return Some((path.clone(), ConfigPathProvenance::Env));
        }
        if let Some(path) = &self.default {
            return Some((path.clone(), ConfigPathProvenance::Default));
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigPathProvenance {
    Explicit,
    Env,
    Default,
}

impl ConfigPathProvenance {
    fn is_explicit(self) -> bool {
        matches!(
            self,
            ConfigPathProvenance::Explicit | ConfigPathProvenance::Env
        )
    }
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: OrderingConfig,
    pub metadata: ConfigMetadata,
}
