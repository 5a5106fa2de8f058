// src/config.rs

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "used_cars.toml";
const CONFIG_PATH_VAR: &str = "USED_CARS_CONFIG";
const ENV_PREFIX: &str = "USED_CARS_";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub site: SiteConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub bind_address: String,
    pub max_workers: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DataConfig {
    pub path: PathBuf,
}

/// Public site identity, used for canonical URLs and structured data.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub base_url: String,
    pub site_name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(LogFormat::Compact),
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "127.0.0.1:3000".to_string(),
                max_workers: 8,
            },
            data: DataConfig {
                path: PathBuf::from("data/data.json"),
            },
            site: SiteConfig {
                base_url: "https://uae.yallamotor.com".to_string(),
                site_name: "YallaMotor".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Compact,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
}

// On-disk shape: every key optional, missing ones keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    server: Option<FileServer>,
    data: Option<FileData>,
    site: Option<FileSite>,
    logging: Option<FileLogging>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileServer {
    bind_address: Option<String>,
    max_workers: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileData {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSite {
    base_url: Option<String>,
    site_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileLogging {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl AppConfig {
    /// Defaults, then the TOML file (if any), then `USED_CARS_*` variables.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let vars: Vec<(String, String)> = env::vars().collect();
        Self::load_with_env(options, &vars)
    }

    pub fn load_with_env(
        options: LoadOptions,
        vars: &[(String, String)],
    ) -> Result<Self, ConfigError> {
        let mut config = AppConfig::default();

        let explicit = options.config_path.clone().or_else(|| {
            vars.iter()
                .find(|(k, _)| k == CONFIG_PATH_VAR)
                .map(|(_, v)| PathBuf::from(v))
        });
        let path = explicit.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if path.exists() {
            config.apply_file(&path)?;
        } else if options.require_file {
            return Err(ConfigError::MissingConfigFile(path));
        }

        config.apply_env(vars)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&raw).map_err(|source| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(server) = file.server {
            if let Some(v) = server.bind_address {
                self.server.bind_address = v;
            }
            if let Some(v) = server.max_workers {
                self.server.max_workers = v;
            }
        }
        if let Some(data) = file.data {
            if let Some(v) = data.path {
                self.data.path = v;
            }
        }
        if let Some(site) = file.site {
            if let Some(v) = site.base_url {
                self.site.base_url = v;
            }
            if let Some(v) = site.site_name {
                self.site.site_name = v;
            }
        }
        if let Some(logging) = file.logging {
            if let Some(v) = logging.level {
                self.logging.level = v;
            }
            if let Some(v) = logging.format {
                self.logging.format = v;
            }
        }
        Ok(())
    }

    fn apply_env(&mut self, vars: &[(String, String)]) -> Result<(), ConfigError> {
        for (key, value) in vars {
            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let invalid = || ConfigError::InvalidEnvOverride {
                key: key.clone(),
                value: value.clone(),
            };

            match name {
                "BIND_ADDRESS" => self.server.bind_address = value.clone(),
                "MAX_WORKERS" => {
                    self.server.max_workers = value.trim().parse().map_err(|_| invalid())?
                }
                "DATA_PATH" => self.data.path = PathBuf::from(value),
                "BASE_URL" => self.site.base_url = value.clone(),
                "SITE_NAME" => self.site.site_name = value.clone(),
                "LOG_LEVEL" => self.logging.level = value.clone(),
                "LOG_FORMAT" => self.logging.format = LogFormat::parse(value).ok_or_else(invalid)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.server.max_workers == 0 {
            return Err(ConfigError::Validation(
                "server.max_workers must be at least 1".to_string(),
            ));
        }
        if self.server.bind_address.trim().is_empty() {
            return Err(ConfigError::Validation(
                "server.bind_address must not be empty".to_string(),
            ));
        }
        let trimmed = self.site.base_url.trim_end_matches('/').to_string();
        if trimmed.is_empty() {
            return Err(ConfigError::Validation(
                "site.base_url must not be empty".to_string(),
            ));
        }
        self.site.base_url = trimmed;
        Ok(())
    }
}
