use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_MAX_HANDS: usize = 200;
const RUN_ID_ALLOWED: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root simulation configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SeriesConfig {
    pub run_id: String,
    pub games: GamesConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SeriesConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SeriesConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.games.validate()?;
        self.logging.normalize()?;
        Ok(())
    }

    /// Resolve `{run_id}` templates into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_json: resolve_template(&self.run_id, &self.outputs.summary_json),
        }
    }
}

/// Game sampling configuration block.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GamesConfig {
    pub seed: Option<u64>,
    pub count: usize,
    #[serde(default = "default_max_hands")]
    pub max_hands: usize,
}

impl GamesConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(ValidationError::InvalidField {
                field: "games.count".to_string(),
                message: "number of games must be greater than zero".to_string(),
            });
        }
        if self.max_hands == 0 {
            return Err(ValidationError::InvalidField {
                field: "games.max_hands".to_string(),
                message: "hand cap must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn default_max_hands() -> usize {
    DEFAULT_MAX_HANDS
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_json: String,
}

/// Resolved output paths after template substitution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_json: PathBuf,
}

/// Structured-logging configuration block.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub bot_details: bool,
}

impl LoggingConfig {
    fn normalize(&mut self) -> Result<(), ValidationError> {
        if let Some(raw) = &self.level {
            if parse_level(raw).is_none() {
                return Err(ValidationError::InvalidField {
                    field: "logging.level".to_string(),
                    message: format!("unknown level {raw:?}"),
                });
            }
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        self.level.as_deref().and_then(parse_level)
    }
}

fn parse_level(raw: &str) -> Option<Level> {
    raw.trim().to_ascii_uppercase().parse::<Level>().ok()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            level: None,
            bot_details: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config at {path}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid config at {path}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("run_id {run_id:?} contains characters outside [A-Za-z0-9._-]")]
    RunId { run_id: String },
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.is_empty() || !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::RunId {
            run_id: run_id.to_string(),
        });
    }
    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

#[cfg(test)]
mod tests {
    use super::{GamesConfig, LoggingConfig, OutputsConfig, SeriesConfig, ValidationError};

    fn base_config() -> SeriesConfig {
        SeriesConfig {
            run_id: "smoke-1".to_string(),
            games: GamesConfig {
                seed: Some(7),
                count: 4,
                max_hands: 50,
            },
            outputs: OutputsConfig {
                jsonl: "out/{run_id}/games.jsonl".to_string(),
                summary_json: "out/{run_id}/summary.json".to_string(),
            },
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn valid_config_passes() {
        let mut cfg = base_config();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn run_id_charset_is_enforced() {
        let mut cfg = base_config();
        cfg.run_id = "bad id!".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(ValidationError::RunId { .. })
        ));
    }

    #[test]
    fn zero_games_is_rejected() {
        let mut cfg = base_config();
        cfg.games.count = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ValidationError::InvalidField { .. })
        ));
    }

    #[test]
    fn templates_resolve_run_id() {
        let cfg = base_config();
        let outputs = cfg.resolved_outputs();
        assert_eq!(
            outputs.jsonl.to_string_lossy(),
            "out/smoke-1/games.jsonl"
        );
        assert_eq!(
            outputs.summary_json.to_string_lossy(),
            "out/smoke-1/summary.json"
        );
    }

    #[test]
    fn yaml_round_trips() {
        let yaml = r#"
run_id: nightly
games:
  seed: 99
  count: 16
outputs:
  jsonl: "out/{run_id}.jsonl"
  summary_json: "out/{run_id}.json"
logging:
  enable_structured: true
  level: debug
"#;
        let mut cfg: SeriesConfig = serde_yaml::from_str(yaml).unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.games.max_hands, super::DEFAULT_MAX_HANDS);
        assert_eq!(cfg.logging.level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn unknown_logging_level_is_rejected() {
        let mut cfg = base_config();
        cfg.logging.level = Some("chatty".to_string());
        assert!(cfg.validate().is_err());
    }
}
