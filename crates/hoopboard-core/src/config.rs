// Configuration loading and parsing (config/hoopboard.toml).

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file inside `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "hoopboard.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub board: BoardConfig,
    pub export: ExportConfig,
    pub snapshot: SnapshotConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    /// Keep only the best N players after ranking. 0 keeps everyone.
    pub max_players: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig { max_players: 300 }
    }
}

impl BoardConfig {
    /// The ranking limit, or `None` when unlimited.
    pub fn limit(&self) -> Option<usize> {
        (self.max_players > 0).then_some(self.max_players)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    pub dir: PathBuf,
    pub remaining_file: String,
    pub drafted_file: String,
    pub full_file: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            dir: PathBuf::from("exports"),
            remaining_file: "remaining_players.csv".into(),
            drafted_file: "drafted_players.csv".into(),
            full_file: "full_board.csv".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SnapshotConfig {
    pub path: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        SnapshotConfig {
            path: PathBuf::from("board_snapshot.csv"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes priority.
    pub filter: String,
    /// Log directory. Defaults to the platform data directory.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "hoopboard=info,warn".into(),
            dir: None,
        }
    }
}

impl LoggingConfig {
    /// Resolve the log directory: explicit `dir`, then the platform data
    /// directory, then `./logs`.
    pub fn resolve_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.dir {
            return dir.clone();
        }
        directories::ProjectDirs::from("", "", "hoopboard")
            .map(|dirs| dirs.data_local_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Where a loaded configuration came from. Returned to the caller so it can
/// be logged once tracing is set up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from an existing config file.
    File(PathBuf),
    /// Copied from `defaults/` on this run, then read.
    Seeded(PathBuf),
    /// No config file; built-in defaults.
    Builtin,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Seeded(path) => write!(f, "{} (initialized from defaults)", path.display()),
            ConfigSource::Builtin => write!(f, "built-in defaults"),
        }
    }
}

/// Load and validate `config/hoopboard.toml` relative to `base_dir`.
///
/// A missing file is not an error: built-in defaults are used. Relative
/// export and snapshot paths are resolved against `base_dir`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);

    let mut config = if path.exists() {
        let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            source: e,
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })?
    } else {
        Config::default()
    };

    config.export.dir = base_dir.join(&config.export.dir);
    config.snapshot.path = base_dir.join(&config.snapshot.path);
    if let Some(dir) = config.logging.dir.take() {
        config.logging.dir = Some(base_dir.join(dir));
    }

    validate(&config)?;
    Ok(config)
}

/// Copy `defaults/hoopboard.toml` into `config/` when it is not there yet.
/// Returns the path of the copied file, if any.
pub fn ensure_config_files(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);

    if !source.is_file() || target.exists() {
        return Ok(None);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {}: {e}", source.display()),
    })?;
    Ok(Some(target))
}

/// Seed defaults and load config relative to `base_dir`, reporting which
/// file (if any) the values came from.
pub fn load_config(base_dir: &Path) -> Result<(Config, ConfigSource), ConfigError> {
    let seeded = ensure_config_files(base_dir)?;
    let config = load_config_from(base_dir)?;
    let path = base_dir.join("config").join(CONFIG_FILE);
    let source = match seeded {
        Some(copied) => ConfigSource::Seeded(copied),
        None if path.exists() => ConfigSource::File(path),
        None => ConfigSource::Builtin,
    };
    Ok((config, source))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let file_names: &[(&str, &str)] = &[
        ("export.remaining_file", config.export.remaining_file.as_str()),
        ("export.drafted_file", config.export.drafted_file.as_str()),
        ("export.full_file", config.export.full_file.as_str()),
    ];
    for (field, value) in file_names {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: field.to_string(),
                message: "must not be empty".into(),
            });
        }
        if value.contains('/') || value.contains('\\') {
            return Err(ConfigError::ValidationError {
                field: field.to_string(),
                message: format!("must be a file name, not a path, got {value:?}"),
            });
        }
    }

    if config.snapshot.path.file_name().is_none() {
        return Err(ConfigError::ValidationError {
            field: "snapshot.path".into(),
            message: "must name a file".into(),
        });
    }

    if config.logging.filter.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.filter".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
