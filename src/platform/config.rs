// LootSleuth - platform/config.rs
//
// Platform-specific config directory resolution and config.toml loading
// with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LootSleuth configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/lootsleuth/ or %APPDATA%\LootSleuth\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[extract]` section.
    pub extract: ExtractSection,
    /// `[analyze]` section.
    pub analyze: AnalyzeSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[extract]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExtractSection {
    /// Directory holding the per-character log files.
    pub log_dir: Option<PathBuf>,
    /// CSV to write.
    pub output_csv: Option<PathBuf>,
    /// Target phrases, tested in order.
    pub phrases: Option<Vec<String>>,
}

/// `[analyze]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AnalyzeSection {
    /// CSV to chart.
    pub input_csv: Option<PathBuf>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_dir: PathBuf,
    pub output_csv: PathBuf,
    pub phrases: Vec<String>,
    pub analyze_input_csv: PathBuf,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(constants::DEFAULT_LOG_DIR),
            output_csv: PathBuf::from(constants::DEFAULT_OUTPUT_CSV),
            phrases: constants::DEFAULT_PHRASES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            analyze_input_csv: PathBuf::from(constants::DEFAULT_OUTPUT_CSV),
            log_level: None,
        }
    }
}

/// Read and parse config.toml without validating values.
pub fn read_raw_config(path: &Path) -> Result<RawConfig, ConfigError> {
    let size = std::fs::metadata(path)
        .map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?
        .len();
    if size > constants::MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: constants::MAX_CONFIG_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Validate a parsed config against defaults.
///
/// Returns the validated config plus one warning per rejected value.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings = Vec::new();

    if let Some(dir) = raw.extract.log_dir {
        config.log_dir = dir;
    }
    if let Some(csv) = raw.extract.output_csv {
        config.output_csv = csv;
    }

    // -- Extract: phrases --
    if let Some(phrases) = raw.extract.phrases {
        let phrases: Vec<String> = phrases.into_iter().filter(|p| !p.is_empty()).collect();
        if phrases.is_empty() {
            warnings.push(format!(
                "[extract] phrases is empty. Using the {} built-in phrases.",
                constants::DEFAULT_PHRASES.len()
            ));
        } else {
            config.phrases = phrases;
        }
    }

    if let Some(csv) = raw.analyze.input_csv {
        config.analyze_input_csv = csv;
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            let e = ConfigError::ValueOutOfRange {
                field: "logging.level".to_string(),
                value: level,
                expected: constants::VALID_LOG_LEVELS.join(", "),
            };
            warnings.push(format!("{e}. Using default ({}).", constants::DEFAULT_LOG_LEVEL));
        }
    }

    (config, warnings)
}

/// Load and validate config.toml.
///
/// `explicit` is a path given with `--config`; otherwise the platform default
/// is used. A missing default file is a normal first run (defaults, no
/// warnings); a missing explicit file, or any unreadable or unparseable file,
/// yields defaults plus a warning. Configuration problems never abort.
///
/// Called before logging is initialised (the file may set the log level),
/// so warnings are returned rather than logged.
pub fn load_config(explicit: Option<&Path>, paths: &PlatformPaths) -> (AppConfig, Vec<String>) {
    let config_path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| paths.config_file());

    if explicit.is_none() && !config_path.exists() {
        return (AppConfig::default(), Vec::new());
    }

    match read_raw_config(&config_path) {
        Ok(raw) => validate(raw),
        Err(e) => (
            AppConfig::default(),
            vec![format!("{e}. Using defaults.")],
        ),
    }
}
