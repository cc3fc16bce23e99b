//! Configuration management for RW.
//!
//! Parses `rw.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [furigana]
//! enabled = true
//! forms = "[]:^:()|[]::{}"
//! fallback_brackets = "【】"
//! strict_mode = false
//! auto_bracket_sets = "【】|{}"
//! pattern_matching = true
//! ```

use std::path::{Path, PathBuf};

use rw_furigana::{BracketForm, FuriganaOptions};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the master switch.
    pub enabled: Option<bool>,
    /// Override explicit bracket forms.
    pub forms: Option<String>,
    /// Override fallback brackets.
    pub fallback_brackets: Option<String>,
    /// Override strict mode.
    pub strict_mode: Option<bool>,
    /// Override auto-detection bracket pairs.
    pub auto_bracket_sets: Option<String>,
    /// Override run alignment.
    pub pattern_matching: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rw.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Furigana rendering options.
    pub furigana: FuriganaOptions,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a value to be exactly two characters.
fn require_pair(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.chars().count() != 2 {
        return Err(ConfigError::Validation(format!(
            "{field} must be exactly two characters, got {value:?}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `rw.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or parsing or
    /// validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let furigana = &mut self.furigana;
        if let Some(enabled) = settings.enabled {
            furigana.enabled = enabled;
        }
        if let Some(forms) = &settings.forms {
            furigana.forms.clone_from(forms);
        }
        if let Some(brackets) = &settings.fallback_brackets {
            furigana.fallback_brackets.clone_from(brackets);
        }
        if let Some(strict_mode) = settings.strict_mode {
            furigana.strict_mode = strict_mode;
        }
        if let Some(sets) = &settings.auto_bracket_sets {
            furigana.auto_bracket_sets.clone_from(sets);
        }
        if let Some(pattern_matching) = settings.pattern_matching {
            furigana.pattern_matching = pattern_matching;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// The renderer silently falls back to defaults for malformed values; a
    /// config file is held to a stricter standard so typos surface early.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let furigana = &self.furigana;

        require_pair(&furigana.fallback_brackets, "furigana.fallback_brackets")?;

        for pair in furigana.auto_bracket_sets.split('|') {
            require_pair(pair, "furigana.auto_bracket_sets entry")?;
        }

        for form in furigana.forms.split('|') {
            if BracketForm::try_parse(form).is_none() {
                return Err(ConfigError::Validation(format!(
                    "furigana.forms entry {form:?} must be `main:separator:gloss` \
                     with two-character brackets"
                )));
            }
        }

        Ok(())
    }
}
