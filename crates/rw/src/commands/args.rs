//! Arguments and I/O shared by the rendering commands.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use rw_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Input, output and furigana option overrides.
#[derive(Args, Debug)]
pub(crate) struct FuriganaArgs {
    /// Input file (default: stdin; `-` also reads stdin).
    pub input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover rw.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Explicit bracket forms, e.g. "[]:^:()|[]::{}" (overrides config).
    #[arg(long)]
    pub forms: Option<String>,

    /// Two glyphs wrapping the gloss for tag-less consumers (overrides config).
    #[arg(long)]
    pub fallback_brackets: Option<String>,

    /// Bracket pairs for auto-detection, e.g. "【】|{}" (overrides config).
    #[arg(long)]
    pub auto_bracket_sets: Option<String>,

    /// Disable auto-detection of bracketed glosses.
    #[arg(long)]
    pub strict: bool,

    /// Pair whole words with whole glosses instead of aligning runs.
    #[arg(long)]
    pub no_pattern_matching: bool,

    /// Disable furigana conversion (only unescapes brackets).
    #[arg(long)]
    pub disable: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl FuriganaArgs {
    /// Build CLI settings; flags left unset do not override the config.
    pub(crate) fn cli_settings(&self) -> CliSettings {
        CliSettings {
            enabled: self.disable.then_some(false),
            forms: self.forms.clone(),
            fallback_brackets: self.fallback_brackets.clone(),
            strict_mode: self.strict.then_some(true),
            auto_bracket_sets: self.auto_bracket_sets.clone(),
            pattern_matching: self.no_pattern_matching.then_some(false),
        }
    }

    /// Load configuration with these overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }
        Ok(config)
    }

    /// Read the input document.
    pub(crate) fn read_input(&self) -> Result<String, CliError> {
        match self.input.as_deref() {
            Some(path) if path != Path::new("-") => {
                std::fs::read_to_string(path).map_err(|source| CliError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
            _ => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
        }
    }

    /// Write the rendered document.
    pub(crate) fn write_output(&self, content: &str) -> Result<(), CliError> {
        if let Some(path) = &self.output {
            std::fs::write(path, content).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            Output::new().success(&format!("Wrote {}", path.display()));
        } else {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
        Ok(())
    }
}
