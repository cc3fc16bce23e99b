//! `rw render` command implementation.

use clap::Args;
use rw_furigana::FuriganaEngine;

use super::args::FuriganaArgs;
use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    pub common: FuriganaArgs,
}

impl RenderArgs {
    /// Execute the render command: plain text in, ruby markup out.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input or output fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.common.load_config()?;
        let input = self.common.read_input()?;

        let engine = FuriganaEngine::new();
        let rendered = engine.render(&input, &config.furigana);
        tracing::info!(
            input_len = input.len(),
            output_len = rendered.len(),
            "Rendered text"
        );

        self.common.write_output(&rendered)
    }
}
