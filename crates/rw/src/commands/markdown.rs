//! `rw markdown` command implementation.

use clap::Args;
use rw_furigana::FuriganaEngine;
use rw_furigana::markdown::render_markdown_html;

use super::args::FuriganaArgs;
use crate::error::CliError;

/// Arguments for the markdown command.
#[derive(Args)]
pub(crate) struct MarkdownArgs {
    #[command(flatten)]
    pub common: FuriganaArgs,
}

impl MarkdownArgs {
    /// Execute the markdown command: markdown in, HTML with ruby markup out.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input or output fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.common.load_config()?;
        let input = self.common.read_input()?;

        let engine = FuriganaEngine::new();
        let html = render_markdown_html(&input, &engine, &config.furigana);
        tracing::info!(
            input_len = input.len(),
            output_len = html.len(),
            "Rendered markdown"
        );

        self.common.write_output(&html)
    }
}
