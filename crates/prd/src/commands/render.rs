//! `prd render` command implementation.

use std::path::PathBuf;

use chrono::Local;
use clap::Args;
use prd_renderer::extract;
use prd_session::DocumentRecord;

use super::SettingsArgs;
use crate::error::CliError;
use crate::export::{Format, write_exports};
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// File with generated text, or a bare PRD document.
    input: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Both)]
    format: Format,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.settings.load_config()?;

        let text = std::fs::read_to_string(&self.input)?;
        output.info(&format!("Rendering {}...", self.input.display()));

        let record = DocumentRecord::new(document_content(&text)?, Local::now());
        output.info(&format!("Title: {}", record.title));

        let written = write_exports(
            &record,
            &config.document,
            &config.output_resolved.dir,
            self.format,
        )?;
        for path in &written {
            output.success(&format!("Wrote {}", path.display()));
        }

        Ok(())
    }
}

/// Document block of generated text, or the whole text when unmarked.
fn document_content(text: &str) -> Result<String, CliError> {
    let content = extract(text)
        .block
        .unwrap_or_else(|| text.trim().to_owned());
    if content.is_empty() {
        return Err(CliError::Validation("input has no document content".to_owned()));
    }
    Ok(content)
}
