//! `prd models` command implementation.

use clap::Args;

use super::{SettingsArgs, ollama_generator};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the models command.
#[derive(Args)]
pub(crate) struct ModelsArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,
}

impl ModelsArgs {
    /// Execute the models command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server cannot be reached.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.settings.load_config()?;
        let generator = ollama_generator(&config);

        output.info(&format!("Models on {}:", config.generator.base_url));
        let models = generator.list_models()?;
        if models.is_empty() {
            output.warning("No models installed.");
            output.info(&format!("Pull one with: ollama pull {}", generator.model()));
            return Ok(());
        }

        for name in &models {
            if name == generator.model() {
                output.highlight(&format!("* {name} (configured)"));
            } else {
                output.text(&format!("  {name}"));
            }
        }
        if !models.iter().any(|name| name == generator.model()) {
            output.warning(&format!(
                "Configured model {} is not installed.",
                generator.model()
            ));
        }

        Ok(())
    }
}
