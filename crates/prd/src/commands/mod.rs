//! CLI command implementations.

pub(crate) mod chat;
pub(crate) mod models;
pub(crate) mod render;

use std::path::PathBuf;

use clap::Args;
use prd_config::{CliSettings, Config};
use prd_session::OllamaGenerator;

pub(crate) use chat::ChatArgs;
pub(crate) use models::ModelsArgs;
pub(crate) use render::RenderArgs;

use crate::error::CliError;

/// Configuration flags shared by every command.
#[derive(Args)]
pub(crate) struct SettingsArgs {
    /// Path to configuration file (default: auto-discover prd.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ollama server URL (overrides config).
    #[arg(long, env = "PRD_BASE_URL")]
    base_url: Option<String>,

    /// Model name (overrides config).
    #[arg(short, long, env = "PRD_MODEL")]
    model: Option<String>,

    /// Directory exported documents are written to (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose output (session and export logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl SettingsArgs {
    /// Load configuration with these flags applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            output_dir: self.output_dir.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Ollama generator for the configured server and model.
pub(crate) fn ollama_generator(config: &Config) -> OllamaGenerator {
    OllamaGenerator::new(
        &config.generator.base_url,
        &config.generator.model,
        config.generator.timeout(),
    )
}
