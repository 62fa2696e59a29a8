//! PRD CLI - conversational product requirements document generator.
//!
//! Provides commands for:
//! - `chat`: Interactive discovery conversation that produces PRDs
//! - `render`: Render generated text or a document file to PDF and HTML
//! - `models`: List models available on the Ollama server

mod commands;
mod error;
mod export;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ChatArgs, ModelsArgs, RenderArgs};
use output::Output;

/// PRD - AI product co-pilot.
#[derive(Parser)]
#[command(name = "prd", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive PRD conversation.
    Chat(ChatArgs),
    /// Render a generated PRD to PDF and/or HTML.
    Render(RenderArgs),
    /// List models available on the generator server.
    Models(ModelsArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Chat(args) => args.settings.verbose,
            Self::Render(args) => args.settings.verbose,
            Self::Models(args) => args.settings.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Chat(args) => args.execute(),
        Commands::Render(args) => args.execute(),
        Commands::Models(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
