//! `prd chat` command implementation.

use std::io::BufRead;

use clap::Args;
use prd_config::Config;
use prd_renderer::{START_MARKER, extract};
use prd_session::{
    SHORT_TITLE_CHARS, ScriptedGenerator, Session, TextGenerator, TurnOutcome, View, WELCOME,
};

use super::{SettingsArgs, ollama_generator};
use crate::error::CliError;
use crate::export::{Format, write_exports};
use crate::output::Output;

const HELP: &str = "Commands:
  /docs        List generated PRDs, newest first
  /open N      Show PRD number N
  /export [N]  Write PRD number N (default: the open one) as PDF and HTML
  /back        Return to the conversation
  /new         Start a new conversation
  /help        Show this help
  /quit        Exit";

/// Arguments for the chat command.
#[derive(Args)]
pub(crate) struct ChatArgs {
    /// Use a built-in scripted conversation instead of the Ollama server.
    #[arg(long)]
    demo: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

impl ChatArgs {
    /// Execute the chat command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or stdin cannot be read.
    /// Generator failures are shown in the conversation instead.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.settings.load_config()?;

        let generator: Box<dyn TextGenerator> = if self.demo {
            output.detail("Demo mode: replies are scripted.");
            Box::new(ScriptedGenerator::demo())
        } else {
            output.detail(&format!(
                "Model {} on {}",
                config.generator.model, config.generator.base_url
            ));
            Box::new(ollama_generator(&config))
        };

        let mut repl = Repl {
            output,
            config,
            generator,
            session: Session::new(),
        };
        repl.run(&mut std::io::stdin().lock())
    }
}

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Empty,
    Message(String),
    Command(ReplCommand),
}

/// REPL commands. Document numbers are 1-based in input and stored as indices.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Docs,
    Open(usize),
    Export(Option<usize>),
    Back,
    New,
    Help,
    Quit,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Empty);
    }
    let Some(command) = line.strip_prefix('/') else {
        return Ok(Input::Message(line.to_owned()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let number = parts.next().map(parse_number).transpose()?;
    if parts.next().is_some() {
        return Err(format!("Too many arguments for /{name}"));
    }

    let command = match (name, number) {
        ("docs", None) => ReplCommand::Docs,
        ("open", Some(index)) => ReplCommand::Open(index),
        ("open", None) => return Err("Usage: /open N".to_owned()),
        ("export", index) => ReplCommand::Export(index),
        ("back", None) => ReplCommand::Back,
        ("new", None) => ReplCommand::New,
        ("help", None) => ReplCommand::Help,
        ("quit" | "exit", None) => ReplCommand::Quit,
        ("docs" | "back" | "new" | "help" | "quit" | "exit", Some(_)) => {
            return Err(format!("/{name} takes no arguments"));
        }
        _ => return Err(format!("Unknown command /{name}. Type /help for commands.")),
    };
    Ok(Input::Command(command))
}

fn parse_number(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("Not a document number: {arg}")),
    }
}

/// Interactive conversation loop.
struct Repl {
    output: Output,
    config: Config,
    generator: Box<dyn TextGenerator>,
    session: Session,
}

impl Repl {
    fn run(&mut self, input: &mut impl BufRead) -> Result<(), CliError> {
        self.output.text(WELCOME);
        self.output.detail("Type /help for commands.");

        let mut line = String::new();
        loop {
            self.output.prompt();
            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            match parse_input(&line) {
                Ok(Input::Empty) => {}
                Ok(Input::Message(message)) => self.converse(&message),
                Ok(Input::Command(ReplCommand::Quit)) => return Ok(()),
                Ok(Input::Command(command)) => {
                    if let Err(err) = self.command(command) {
                        self.output.error(&format!("Error: {err}"));
                    }
                }
                Err(message) => self.output.warning(&message),
            }
        }
    }

    fn converse(&mut self, message: &str) {
        if self.session.view() != View::Chat {
            self.session.back_to_chat();
        }
        let mut echo = StreamEcho::default();
        let output = &self.output;
        let outcome = self
            .session
            .submit(self.generator.as_ref(), message, |fragment| {
                output.stream(&echo.push(fragment));
            });
        self.show_outcome(&outcome, echo);
    }

    fn show_outcome(&self, outcome: &TurnOutcome, echo: StreamEcho) {
        if outcome.failed {
            self.output.text("");
            self.output.warning(&outcome.reply);
            return;
        }
        self.output.stream(&echo.finish(outcome.document.is_some()));
        self.output.text("");

        if let Some(index) = outcome.document {
            let record = &self.session.documents()[index];
            let number = index + 1;
            self.output
                .success(&format!("PRD generated: {} (#{number})", record.title));
            self.output.detail(&format!(
                "/open {number} to read it, /export {number} to save PDF and HTML"
            ));
        }
    }

    fn command(&mut self, command: ReplCommand) -> Result<(), CliError> {
        match command {
            ReplCommand::Docs => self.list_documents(),
            ReplCommand::Open(index) => {
                let record = self.session.open_document(index)?;
                self.output.highlight(&record.title);
                self.output.detail(&record.timestamp_label());
                self.output.text(&record.content);
                self.output.detail("/export to save, /back to return");
            }
            ReplCommand::Export(index) => self.export(index)?,
            ReplCommand::Back => {
                self.session.back_to_chat();
                self.output.detail("Back to the conversation.");
            }
            ReplCommand::New => {
                self.session.new_conversation();
                self.output.text(WELCOME);
            }
            ReplCommand::Help => self.output.info(HELP),
            ReplCommand::Quit => {}
        }
        Ok(())
    }

    fn list_documents(&self) {
        let documents = self.session.documents();
        if documents.is_empty() {
            self.output.info("No PRDs generated yet.");
            return;
        }
        let selected = match self.session.view() {
            View::Document(index) => Some(index),
            View::Chat => None,
        };
        for (index, record) in documents.iter().enumerate().rev() {
            let marker = if selected == Some(index) { '*' } else { ' ' };
            self.output.info(&format!(
                "{marker}{:>3}. {:<width$}  {}",
                index + 1,
                record.short_title(SHORT_TITLE_CHARS),
                record.timestamp_label(),
                width = SHORT_TITLE_CHARS + 1,
            ));
        }
    }

    fn export(&self, index: Option<usize>) -> Result<(), CliError> {
        let record = match index {
            Some(index) => self.session.document(index)?,
            None => self.session.selected_document().ok_or_else(|| {
                CliError::Validation("No PRD open. Use /export N or /open N first.".to_owned())
            })?,
        };
        let written = write_exports(
            record,
            &self.config.document,
            &self.config.output_resolved.dir,
            Format::Both,
        )?;
        for path in &written {
            self.output.success(&format!("Wrote {}", path.display()));
        }
        Ok(())
    }
}

/// Decides which streamed text to echo.
///
/// Text before the document block is echoed as it arrives. Once the start
/// marker shows up, echoing stops so the raw block is not printed; the
/// commentary after the block is printed when the turn ends. A possible
/// partial marker at the end of the buffer is held back until the next
/// fragment resolves it.
#[derive(Debug, Default)]
struct StreamEcho {
    buffer: String,
    echoed: usize,
    in_block: bool,
}

impl StreamEcho {
    /// Add a fragment and return the text that can be echoed now.
    fn push(&mut self, fragment: &str) -> String {
        self.buffer.push_str(fragment);
        if self.in_block {
            return String::new();
        }

        let pending = &self.buffer[self.echoed..];
        if let Some(pos) = pending.find(START_MARKER) {
            let text = pending[..pos].to_owned();
            self.in_block = true;
            self.echoed += pos;
            return text + "\n[writing PRD...]";
        }

        let mut end = self.buffer.len().saturating_sub(START_MARKER.len() - 1);
        end = end.max(self.echoed);
        while !self.buffer.is_char_boundary(end) {
            end -= 1;
        }
        let text = self.buffer[self.echoed..end].to_owned();
        self.echoed = end;
        text
    }

    /// Remaining text to echo once the reply is complete.
    fn finish(self, document_recorded: bool) -> String {
        let rest = &self.buffer[self.echoed..];
        if !self.in_block || !document_recorded {
            return rest.to_owned();
        }
        // `rest` opens with the first start marker, so its commentary is the
        // text after the first block with any later blocks removed.
        let tail = extract(rest).commentary;
        if tail.is_empty() {
            return String::new();
        }
        format!("\n{tail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_messages_and_empty() {
        assert_eq!(parse_input("  \n"), Ok(Input::Empty));
        assert_eq!(
            parse_input("a habit tracker\n"),
            Ok(Input::Message("a habit tracker".to_owned()))
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_input("/docs"), Ok(Input::Command(ReplCommand::Docs)));
        assert_eq!(parse_input("/open 2"), Ok(Input::Command(ReplCommand::Open(1))));
        assert_eq!(parse_input("/export"), Ok(Input::Command(ReplCommand::Export(None))));
        assert_eq!(
            parse_input("/export 1"),
            Ok(Input::Command(ReplCommand::Export(Some(0))))
        );
        assert_eq!(parse_input("/exit"), Ok(Input::Command(ReplCommand::Quit)));
    }

    #[test]
    fn test_parse_rejects_bad_commands() {
        assert!(parse_input("/open").is_err());
        assert!(parse_input("/open 0").is_err());
        assert!(parse_input("/open x").is_err());
        assert!(parse_input("/docs 1").is_err());
        assert!(parse_input("/open 1 2").is_err());
        assert!(parse_input("/frobnicate").is_err());
    }

    #[test]
    fn test_echo_plain_reply() {
        let mut echo = StreamEcho::default();
        let mut shown = String::new();
        for fragment in ["What ", "problem does it ", "solve?"] {
            shown.push_str(&echo.push(fragment));
        }
        shown.push_str(&echo.finish(false));
        assert_eq!(shown, "What problem does it solve?");
    }

    #[test]
    fn test_echo_hides_block() {
        let mut echo = StreamEcho::default();
        let mut shown = String::new();
        for fragment in ["Lean PRD it is.\n<PRD_", "START>\n# Widget\n", "<PRD_END>\nWant edits?"] {
            shown.push_str(&echo.push(fragment));
        }
        shown.push_str(&echo.finish(true));
        assert_eq!(shown, "Lean PRD it is.\n\n[writing PRD...]\nWant edits?");
    }

    #[test]
    fn test_echo_hides_later_blocks() {
        let mut echo = StreamEcho::default();
        let mut shown = echo.push("Intro\n<PRD_START># A<PRD_END>\nMiddle\n<PRD_START># B<PRD_END>\nEnd");
        shown.push_str(&echo.finish(true));
        assert_eq!(shown, "Intro\n\n[writing PRD...]\nMiddle\n\nEnd");
    }

    #[test]
    fn test_echo_tail_ignores_end_marker_in_preamble() {
        let mut echo = StreamEcho::default();
        let mut shown = echo.push("Close with <PRD_END> later. <PRD_START>\n# A\n<PRD_END>\nDone.");
        shown.push_str(&echo.finish(true));
        assert_eq!(shown, "Close with <PRD_END> later. \n[writing PRD...]\nDone.");
    }

    #[test]
    fn test_echo_block_without_commentary_adds_nothing() {
        let mut echo = StreamEcho::default();
        let mut shown = echo.push("<PRD_START># A<PRD_END>");
        shown.push_str(&echo.finish(true));
        assert_eq!(shown, "\n[writing PRD...]");
    }

    #[test]
    fn test_echo_unterminated_block_shown_at_end() {
        let mut echo = StreamEcho::default();
        let mut shown = String::new();
        shown.push_str(&echo.push("Hi <PRD_START> # Half"));
        shown.push_str(&echo.finish(false));
        assert_eq!(shown, "Hi \n[writing PRD...]<PRD_START> # Half");
    }

    #[test]
    fn test_echo_holds_back_multibyte_tail() {
        let mut echo = StreamEcho::default();
        let first = echo.push("Café ✓ done");
        assert!("Café ✓ done".starts_with(&first));
        let rest = echo.finish(false);
        assert_eq!(first + &rest, "Café ✓ done");
    }

    #[test]
    fn test_repl_runs_demo_conversation() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.output_resolved.dir = dir.path().to_path_buf();
        let mut repl = Repl {
            output: Output::new(),
            config,
            generator: Box::new(ScriptedGenerator::demo()),
            session: Session::new(),
        };
        let script = "saved searches\n\nthey rebuild filters\n/docs\n/open 1\n/export\n/new\n/quit\nignored\n";

        repl.run(&mut script.as_bytes()).unwrap();

        assert!(dir.path().join("PRD_Saved_Searches_PRD.pdf").exists());
        assert!(dir.path().join("PRD_Saved_Searches_PRD.html").exists());
        assert!(repl.session.documents().is_empty());
        assert!(repl.session.turns().is_empty());
    }
}
