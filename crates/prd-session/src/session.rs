//! Conversation session state.

use chrono::Local;
use prd_renderer::extract;
use tracing::{info, warn};

use crate::error::{GeneratorError, SessionError};
use crate::generator::{GenerationRequest, TextGenerator};
use crate::prompt::DIRECTIVE;
use crate::record::DocumentRecord;
use crate::turn::Turn;

/// What the display surface is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Chat,
    /// Document viewer for the record at this index.
    Document(usize),
}

/// Result of one submitted user turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Full assistant message appended to the conversation.
    pub reply: String,
    /// Reply with the document block removed.
    pub commentary: String,
    /// Index of the document record created for this turn.
    pub document: Option<usize>,
    /// Whether the reply is a synthetic failure message.
    pub failed: bool,
}

/// Conversation history, generated documents and current view.
///
/// One value per conversation, passed to every handler. Turns and document
/// records only ever grow until [`new_conversation`](Self::new_conversation).
#[derive(Debug)]
pub struct Session {
    directive: String,
    turns: Vec<Turn>,
    documents: Vec<DocumentRecord>,
    view: View,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_directive(DIRECTIVE)
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that sends `directive` instead of the built-in one.
    pub fn with_directive(directive: impl Into<String>) -> Self {
        Self {
            directive: directive.into(),
            turns: Vec::new(),
            documents: Vec::new(),
            view: View::Chat,
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Document records in generation order.
    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Send a user turn and stream the assistant reply.
    ///
    /// Each fragment is appended to the reply and passed to `sink` as it
    /// arrives. Once the sequence ends the reply is recorded as an assistant
    /// turn, and a document record is created if it carries a document
    /// block. A generator failure at any point discards the partial reply
    /// and records a single failure message instead, with no document.
    pub fn submit<G>(&mut self, generator: &G, input: &str, mut sink: impl FnMut(&str)) -> TurnOutcome
    where
        G: TextGenerator + ?Sized,
    {
        self.turns.push(Turn::user(input));
        info!(
            turn = self.turns.len(),
            generator = generator.name(),
            "Submitting turn"
        );

        let request = GenerationRequest {
            directive: &self.directive,
            turns: &self.turns,
        };
        let mut reply = String::new();
        if let Err(err) = stream_reply(generator, &request, &mut reply, &mut sink) {
            warn!(error = %err, generator = generator.name(), "Generation failed");
            let message = failure_message(generator, &err);
            self.turns.push(Turn::assistant(message.clone()));
            return TurnOutcome {
                commentary: message.clone(),
                reply: message,
                document: None,
                failed: true,
            };
        }

        let extracted = extract(&reply);
        let document = extracted.block.map(|block| {
            let record = DocumentRecord::new(block, Local::now());
            info!(title = %record.title, index = self.documents.len(), "Recorded document");
            self.documents.push(record);
            self.documents.len() - 1
        });
        self.turns.push(Turn::assistant(reply.clone()));

        TurnOutcome {
            reply,
            commentary: extracted.commentary,
            document,
            failed: false,
        }
    }

    /// Document record at `index`.
    pub fn document(&self, index: usize) -> Result<&DocumentRecord, SessionError> {
        self.documents
            .get(index)
            .ok_or(SessionError::NoSuchDocument(index))
    }

    /// First document record with exactly this title.
    pub fn document_by_title(&self, title: &str) -> Option<(usize, &DocumentRecord)> {
        self.documents
            .iter()
            .enumerate()
            .find(|(_, record)| record.title == title)
    }

    /// Document record produced by an assistant turn from this session.
    ///
    /// Looks the turn's document up by resolved title, so a repeated title
    /// maps to its first record.
    pub fn document_for_turn(&self, turn: &Turn) -> Option<(usize, &DocumentRecord)> {
        let block = extract(&turn.content).block?;
        let record = self.documents.iter().find(|record| record.content == block);
        let title = record.map_or_else(
            || prd_renderer::resolve_title(&block),
            |record| record.title.clone(),
        );
        self.document_by_title(&title)
    }

    /// Switch to the document viewer for the record at `index`.
    pub fn open_document(&mut self, index: usize) -> Result<&DocumentRecord, SessionError> {
        let record = self
            .documents
            .get(index)
            .ok_or(SessionError::NoSuchDocument(index))?;
        self.view = View::Document(index);
        Ok(record)
    }

    /// Record currently shown in the document viewer.
    pub fn selected_document(&self) -> Option<&DocumentRecord> {
        match self.view {
            View::Document(index) => self.documents.get(index),
            View::Chat => None,
        }
    }

    /// Return from the document viewer to the conversation.
    pub fn back_to_chat(&mut self) {
        self.view = View::Chat;
    }

    /// Clear turns, document records and the view.
    ///
    /// Files already exported from earlier records are not touched.
    pub fn new_conversation(&mut self) {
        info!(
            turns = self.turns.len(),
            documents = self.documents.len(),
            "Starting new conversation"
        );
        self.turns.clear();
        self.documents.clear();
        self.view = View::Chat;
    }
}

fn stream_reply<G>(
    generator: &G,
    request: &GenerationRequest<'_>,
    reply: &mut String,
    sink: &mut impl FnMut(&str),
) -> Result<(), GeneratorError>
where
    G: TextGenerator + ?Sized,
{
    for fragment in generator.generate(request)? {
        let fragment = fragment?;
        reply.push_str(&fragment);
        sink(&fragment);
    }
    Ok(())
}

/// User-facing message for a failed turn.
fn failure_message<G>(generator: &G, err: &GeneratorError) -> String
where
    G: TextGenerator + ?Sized,
{
    let mut message = format!("⚠️ **{} connection error.**\n\n", generator.name());
    if let Some(hint) = generator.recovery_hint() {
        message.push_str(&hint);
        message.push_str("\n\n");
    }
    message.push_str(&format!("Error: `{err}`"));
    message
}
