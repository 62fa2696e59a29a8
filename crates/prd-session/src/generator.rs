//! Text generator seam.
//!
//! The session consumes generated text as a lazy sequence of fragments for
//! one assistant turn. Implementations decide where the text comes from: an
//! HTTP model server ([`OllamaGenerator`](crate::OllamaGenerator)) or a
//! fixed script ([`ScriptedGenerator`](crate::ScriptedGenerator)).

use crate::error::GeneratorError;
use crate::turn::{Role, Turn};

/// Lazy, finite, non-restartable fragment sequence for one assistant turn.
///
/// An `Err` item ends the turn; the session ignores anything after it.
pub type Fragments<'a> = Box<dyn Iterator<Item = Result<String, GeneratorError>> + 'a>;

/// Input for one assistant turn.
#[derive(Clone, Copy, Debug)]
pub struct GenerationRequest<'a> {
    /// Fixed directive sent ahead of the conversation.
    pub directive: &'a str,
    /// Prior turns in order, ending with the newest user turn.
    pub turns: &'a [Turn],
}

impl<'a> GenerationRequest<'a> {
    /// Directive followed by the turns, as `(role, content)` pairs.
    pub fn messages(self) -> impl Iterator<Item = (Role, &'a str)> {
        std::iter::once((Role::System, self.directive))
            .chain(self.turns.iter().map(|turn| (turn.role, turn.content.as_str())))
    }
}

/// Source of generated text.
pub trait TextGenerator {
    /// Short name shown in logs and failure messages.
    fn name(&self) -> &str;

    /// Start generating the next assistant turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be started; failures after
    /// the first fragment arrive as `Err` items in the sequence.
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<Fragments<'_>, GeneratorError>;

    /// Advice shown to the user after a failure, if any.
    fn recovery_hint(&self) -> Option<String> {
        None
    }
}
