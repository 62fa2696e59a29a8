//! Conversation session for the PRD generator.
//!
//! A [`Session`] holds the ordered conversation turns, the document records
//! extracted from assistant replies and the current view. Each submitted
//! user turn is answered by a [`TextGenerator`], whose fragments are streamed
//! to the caller as they arrive. Generator failures never escape a turn: they
//! become a single assistant message explaining what went wrong.
//!
//! # Generators
//!
//! - [`OllamaGenerator`]: streaming chat against an Ollama server over HTTP
//! - [`ScriptedGenerator`]: plays back queued replies, for tests and demos
//!
//! # Example
//!
//! ```
//! use prd_session::{ScriptedGenerator, Session};
//!
//! let generator = ScriptedGenerator::new()
//!     .reply(["Done.\n<PRD_START>\n# Widget PRD\n", "## Goals\n- ship\n<PRD_END>"]);
//! let mut session = Session::new();
//!
//! let mut streamed = String::new();
//! let outcome = session.submit(&generator, "a widget", |fragment| streamed.push_str(fragment));
//!
//! assert_eq!(outcome.commentary, "Done.");
//! assert_eq!(session.document(0).unwrap().title, "Widget PRD");
//! assert_eq!(streamed, outcome.reply);
//! ```

mod error;
mod generator;
mod ollama;
mod prompt;
mod record;
mod scripted;
mod session;
mod turn;

pub use error::{GeneratorError, SessionError};
pub use generator::{Fragments, GenerationRequest, TextGenerator};
pub use ollama::OllamaGenerator;
pub use prompt::{DIRECTIVE, WELCOME};
pub use record::{DocumentRecord, SHORT_TITLE_CHARS};
pub use scripted::{ScriptStep, ScriptedGenerator};
pub use session::{Session, TurnOutcome, View};
pub use turn::{Role, Turn};
