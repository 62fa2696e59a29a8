//! Document pipeline for generated product requirements documents.
//!
//! Generated assistant text carries at most one document block between
//! [`START_MARKER`] and [`END_MARKER`]. This crate splits that block from the
//! surrounding commentary, resolves a display title, and renders the block's
//! constrained markdown dialect through a generic line-oriented state machine.
//!
//! # Architecture
//!
//! The renderer uses a trait-based abstraction to handle format-specific differences:
//! - [`HtmlBackend`]: Produces markup for the in-app document viewer
//!
//! For the paginated PDF output, use the `prd-pdf` crate.
//!
//! Line classification and list grouping are handled once by
//! [`DocumentRenderer`], while the emitted output for each node type is
//! delegated to the backend.
//!
//! # Example
//!
//! ```
//! use prd_renderer::{extract, resolve_title, render_html};
//!
//! let message = "Here you go.\n<PRD_START>\n# Widget PRD\n## Problem Statement\nUsers struggle.\n<PRD_END>";
//! let extracted = extract(message);
//! let block = extracted.block.unwrap();
//!
//! assert_eq!(extracted.commentary, "Here you go.");
//! assert_eq!(resolve_title(&block), "Widget PRD");
//! assert!(render_html(&block).starts_with("<h1>Widget PRD</h1>"));
//! ```

mod backend;
mod extract;
mod html;
mod inline;
mod parser;
mod renderer;
mod state;
mod title;

pub use backend::RenderBackend;
pub use extract::{END_MARKER, Extracted, START_MARKER, extract};
pub use html::{HtmlBackend, VIEWER_CLASS, render_html, wrap_viewer};
pub use inline::{InlineSyntax, format_inline};
pub use parser::{HeadingLevel, ListKind, Node, classify, parse};
pub use renderer::DocumentRenderer;
pub use state::{ListState, escape_html};
pub use title::{fallback_title, resolve_title, resolve_title_on};
