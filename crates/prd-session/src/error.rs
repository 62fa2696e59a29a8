//! Error types for text generation and session navigation.

/// Error from a text generator, at request time or mid-stream.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// HTTP request failed (connection refused, timeout, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// I/O error while reading the response stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in the response stream.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reported by the generator itself.
    #[error("{0}")]
    Generator(String),
}

/// Error from session navigation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    /// No document record at the given index.
    #[error("No document #{0}")]
    NoSuchDocument(usize),
}
