//! Streaming client for the Ollama chat API.
//!
//! Sends the conversation to `POST /api/chat` with streaming enabled and
//! yields the `message.content` of each newline-delimited JSON chunk.

use std::io::{BufRead, BufReader, Lines};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ureq::Agent;

use crate::error::GeneratorError;
use crate::generator::{Fragments, GenerationRequest, TextGenerator};
use crate::turn::Role;

/// Ollama HTTP generator.
pub struct OllamaGenerator {
    agent: Agent,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: Role,
    content: &'a str,
}

/// One line of a streamed chat response.
#[derive(Deserialize)]
struct ChatChunk {
    #[serde(default)]
    message: Option<ChunkMessage>,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ChunkMessage {
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelEntry>,
}

#[derive(Deserialize)]
struct ModelEntry {
    name: String,
}

impl OllamaGenerator {
    /// Create a generator for `model` on the server at `base_url`.
    ///
    /// `timeout` bounds each request including the whole response stream.
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            model: model.to_owned(),
        }
    }

    /// Model name sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// List the names of models installed on the server.
    pub fn list_models(&self) -> Result<Vec<String>, GeneratorError> {
        let url = format!("{}/api/tags", self.base_url);
        debug!(url = %url, "Listing models");

        let response = self.agent.get(&url).call()?;
        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(GeneratorError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let tags: TagsResponse = body.read_json()?;
        Ok(tags.models.into_iter().map(|entry| entry.name).collect())
    }
}

impl TextGenerator for OllamaGenerator {
    fn name(&self) -> &str {
        "Ollama"
    }

    fn generate(&self, request: &GenerationRequest<'_>) -> Result<Fragments<'_>, GeneratorError> {
        let url = format!("{}/api/chat", self.base_url);
        let payload = ChatRequest {
            model: &self.model,
            messages: request
                .messages()
                .map(|(role, content)| ChatMessage { role, content })
                .collect(),
            stream: true,
        };
        info!(model = %self.model, turns = request.turns.len(), "Requesting chat completion");

        let response = self
            .agent
            .post(&url)
            .header("Accept", "application/x-ndjson")
            .send_json(&payload)?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(GeneratorError::HttpResponse {
                status,
                body: error_body,
            });
        }

        Ok(Box::new(ChunkStream::new(BufReader::new(body.into_reader()))))
    }

    fn recovery_hint(&self) -> Option<String> {
        Some(format!(
            "Run: `ollama serve`\nPull model: `ollama pull {}`",
            self.model
        ))
    }
}

/// Fragment iterator over a newline-delimited JSON chat stream.
struct ChunkStream<R> {
    lines: Lines<R>,
    finished: bool,
}

impl<R: BufRead> ChunkStream<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            finished: false,
        }
    }

    fn fail(&mut self, err: GeneratorError) -> Option<Result<String, GeneratorError>> {
        self.finished = true;
        Some(Err(err))
    }
}

impl<R: BufRead> Iterator for ChunkStream<R> {
    type Item = Result<String, GeneratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return self.fail(err.into()),
            };
            if line.trim().is_empty() {
                continue;
            }
            let chunk: ChatChunk = match serde_json::from_str(&line) {
                Ok(chunk) => chunk,
                Err(err) => return self.fail(err.into()),
            };
            if let Some(error) = chunk.error {
                return self.fail(GeneratorError::Generator(error));
            }
            self.finished = chunk.done;
            if let Some(message) = chunk.message
                && !message.content.is_empty()
            {
                return Some(Ok(message.content));
            }
        }
        None
    }
}
