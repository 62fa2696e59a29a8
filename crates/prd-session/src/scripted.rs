//! Deterministic generator driven by a fixed script.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::GeneratorError;
use crate::generator::{Fragments, GenerationRequest, TextGenerator};
use crate::turn::Turn;

/// One item of a scripted reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptStep {
    /// Text fragment delivered to the session.
    Fragment(String),
    /// Mid-stream failure with the given message.
    Fail(String),
}

#[derive(Clone, Debug)]
enum Script {
    Reply(Vec<ScriptStep>),
    Refuse(String),
}

/// Generator that plays back queued replies, one per turn.
///
/// Each call to [`generate`](TextGenerator::generate) pops the next script
/// from the front of the queue. When the queue is empty the request is
/// refused. The turns of every request are recorded so tests can inspect
/// what was sent.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    scripts: RefCell<VecDeque<Script>>,
    requests: RefCell<Vec<Vec<Turn>>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply delivered as the given fragments.
    #[must_use]
    pub fn reply<I, S>(self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let steps = fragments
            .into_iter()
            .map(|fragment| ScriptStep::Fragment(fragment.into()))
            .collect();
        self.push(Script::Reply(steps))
    }

    /// Queue a reply that delivers some fragments, then fails.
    #[must_use]
    pub fn reply_then_fail<I, S>(self, fragments: I, error: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut steps: Vec<ScriptStep> = fragments
            .into_iter()
            .map(|fragment| ScriptStep::Fragment(fragment.into()))
            .collect();
        steps.push(ScriptStep::Fail(error.into()));
        self.push(Script::Reply(steps))
    }

    /// Queue a turn whose request fails before any fragment arrives.
    #[must_use]
    pub fn refuse(self, error: impl Into<String>) -> Self {
        self.push(Script::Refuse(error.into()))
    }

    fn push(self, script: Script) -> Self {
        self.scripts.borrow_mut().push_back(script);
        self
    }

    /// Number of queued turns not yet played.
    pub fn remaining(&self) -> usize {
        self.scripts.borrow().len()
    }

    /// Turns sent with each request so far, oldest first.
    pub fn requests(&self) -> Vec<Vec<Turn>> {
        self.requests.borrow().clone()
    }

    /// Offline walkthrough: one discovery question, then a finished document.
    pub fn demo() -> Self {
        Self::new()
            .reply([
                "Great idea. First question: ",
                "**what problem do your users hit today** that this feature solves?",
            ])
            .reply([
                "I went with a Lean PRD since the scope is an early MVP.\n\n<PRD_START>\n",
                DEMO_DOCUMENT,
                "\n<PRD_END>\n\nWant me to tighten the metrics, add personas, or split the timeline into sprints?",
            ])
    }
}

const DEMO_DOCUMENT: &str = "# Saved Searches PRD
## Problem Statement
Power users rebuild the same **complex filters** every morning.
## Goals & Success Metrics
- Cut repeat filter setup time by *50%*
- 30% of weekly actives save at least one search
## Functional Requirements
1. Save the current filter set under a name
2. Pin up to `10` saved searches
---
## Open Questions
- Should saved searches be shareable across a team?";

impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "Scripted"
    }

    fn generate(&self, request: &GenerationRequest<'_>) -> Result<Fragments<'_>, GeneratorError> {
        self.requests.borrow_mut().push(request.turns.to_vec());
        match self.scripts.borrow_mut().pop_front() {
            Some(Script::Reply(steps)) => Ok(Box::new(steps.into_iter().map(|step| match step {
                ScriptStep::Fragment(text) => Ok(text),
                ScriptStep::Fail(message) => Err(GeneratorError::Generator(message)),
            }))),
            Some(Script::Refuse(message)) => Err(GeneratorError::Generator(message)),
            None => Err(GeneratorError::Generator("script exhausted".to_owned())),
        }
    }
}
