//! Scripted oracle for testing without a live model.
//!
//! Replies come from a FIFO queue; once the queue is drained the last reply
//! is repeated. Every prompt is recorded for assertion in tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{OracleError, OracleResult};
use crate::oracle::Oracle;

/// A scripted reply: either text or a transport failure.
#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fail(String),
}

impl Reply {
    fn to_result(&self) -> OracleResult<String> {
        match self {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail(msg) => Err(OracleError::Other(msg.clone())),
        }
    }
}

/// Mock implementation of the `Oracle` trait.
///
/// Thread-safe via `Mutex` (fine for test contexts).
pub struct ScriptedOracle {
    replies: Mutex<VecDeque<Reply>>,
    last: Mutex<Option<Reply>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedOracle {
    /// Create a mock with no scripted replies. Calls fail until one is queued.
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            last: Mutex::new(None),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock pre-loaded with text replies, served in order.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mock = Self::new();
        for reply in replies {
            mock.queue_reply(reply);
        }
        mock
    }

    /// Create a mock whose every call fails with a transport error.
    pub fn failing(message: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.queue_failure(message);
        mock
    }

    /// Queue an additional text reply.
    pub fn queue_reply(&self, reply: impl Into<String>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Text(reply.into()));
    }

    /// Queue a transport failure.
    pub fn queue_failure(&self, message: impl Into<String>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Fail(message.into()));
    }

    /// Number of `generate` calls made so far.
    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// All prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// The most recent prompt, if any.
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }

    /// Clear recorded prompts (scripted replies are kept).
    pub fn reset(&self) {
        self.prompts.lock().unwrap().clear();
    }
}

impl Default for ScriptedOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn generate(&self, prompt: &str) -> OracleResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let next = self.replies.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        if let Some(reply) = next {
            *last = Some(reply);
        }
        match last.as_ref() {
            Some(reply) => reply.to_result(),
            None => Err(OracleError::Other("no scripted reply".into())),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
