use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::BoxFuture;

use deskflow_core::error::{DeskflowError, Result};
use deskflow_core::traits::CompletionClient;

/// Deterministic stub completion service. Answers by prompt prefix and
/// counts how many times it was called.
pub struct ScriptedClient {
    category: &'static str,
    sentiment: &'static str,
    reply: &'static str,
    calls: AtomicUsize,
}

impl ScriptedClient {
    pub fn new(category: &'static str, sentiment: &'static str, reply: &'static str) -> Self {
        Self {
            category,
            sentiment,
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CompletionClient for ScriptedClient {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if prompt.starts_with("Categorize") {
                Ok(self.category.to_string())
            } else if prompt.starts_with("Analyze the sentiment") {
                Ok(self.sentiment.to_string())
            } else {
                Ok(self.reply.to_string())
            }
        })
    }
}

/// Stub completion service that fails every call.
pub struct FailingClient {
    message: &'static str,
}

impl FailingClient {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl CompletionClient for FailingClient {
    fn complete<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move { Err(DeskflowError::CompletionRequest(self.message.to_string())) })
    }
}

/// Stub that answers the category prompt but fails the sentiment prompt,
/// for testing mid-workflow aborts.
pub struct FailAfterCategorize {
    calls: AtomicUsize,
}

impl FailAfterCategorize {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CompletionClient for FailAfterCategorize {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if prompt.starts_with("Categorize") {
                Ok("Technical".to_string())
            } else {
                Err(DeskflowError::CompletionRequest(
                    "HTTP 503: upstream unavailable".to_string(),
                ))
            }
        })
    }
}
