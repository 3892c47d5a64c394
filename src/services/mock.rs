use anyhow::{Result, anyhow};
use std::sync::{Arc, Mutex};

use crate::services::{CompletionRequest, CompletionServiceTrait};

/// Scripted completion backend for tests. Records every request it receives
/// and answers with a canned reply or a canned failure.
#[derive(Clone, Debug)]
pub struct MockCompletionService {
    reply: String,
    fail: bool,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockCompletionService {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: String::new(),
            fail: true,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Requests seen so far, oldest first
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl CompletionServiceTrait for MockCompletionService {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        self.calls.lock().unwrap().push(request);
        if self.fail {
            return Err(anyhow!("mock completion failure"));
        }
        Ok(self.reply.clone())
    }
}
