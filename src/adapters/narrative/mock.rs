//! Mock narrative provider for testing.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockNarrativeProvider::new()
//!     .with_response("Your risk is high because...")
//!     .with_delay(Duration::from_millis(100));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{NarrativeError, NarrativeProvider, NarrativeRequest};

/// Mock provider returning queued responses, then a default text.
#[derive(Debug, Clone, Default)]
pub struct MockNarrativeProvider {
    responses: Arc<Mutex<VecDeque<Result<String, NarrativeError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<NarrativeRequest>>>,
}

impl MockNarrativeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: NarrativeError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn get_calls(&self) -> Vec<NarrativeRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NarrativeProvider for MockNarrativeProvider {
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, NarrativeError> {
        self.calls.lock().unwrap().push(request.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Mock narrative".to_string()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
