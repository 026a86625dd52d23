//! Mock source transport for testing.
//!
//! Routes requests by source kind to pre-configured replies, so pipelines
//! can be exercised without network access.
//!
//! # Example
//!
//! ```ignore
//! let transport = MockTransport::new()
//!     .with_json(SourceKind::AirQuality, json!({"status": "ok", "data": {"aqi": 220}}))
//!     .then_error(SourceKind::Weather, SourceError::Timeout)
//!     .with_json(SourceKind::Weather, weather_body);
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::provenance::SourceKind;
use crate::ports::{SourceError, SourceRequest, SourceTransport};

/// A configured reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    Json(Value),
    Error(SourceError),
}

#[derive(Debug, Default)]
struct Route {
    /// Consumed first, in order.
    queued: VecDeque<MockReply>,
    /// Returned once the queue is empty.
    standing: Option<MockReply>,
}

/// Mock transport with per-source replies and call tracking.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<HashMap<SourceKind, Route>>>,
    calls: Arc<Mutex<Vec<SourceRequest>>>,
    delay: Duration,
    stalls: HashMap<SourceKind, Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies with `body` to every request for `kind` once queued replies run out.
    pub fn with_json(self, kind: SourceKind, body: Value) -> Self {
        self.with_standing(kind, MockReply::Json(body))
    }

    /// Fails every request for `kind` once queued replies run out.
    pub fn with_error(self, kind: SourceKind, error: SourceError) -> Self {
        self.with_standing(kind, MockReply::Error(error))
    }

    /// Queues a one-off failure ahead of the standing reply.
    pub fn then_error(self, kind: SourceKind, error: SourceError) -> Self {
        self.enqueue(kind, MockReply::Error(error))
    }

    /// Queues a one-off body ahead of the standing reply.
    pub fn then_json(self, kind: SourceKind, body: Value) -> Self {
        self.enqueue(kind, MockReply::Json(body))
    }

    /// Fails every source with the same error.
    pub fn failing_all(self, error: SourceError) -> Self {
        SourceKind::all()
            .iter()
            .fold(self, |transport, kind| transport.with_error(*kind, error.clone()))
    }

    /// Simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Simulated latency for one source, overriding `with_delay`.
    pub fn with_delay_for(mut self, kind: SourceKind, delay: Duration) -> Self {
        self.stalls.insert(kind, delay);
        self
    }

    fn with_standing(self, kind: SourceKind, reply: MockReply) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry(kind)
            .or_default()
            .standing = Some(reply);
        self
    }

    fn enqueue(self, kind: SourceKind, reply: MockReply) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry(kind)
            .or_default()
            .queued
            .push_back(reply);
        self
    }

    /// Every request received, in order.
    pub fn calls(&self) -> Vec<SourceRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, kind: SourceKind) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.kind == kind)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn next_reply(&self, kind: SourceKind) -> Option<MockReply> {
        let mut routes = self.routes.lock().unwrap();
        let route = routes.get_mut(&kind)?;
        route.queued.pop_front().or_else(|| route.standing.clone())
    }
}

#[async_trait]
impl SourceTransport for MockTransport {
    async fn get_json(&self, request: &SourceRequest) -> Result<Value, SourceError> {
        self.calls.lock().unwrap().push(request.clone());

        let delay = self.stalls.get(&request.kind).copied().unwrap_or(self.delay);
        if !delay.is_zero() {
            sleep(delay).await;
        }

        match self.next_reply(request.kind) {
            Some(MockReply::Json(body)) => Ok(body),
            Some(MockReply::Error(err)) => Err(err),
            None => Err(SourceError::Network(format!(
                "no mock reply configured for {}",
                request.kind
            ))),
        }
    }
}
