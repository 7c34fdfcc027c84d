//! Test utilities shared by unit tests.
//!
//! Provides a scripted catalog transport and JSON builders for catalog envelopes.

#![cfg(test)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::BoxFuture;
use serde_json::{Value, json};
use tokio::sync::Semaphore;

use crate::sources::{CatalogTransport, FetchError};

/// What: Transport that replays queued responses and records request paths.
///
/// Details:
/// - When the queue is empty it answers with an empty `data` array.
/// - A gated transport parks every request until [`ScriptedTransport::release`]
///   hands out a permit, which lets tests observe controllers mid-flight.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, FetchError>>>,
    requests: Mutex<Vec<String>>,
    gate: Option<Semaphore>,
}

impl ScriptedTransport {
    /// Transport that answers immediately.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            gate: None,
        })
    }

    /// Transport whose requests wait for [`Self::release`].
    pub fn gated() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            gate: Some(Semaphore::new(0)),
        })
    }

    /// Queue a successful body.
    pub fn push_ok(&self, body: Value) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(body));
    }

    /// Queue a failure.
    pub fn push_err(&self, err: FetchError) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(err));
    }

    /// Let `n` parked requests complete.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    /// Paths requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests issued.
    pub fn request_count(&self) -> usize {
        self.requests().len()
    }
}

impl CatalogTransport for ScriptedTransport {
    fn get_json<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<Value, FetchError>> {
        Box::pin(async move {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(path.to_string());
            if let Some(gate) = &self.gate
                && let Ok(permit) = gate.acquire().await
            {
                permit.forget();
            }
            self.responses
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
                .unwrap_or_else(|| Ok(json!({ "data": [] })))
        })
    }
}

/// Minimal well-formed anime entry.
pub fn anime_json(title: &str) -> Value {
    json!({
        "title": title,
        "synopsis": format!("{title} synopsis"),
        "score": 8.1,
        "episodes": 12,
        "year": 2020,
        "images": {"jpg": {"image_url": format!("{title}.jpg"), "large_image_url": format!("{title}-l.jpg")}},
        "genres": [{"name": "Action"}],
        "themes": [],
        "demographics": [{"name": "Shounen"}]
    })
}

/// Minimal well-formed character entry.
pub fn character_json(name: &str) -> Value {
    json!({
        "name": name,
        "favorites": 100,
        "images": {"jpg": {"image_url": format!("{name}.jpg")}}
    })
}

/// Wrap entries into a catalog envelope.
pub fn anime_envelope(entries: Vec<Value>) -> Value {
    json!({ "data": entries })
}

/// Envelope of `n` anime named `"{prefix} {i}"`.
pub fn anime_page(prefix: &str, n: usize) -> Value {
    anime_envelope((0..n).map(|i| anime_json(&format!("{prefix} {i}"))).collect())
}

/// Envelope of `n` characters named `"{prefix} {i}"`.
pub fn character_page(prefix: &str, n: usize) -> Value {
    anime_envelope((0..n).map(|i| character_json(&format!("{prefix} {i}"))).collect())
}
