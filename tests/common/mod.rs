//! Shared fixtures for integration tests: a queued catalog transport and JSON builders.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use animeverse::app::Session;
use animeverse::config::Settings;
use animeverse::sources::{CatalogTransport, FetchError};
use futures::future::BoxFuture;
use serde_json::{Value, json};

/// Replays queued responses in order; answers `{"data": []}` once drained.
#[derive(Default)]
pub struct QueuedTransport {
    queue: Mutex<VecDeque<Result<Value, FetchError>>>,
    paths: Mutex<Vec<String>>,
}

impl QueuedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn ok(&self, body: Value) -> &Self {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(body));
        self
    }

    pub fn fail(&self, err: FetchError) -> &Self {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(err));
        self
    }

    /// Request paths seen so far.
    pub fn paths(&self) -> Vec<String> {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CatalogTransport for QueuedTransport {
    fn get_json<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<Value, FetchError>> {
        Box::pin(async move {
            self.paths
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(path.to_string());
            self.queue
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
                .unwrap_or_else(|| Ok(json!({ "data": [] })))
        })
    }
}

/// Answers by exact request path; unknown paths get an empty page.
#[derive(Default)]
pub struct RoutedTransport {
    routes: Mutex<HashMap<String, Value>>,
    hits: Mutex<Vec<String>>,
}

impl RoutedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn route(&self, path: &str, body: Value) -> &Self {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), body);
        self
    }

    /// Request paths seen so far, sorted.
    pub fn hits(&self) -> Vec<String> {
        let mut hits = self
            .hits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        hits.sort();
        hits
    }
}

impl CatalogTransport for RoutedTransport {
    fn get_json<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<Value, FetchError>> {
        Box::pin(async move {
            self.hits
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(path.to_string());
            Ok(self
                .routes
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(path)
                .cloned()
                .unwrap_or_else(|| json!({ "data": [] })))
        })
    }
}

/// Anime entry with the given genres.
pub fn anime(title: &str, genres: &[&str]) -> Value {
    let genres: Vec<Value> = genres.iter().map(|g| json!({ "name": g })).collect();
    json!({
        "title": title,
        "synopsis": format!("About {title}."),
        "score": 7.5,
        "episodes": 24,
        "year": 2019,
        "images": { "jpg": { "image_url": format!("https://img.test/{title}.jpg") } },
        "genres": genres,
        "themes": [],
        "demographics": []
    })
}

/// Character entry.
pub fn character(name: &str) -> Value {
    json!({
        "name": name,
        "favorites": 42,
        "images": { "jpg": { "image_url": format!("https://img.test/{name}.png") } }
    })
}

/// `{"data": [...]}` envelope.
pub fn page(entries: Vec<Value>) -> Value {
    json!({ "data": entries })
}

/// Session without the gallery over `transport`.
pub fn grid_session(transport: Arc<QueuedTransport>) -> Session {
    Session::with_transport(transport, &Settings::default(), false)
}
