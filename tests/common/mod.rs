#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use pad_client::{HttpResponse, PadClient, PadConfig, PadError, Transport};

pub const API_URL: &str = "https://pad.test/api/v2";
pub const IMAGE_HOST: &str = "https://pad.test";

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Serves fixture files for API paths and records every requested URL.
/// Unknown URLs answer 404.
#[derive(Default)]
pub struct FixtureTransport {
    routes: HashMap<String, HttpResponse>,
    pub requests: RefCell<Vec<String>>,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fixture(self, path: &str, name: &str) -> Self {
        let body = std::fs::read(fixture_path(name)).expect("Failed to read fixture");
        self.respond(path, 200, body)
    }

    pub fn body(self, path: &str, body: &str) -> Self {
        self.respond(path, 200, body.as_bytes().to_vec())
    }

    pub fn status(self, path: &str, status: u16) -> Self {
        self.respond(path, status, b"{\"detail\": \"error\"}".to_vec())
    }

    /// Register a response for a full URL (used for image hosts).
    pub fn url(mut self, url: &str, status: u16, body: Vec<u8>) -> Self {
        self.routes.insert(url.to_string(), HttpResponse::new(status, body));
        self
    }

    fn respond(mut self, path: &str, status: u16, body: Vec<u8>) -> Self {
        self.routes
            .insert(format!("{}{}", API_URL, path), HttpResponse::new(status, body));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self, path: &str) -> usize {
        let url = format!("{}{}", API_URL, path);
        self.requests.borrow().iter().filter(|u| **u == url).count()
    }
}

impl Transport for FixtureTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, PadError> {
        self.requests.borrow_mut().push(url.to_string());
        Ok(self
            .routes
            .get(url)
            .cloned()
            .unwrap_or_else(|| HttpResponse::new(404, "{\"detail\": \"Not Found\"}")))
    }
}

pub fn test_config() -> PadConfig {
    PadConfig {
        api_url: API_URL.to_string(),
        image_host: IMAGE_HOST.to_string(),
        ..PadConfig::default()
    }
}

pub fn client(transport: FixtureTransport) -> PadClient<FixtureTransport> {
    PadClient::with_transport(test_config(), transport)
}

/// Transport serving the standard project/card fixtures.
pub fn standard_transport() -> FixtureTransport {
    FixtureTransport::new()
        .fixture("/projects", "projects.json")
        .fixture("/projects/3/cards", "project_3_cards.json")
        .fixture("/projects/4/cards", "project_4_cards.json")
        .body("/projects/9/cards", "[]")
        .body("/projects/3", r#"{"id": 3, "project_name": "FHI360"}"#)
        .body("/projects/4", r#"{"id": 4, "project_name": "Antibiotic Lab"}"#)
        .fixture("/cards/42276", "card_42276.json")
        .fixture("/cards/issues", "card_issues.json")
        .fixture("/neural-networks", "neural_networks.json")
}

/// Formatted log output collected by [`capture_logs`].
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).lines().map(str::to_string).collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.trim_start().starts_with("WARN"))
            .collect()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local fmt subscriber writing into a [`LogBuffer`].
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, LogBuffer) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer)
}
