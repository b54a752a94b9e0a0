//! Test Helper Utilities
//!
//! Shared utilities for testing sentiscope-web: a fake classifier, an app
//! rooted in a temporary upload folder and a multipart request builder.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use axum::Router;
use http_body_util::BodyExt;
use sentiscope_common::UploadStore;
use sentiscope_web::classifier::{ClassifierError, SentimentClassifier, SentimentResult};
use sentiscope_web::{build_router, AppState};
use tempfile::TempDir;

pub const BOUNDARY: &str = "sentiscope-test-boundary";

/// Keyword classifier: texts containing "love" or "great" are POSITIVE
///
/// Fails on any text equal to `fail_on`.
pub struct FakeClassifier {
    pub calls: AtomicUsize,
    pub fail_on: Option<String>,
}

impl FakeClassifier {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on: None,
        }
    }

    pub fn failing_on(text: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on: Some(text.to_string()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SentimentClassifier for FakeClassifier {
    async fn classify(&self, text: &str) -> Result<SentimentResult, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_on.as_deref() == Some(text) {
            return Err(ClassifierError::Unavailable(503, "model is loading".to_string()));
        }

        let lower = text.to_lowercase();
        let result = if lower.contains("love") || lower.contains("great") {
            SentimentResult {
                label: "POSITIVE".to_string(),
                score: 0.9876,
            }
        } else {
            SentimentResult {
                label: "NEGATIVE".to_string(),
                score: 0.9123,
            }
        };
        Ok(result)
    }

    fn model_name(&self) -> &str {
        "fake-keyword-model"
    }
}

/// App wired to a fake classifier and a temporary upload folder
pub struct TestApp {
    pub temp_dir: TempDir,
    pub store: UploadStore,
    pub classifier: Arc<FakeClassifier>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_classifier(FakeClassifier::new())
    }

    pub fn with_classifier(classifier: FakeClassifier) -> Self {
        let temp_dir = TempDir::new().expect("Should create temp dir");
        let store = UploadStore::new(temp_dir.path().join("uploads"));
        let classifier = Arc::new(classifier);
        let state = AppState::new(store.clone(), classifier.clone());
        let router = build_router(state);

        Self {
            temp_dir,
            store,
            classifier,
            router,
        }
    }

    /// Names of all files in the upload folder (empty if it does not exist)
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = match std::fs::read_dir(self.store.root()) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }
}

/// One multipart form part
pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn file(filename: &'a str, content: &'a [u8]) -> Self {
        Self {
            name: "file",
            filename: Some(filename),
            content,
        }
    }
}

/// Build a multipart/form-data POST to /upload
pub fn multipart_upload(parts: &[Part<'_>]) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: text/csv\r\n\r\n",
                    part.name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                    .as_bytes(),
            ),
        }
        body.extend_from_slice(part.content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Plain GET request
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Collect a response body as UTF-8 text
pub async fn body_text(body: Body) -> String {
    let bytes = body.collect().await.expect("Should read body").to_bytes();
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}
