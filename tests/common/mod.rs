//! Shared fixtures and mock providers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use riskgraph::provider::{EmbeddingProvider, ProviderError, ProviderResult, TextGenerator};
use riskgraph::{EventRecord, HashEmbedder, PaperRecord, PolicyRecord};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Hash embedder that counts calls and can fail on a marker substring
pub struct MockEmbedder {
    inner: HashEmbedder,
    fail_on: Option<String>,
    pub calls: AtomicUsize,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self {
            inner: HashEmbedder::new(256).unwrap(),
            fail_on: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(marker: &str) -> Self {
        Self {
            fail_on: Some(marker.to_string()),
            ..Self::new()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> ProviderResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(marker) = &self.fail_on {
            if text.contains(marker.as_str()) {
                return Err(ProviderError::ApiError("embedding service returned 503".to_string()));
            }
        }
        Ok(self.inner.embed_text(text))
    }
}

/// Generator that records prompts and echoes a canned answer
pub struct MockGenerator {
    fail: bool,
    pub prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            fail: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(ProviderError::NetworkError("connection refused".to_string()));
        }
        Ok("Winter Storm Uri caused rolling blackouts [Event:uri].".to_string())
    }
}

pub fn papers() -> Vec<PaperRecord> {
    vec![
        PaperRecord {
            id: "p-freeze".to_string(),
            title: "Grid failures under extreme cold".to_string(),
            summary: Some("Gas supply interruptions during winter storms".to_string()),
            published: Some("2021-05-01".to_string()),
        },
        PaperRecord {
            id: "p-drought".to_string(),
            title: "Drought and hydropower output".to_string(),
            summary: None,
            published: None,
        },
    ]
}

pub fn events() -> Vec<EventRecord> {
    vec![
        EventRecord {
            external_id: "uri".to_string(),
            name: "Winter Storm Uri".to_string(),
            description: Some("Statewide blackouts".to_string()),
            start_time: Some("2021-02-13".to_string()),
            end_time: Some("2021-02-17".to_string()),
            region: Some("Texas".to_string()),
            asset_type: Some("power".to_string()),
            severity: Some(0.9),
        },
        EventRecord {
            external_id: "colorado-river".to_string(),
            name: "Colorado River drought".to_string(),
            description: None,
            start_time: Some("2022-08-01".to_string()),
            end_time: None,
            region: Some("Arizona".to_string()),
            asset_type: Some("water".to_string()),
            severity: None,
        },
    ]
}

pub fn policies() -> Vec<PolicyRecord> {
    vec![PolicyRecord {
        external_id: "sb3".to_string(),
        name: "Senate Bill 3".to_string(),
        description: Some("Weatherization of generators".to_string()),
        jurisdiction: Some("Texas".to_string()),
        start_date: Some("2021-06-08".to_string()),
        end_date: None,
        category: Some("energy".to_string()),
    }]
}
