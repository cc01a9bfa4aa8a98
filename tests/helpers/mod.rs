#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;

use packrat::archive::store::Store;
use packrat::archive::types::ArticleDraft;
use packrat::gateway::GenerativeModel;

/// Open a fresh store backed by a temp data file. Keep the `TempDir` alive
/// for the duration of the test.
pub fn test_store() -> (TempDir, Store) {
    let tmp = TempDir::new().unwrap();
    let store = Store::open(data_path(&tmp));
    (tmp, store)
}

/// The data file path inside a test temp dir.
pub fn data_path(tmp: &TempDir) -> PathBuf {
    tmp.path().join("articles.json")
}

/// A minimal valid draft with the given title, category, and keywords.
pub fn draft(title: &str, category: &str, keywords: &[&str]) -> ArticleDraft {
    ArticleDraft {
        title: title.to_string(),
        category: category.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        ..Default::default()
    }
}

/// Stub model for gateway tests: replies with a canned transform of the
/// request, or fails every call, and records the order calls arrived in.
pub struct StubModel {
    fail: bool,
    pub log: Arc<std::sync::Mutex<Vec<String>>>,
    pub calls: Arc<AtomicUsize>,
}

impl StubModel {
    pub fn ok() -> Self {
        Self {
            fail: false,
            log: Arc::new(std::sync::Mutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            log: Arc::new(std::sync::Mutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl GenerativeModel for StubModel {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(format!("text:{prompt}"));
        if self.fail {
            anyhow::bail!("stubbed remote failure");
        }
        Ok("stub summary".to_string())
    }

    async fn generate_from_file(
        &self,
        _prompt: &str,
        data: &[u8],
        mime_type: &str,
    ) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log
            .lock()
            .unwrap()
            .push(format!("file:{mime_type}"));
        if self.fail {
            anyhow::bail!("stubbed remote failure");
        }
        Ok(format!("content of {}", String::from_utf8_lossy(data)))
    }
}
