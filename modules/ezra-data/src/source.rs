//! Where CSV text comes from: HTTP, a local directory, or memory.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use ezra_common::DataLocation;

use crate::error::{DataError, Result};

/// Fetches the raw text of a named CSV resource.
#[async_trait]
pub trait CsvSource: Send + Sync {
    async fn fetch_text(&self, path: &str) -> Result<String>;
}

/// Fetch resources relative to a base URL.
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl CsvSource for HttpSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let url = self.url_for(path);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::Status {
                status: status.as_u16(),
                path: url,
            });
        }

        Ok(resp.text().await?)
    }
}

/// Read resources from a directory on disk.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl CsvSource for DirSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let full = self.root.join(path.trim_start_matches('/'));
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|e| DataError::Io(format!("{}: {e}", full.display())))
    }
}

/// In-memory resources. Missing paths behave like an HTTP 404.
#[derive(Default)]
pub struct StaticSource {
    files: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, text: &str) -> Self {
        self.files.insert(path.to_string(), text.to_string());
        self
    }
}

#[async_trait]
impl CsvSource for StaticSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| DataError::Status {
                status: 404,
                path: path.to_string(),
            })
    }
}

pub fn source_for(location: &DataLocation) -> Arc<dyn CsvSource> {
    match location {
        DataLocation::Url(base) => Arc::new(HttpSource::new(base.clone())),
        DataLocation::Dir(dir) => Arc::new(DirSource::new(dir.clone())),
    }
}
