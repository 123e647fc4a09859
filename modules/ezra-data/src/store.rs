//! Process-wide holder of the current project list.
//!
//! The store is the only writer. Readers take cheap snapshots that share the
//! list through an `Arc`, so a refresh never mutates data a view is rendering.

use std::sync::Arc;

use ezra_common::ResearchProject;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::loader::CsvLoader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// No load has started yet.
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreSnapshot {
    pub projects: Arc<Vec<ResearchProject>>,
    pub status: LoadStatus,
    pub loading: bool,
    pub error: Option<String>,
}

impl StoreSnapshot {
    pub fn find(&self, id: &str) -> Option<&ResearchProject> {
        self.projects.iter().find(|p| p.id == id)
    }
}

struct StoreState {
    projects: Arc<Vec<ResearchProject>>,
    status: LoadStatus,
    error: Option<String>,
}

pub struct ProjectsStore {
    loader: Arc<CsvLoader>,
    state: RwLock<StoreState>,
    // Serializes refreshes so two loads never race to publish.
    refresh_lock: Mutex<()>,
}

impl ProjectsStore {
    pub fn new(loader: Arc<CsvLoader>) -> Self {
        Self {
            loader,
            state: RwLock::new(StoreState {
                projects: Arc::new(Vec::new()),
                status: LoadStatus::Idle,
                error: None,
            }),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn loader(&self) -> &CsvLoader {
        &self.loader
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read().await;
        StoreSnapshot {
            projects: state.projects.clone(),
            status: state.status,
            // Views treat "not started" the same as "in flight".
            loading: matches!(state.status, LoadStatus::Idle | LoadStatus::Loading),
            error: state.error.clone(),
        }
    }

    /// Mark the store as loading without starting a fetch. Used at start-up so
    /// the first request sees `Loading` even before the spawned load runs.
    pub async fn mark_loading(&self) {
        let mut state = self.state.write().await;
        state.status = LoadStatus::Loading;
    }

    /// Reload the project list. On success the list is replaced wholesale; on
    /// failure the previous list is kept and the error message recorded.
    pub async fn refresh(&self) -> StoreSnapshot {
        let _guard = self.refresh_lock.lock().await;

        {
            let mut state = self.state.write().await;
            state.status = LoadStatus::Loading;
            state.error = None;
        }

        let result = self.loader.load_projects().await;

        {
            let mut state = self.state.write().await;
            match result {
                Ok(loaded) => {
                    state.projects = Arc::new(loaded.projects);
                    state.status = LoadStatus::Loaded;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load projects");
                    state.status = LoadStatus::Failed;
                    state.error = Some(e.to_string());
                }
            }
            info!(status = ?state.status, count = state.projects.len(), "Project store refreshed");
        }

        self.snapshot().await
    }
}
