//! In-memory issue store.
//!
//! Holds the canonical issue list for the lifetime of the process. Each
//! operation runs on its own spawned task: it waits out the configured
//! latency, then takes the store lock and completes its read-modify-write.
//! Dropping the caller's future does not stop that task, so an abandoned
//! operation still mutates the store and callers must not assume otherwise.

use crate::{
    config::StoreConfig,
    domain::{DisplayId, Issue, IssueUpdate, NewIssue},
    error::{Result, TrackError},
    storage::{seed, IssueRepository},
};
use async_trait::async_trait;
use chrono::Utc;
use std::{path::Path, sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::{debug, info};

struct InMemoryStoreInner {
    issues: Vec<Issue>,
    /// Highest internal id ever issued, so deleted ids are never reused
    highest_id: u64,
}

impl InMemoryStoreInner {
    fn position(&self, id: u64) -> Result<usize> {
        self.issues
            .iter()
            .position(|issue| issue.internal_id == id)
            .ok_or(TrackError::IssueNotFound(id))
    }

    fn next_id(&mut self) -> u64 {
        let max_existing = self.issues.iter().map(|i| i.internal_id).max().unwrap_or(0);
        self.highest_id = self.highest_id.max(max_existing) + 1;
        self.highest_id
    }

    fn create(&mut self, config: &StoreConfig, new_issue: NewIssue) -> Issue {
        let id = self.next_id();
        let display_id = DisplayId::new(&config.id_prefix, config.id_width, self.issues.len() + 1);
        let issue = Issue::from_new(id, display_id, new_issue, &config.defaults, Utc::now());

        info!(id, display_id = %issue.display_id, "created issue");
        self.issues.push(issue.clone());
        issue
    }

    fn update(&mut self, id: u64, update: IssueUpdate) -> Result<Issue> {
        let index = self.position(id)?;

        let mut updated = self.issues[index].clone();
        updated.apply_update(update, Utc::now());
        self.issues[index] = updated.clone();

        info!(id, status = %updated.status, "updated issue");
        Ok(updated)
    }

    fn delete(&mut self, id: u64) -> Result<Issue> {
        let index = self.position(id)?;
        let removed = self.issues.remove(index);

        info!(id, "deleted issue");
        Ok(removed)
    }
}

/// Cloneable handle to a shared in-memory store
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<Mutex<InMemoryStoreInner>>,
    config: Arc<StoreConfig>,
}

impl InMemoryStore {
    /// Creates an empty store
    pub fn new(config: StoreConfig) -> Result<Self> {
        Self::with_seed(config, Vec::new())
    }

    /// Creates a store holding `seed` as its initial contents
    pub fn with_seed(config: StoreConfig, seed: Vec<Issue>) -> Result<Self> {
        config.validate()?;
        seed::check_unique_ids(&seed)?;

        let highest_id = seed.iter().map(|i| i.internal_id).max().unwrap_or(0);
        debug!(count = seed.len(), highest_id, "seeding in-memory store");

        Ok(Self {
            inner: Arc::new(Mutex::new(InMemoryStoreInner {
                issues: seed,
                highest_id,
            })),
            config: Arc::new(config),
        })
    }

    /// Creates a store from a JSON seed file
    pub async fn from_seed_file(config: StoreConfig, path: impl AsRef<Path>) -> Result<Self> {
        let issues = seed::load_seed(path).await?;
        Self::with_seed(config, issues)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Runs `op` on a detached task after `delay`.
    ///
    /// The task owns its own handles to the store, so it runs to completion
    /// even when the returned future is dropped.
    async fn run<T, F>(&self, delay: Duration, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut InMemoryStoreInner, &StoreConfig) -> Result<T> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let config = Arc::clone(&self.config);

        let handle = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let mut guard = inner.lock().await;
            op(&mut *guard, &*config)
        });

        handle
            .await
            .map_err(|e| TrackError::StorageError(format!("store task failed: {}", e)))?
    }
}

#[async_trait]
impl IssueRepository for InMemoryStore {
    async fn get_all(&self) -> Result<Vec<Issue>> {
        self.run(self.config.latency.get_all(), |inner, _| {
            debug!(count = inner.issues.len(), "listing issues");
            Ok(inner.issues.clone())
        })
        .await
    }

    async fn get_by_id(&self, id: u64) -> Result<Issue> {
        self.run(self.config.latency.get_by_id(), move |inner, _| {
            let index = inner.position(id)?;
            Ok(inner.issues[index].clone())
        })
        .await
    }

    async fn create(&self, new_issue: NewIssue) -> Result<Issue> {
        self.run(self.config.latency.create(), move |inner, config| {
            Ok(inner.create(config, new_issue))
        })
        .await
    }

    async fn update(&self, id: u64, update: IssueUpdate) -> Result<Issue> {
        self.run(self.config.latency.update(), move |inner, _| inner.update(id, update))
            .await
    }

    async fn delete(&self, id: u64) -> Result<Issue> {
        self.run(self.config.latency.delete(), move |inner, _| inner.delete(id))
            .await
    }

    fn copy_suffix(&self) -> &str {
        &self.config.copy_suffix
    }
}
