use crate::{
    domain::{Issue, IssueUpdate, NewIssue},
    error::Result,
};
use async_trait::async_trait;

pub mod memory;
pub mod seed;

pub use memory::InMemoryStore;

/// Title marker given to duplicated issues unless a store overrides it
pub const DEFAULT_COPY_SUFFIX: &str = " (Copy)";

/// Repository of issues.
///
/// Every call may suspend and may fail independently, so callers handle
/// each result on its own.
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Returns every issue in insertion order
    async fn get_all(&self) -> Result<Vec<Issue>>;

    /// Loads an issue by internal id
    async fn get_by_id(&self, id: u64) -> Result<Issue>;

    /// Stores a new issue, assigning ids, defaults and timestamps
    async fn create(&self, new_issue: NewIssue) -> Result<Issue>;

    /// Merges `update` into an existing issue
    async fn update(&self, id: u64, update: IssueUpdate) -> Result<Issue>;

    /// Removes an issue and returns it
    async fn delete(&self, id: u64) -> Result<Issue>;

    /// Marker appended to the title of a duplicate
    fn copy_suffix(&self) -> &str {
        DEFAULT_COPY_SUFFIX
    }

    /// Creates a copy of `issue` with a fresh status and no activity history
    async fn duplicate(&self, issue: &Issue) -> Result<Issue> {
        let payload = duplicate_payload(issue, self.copy_suffix());
        self.create(payload).await
    }
}

/// Creation payload for a duplicate of `issue`.
///
/// Status and activities are dropped so the copy starts over.
pub fn duplicate_payload(issue: &Issue, suffix: &str) -> NewIssue {
    NewIssue {
        title: format!("{}{}", issue.title, suffix),
        description: issue.description.clone(),
        status: None,
        priority: Some(issue.priority),
        issue_type: Some(issue.issue_type),
        assignee: issue.assignee.clone(),
        due_date: issue.due_date,
        labels: issue.labels.clone(),
    }
}
