//! Issue operations as the views invoke them.
//!
//! Depends only on [`IssueRepository`], so any backend can sit underneath.

use crate::{
    config::StoreConfig,
    domain::{Board, Issue, IssueDraft, IssueStatus, IssueUpdate, NewActivity, NewIssue},
    error::{Result, TrackError},
    notice::{Notice, Operation},
    storage::IssueRepository,
};
use tracing::{debug, info, warn};

/// Outcome of a status change
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The issue already had the requested status; nothing was written
    Unchanged,
    Moved(Issue),
}

pub struct IssueService<R> {
    repo: R,
    board: Board,
    strict_status: bool,
    record_status_activity: bool,
}

impl<R: IssueRepository> IssueService<R> {
    pub fn new(repo: R, config: &StoreConfig) -> Self {
        Self {
            repo,
            board: Board::default(),
            strict_status: config.strict_status,
            record_status_activity: config.record_status_activity,
        }
    }

    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub async fn load(&self) -> Result<Vec<Issue>> {
        self.repo.get_all().await.map_err(|e| {
            warn!(error = %e, "failed to load issues");
            e
        })
    }

    pub async fn create(&self, new_issue: NewIssue) -> Result<Issue> {
        self.repo.create(new_issue).await.map_err(|e| {
            warn!(error = %e, "failed to create issue");
            e
        })
    }

    /// Validates form input, then creates the issue
    pub async fn create_from_draft(&self, draft: IssueDraft) -> Result<Issue> {
        let new_issue = draft.into_new_issue()?;
        self.create(new_issue).await
    }

    pub async fn update(&self, id: u64, update: IssueUpdate) -> Result<Issue> {
        self.repo.update(id, update).await.map_err(|e| {
            warn!(id, error = %e, "failed to update issue");
            e
        })
    }

    /// Validates edited form input, then overwrites the issue's fields
    pub async fn update_from_draft(&self, id: u64, draft: IssueDraft) -> Result<Issue> {
        let update = draft.into_update()?;
        self.update(id, update).await
    }

    /// Appends a free-text note to the activity log
    pub async fn add_note(&self, id: u64, message: impl Into<String>) -> Result<Issue> {
        self.update(id, IssueUpdate::activity(NewActivity::note(message)))
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<Issue> {
        self.repo.delete(id).await.map_err(|e| {
            warn!(id, error = %e, "failed to delete issue");
            e
        })
    }

    pub async fn duplicate(&self, issue: &Issue) -> Result<Issue> {
        self.repo.duplicate(issue).await.map_err(|e| {
            warn!(id = issue.internal_id, error = %e, "failed to duplicate issue");
            e
        })
    }

    /// Moves `issue` to `new_status`.
    ///
    /// `issue` is the caller's current snapshot. When it already has the
    /// requested status the repository is not called at all.
    pub async fn change_status(
        &self,
        issue: &Issue,
        new_status: impl Into<IssueStatus>,
    ) -> Result<Transition> {
        let new_status = new_status.into();

        if issue.status == new_status {
            debug!(id = issue.internal_id, status = %new_status, "status unchanged, skipping");
            return Ok(Transition::Unchanged);
        }

        if self.strict_status && !new_status.is_workflow() {
            return Err(TrackError::Validation(format!(
                "unknown status '{}'",
                new_status
            )));
        }

        let mut update = IssueUpdate::status(new_status.clone());
        if self.record_status_activity {
            update = update.with_activity(NewActivity::status_change(&issue.status, &new_status));
        }

        match self.repo.update(issue.internal_id, update).await {
            Ok(moved) => {
                info!(
                    id = issue.internal_id,
                    from = %issue.status,
                    to = %new_status,
                    "issue status changed"
                );
                Ok(Transition::Moved(moved))
            }
            Err(e) => {
                warn!(id = issue.internal_id, error = %e, "failed to change issue status");
                Err(e)
            }
        }
    }

    /// Notice for a status change; `None` when nothing happened
    pub fn status_notice(&self, result: &Result<Transition>) -> Option<Notice> {
        match result {
            Ok(Transition::Unchanged) => None,
            Ok(Transition::Moved(issue)) => Some(Notice::success(format!(
                "Issue moved to {}",
                self.board.column_title(&issue.status)
            ))),
            Err(_) => Some(Notice::for_result(Operation::StatusChange, result)),
        }
    }
}
