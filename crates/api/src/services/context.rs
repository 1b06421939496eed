//! Per-request "current issue" slot.

use issuetrack_core::types::DbId;
use issuetrack_db::models::issue::Issue;
use issuetrack_db::stores::IssueStore;

use crate::error::{AppError, AppResult};

/// Holds the issue a request is operating on.
///
/// Created by a handler, filled once by one of the `load_*` methods, and
/// dropped when the request completes. Never stored in shared state.
#[derive(Debug, Default)]
pub struct IssueContext {
    current: Option<Issue>,
}

impl IssueContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently loaded issue, if any.
    pub fn current(&self) -> Option<&Issue> {
        self.current.as_ref()
    }

    /// Take ownership of the loaded issue, leaving the slot empty.
    pub fn take(&mut self) -> Option<Issue> {
        self.current.take()
    }

    /// Load issue `id` into the slot. A missing issue clears it.
    pub async fn load_issue(&mut self, store: &dyn IssueStore, id: DbId) -> AppResult<&Issue> {
        self.current = store.find(id).await?;
        self.current
            .as_ref()
            .ok_or_else(|| AppError::not_found("Issue", id))
    }

    /// Like [`load_issue`](Self::load_issue), but an issue belonging to a
    /// different project is treated as missing.
    pub async fn load_project_issue(
        &mut self,
        store: &dyn IssueStore,
        project_id: DbId,
        issue_id: DbId,
    ) -> AppResult<&Issue> {
        self.current = store
            .find(issue_id)
            .await?
            .filter(|issue| issue.project_id == project_id);
        self.current
            .as_ref()
            .ok_or_else(|| AppError::not_found("Issue", issue_id))
    }
}
