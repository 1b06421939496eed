//! Issue entity model and DTOs.

use issuetrack_core::issue::IssueStatus;
use issuetrack_core::paths;
use issuetrack_core::types::{DbId, StatusId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `projects_issues` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Issue {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub body: String,
    /// 0 = closed, 1 = open.
    pub status: StatusId,
    pub created_by: DbId,
    pub assigned_to: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub closed_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub closed_at: Option<Timestamp>,
}

impl Issue {
    pub fn is_open(&self) -> bool {
        self.status == IssueStatus::Open.id()
    }

    /// Relative URL of this issue, optionally with a trailing segment.
    pub fn to(&self, suffix: &str) -> String {
        paths::issue_path(self.project_id, self.id, suffix)
    }
}

/// DTO for inserting a new issue. New issues are always open.
#[derive(Debug, Clone, Deserialize)]
pub struct NewIssue {
    pub project_id: DbId,
    pub title: String,
    pub body: String,
    pub created_by: DbId,
    pub assigned_to: Option<DbId>,
}

/// Query parameters for listing a project's issues.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueListParams {
    pub status: Option<StatusId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
