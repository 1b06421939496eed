//! Issue comment entity model.

use issuetrack_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `projects_issues_comments` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub project_id: DbId,
    pub issue_id: DbId,
    pub created_by: DbId,
    pub comment: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
