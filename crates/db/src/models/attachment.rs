//! Issue attachment entity model.

use issuetrack_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `projects_issues_attachments` table.
///
/// `issue_id` is `None` until the issue the file was uploaded for is created
/// and claims it by upload token.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Attachment {
    pub id: DbId,
    pub issue_id: Option<DbId>,
    /// 0 when attached to the issue itself rather than a comment.
    pub comment_id: DbId,
    pub uploaded_by: DbId,
    pub filename: String,
    pub fileextension: String,
    pub filesize: i64,
    pub upload_token: String,
    pub created_at: Timestamp,
}
