//! Repository for the `projects_issues_comments` table.

use issuetrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::Comment;

const COLUMNS: &str = "id, project_id, issue_id, created_by, comment, created_at, updated_at";

pub struct CommentRepo;

impl CommentRepo {
    /// Comments on an issue, oldest first.
    pub async fn list_for_issue(pool: &PgPool, issue_id: DbId) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects_issues_comments
             WHERE issue_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(issue_id)
            .fetch_all(pool)
            .await
    }
}
