//! Repository for the `projects_issues_attachments` table.

use issuetrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::attachment::Attachment;

const COLUMNS: &str = "id, issue_id, comment_id, uploaded_by, filename, fileextension, \
                       filesize, upload_token, created_at";

pub struct AttachmentRepo;

impl AttachmentRepo {
    /// Link every attachment uploaded with `upload_token` by `uploaded_by` to
    /// `issue_id`. Returns the number of rows claimed.
    pub async fn claim_for_issue(
        pool: &PgPool,
        issue_id: DbId,
        upload_token: &str,
        uploaded_by: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects_issues_attachments
             SET issue_id = $1
             WHERE upload_token = $2 AND uploaded_by = $3",
        )
        .bind(issue_id)
        .bind(upload_token)
        .bind(uploaded_by)
        .execute(pool)
        .await?;
        let claimed = result.rows_affected();
        tracing::debug!(issue_id, claimed, "Claimed attachments by upload token");
        Ok(claimed)
    }

    /// Attachments on the issue itself (not on its comments).
    pub async fn list_for_issue(
        pool: &PgPool,
        issue_id: DbId,
    ) -> Result<Vec<Attachment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects_issues_attachments
             WHERE issue_id = $1 AND comment_id = 0
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(issue_id)
            .fetch_all(pool)
            .await
    }
}
