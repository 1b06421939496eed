//! Repository for the `projects` table.

use issuetrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::Project;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, status, created_at, updated_at";

/// Read access to projects. Project management lives outside this service.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
