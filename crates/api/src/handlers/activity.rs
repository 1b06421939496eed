//! Handlers for the issue activity feed.

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use axum::Json;

use issuetrack_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::services::IssueContext;
use crate::state::AppState;
use crate::views::ReassignActivityView;

// ---------------------------------------------------------------------------
// GET /projects/{project_id}/issues/{issue_id}/activity
// ---------------------------------------------------------------------------

/// Activity entries for an issue, oldest first.
pub async fn list_issue_activity(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, issue_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let mut ctx = IssueContext::new();
    let issue = ctx
        .load_project_issue(state.stores.issues.as_ref(), project_id, issue_id)
        .await?;

    let entries = state.stores.activity.list_for_issue(issue.id).await?;
    Ok(Json(DataResponse { data: entries }))
}

// ---------------------------------------------------------------------------
// GET /activity/{activity_id}/reassign
// ---------------------------------------------------------------------------

/// Render a reassignment entry as an HTML feed item.
pub async fn render_reassign_activity(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(activity_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = state
        .stores
        .activity
        .find(activity_id)
        .await?
        .ok_or_else(|| AppError::not_found("Activity", activity_id))?;

    let view = ReassignActivityView::load(&state.stores, &state.config.base_url, &entry).await?;
    let html = state.views.render_reassign(&view)?;

    tracing::debug!(activity_id, issue_id = entry.issue_id, "Rendered reassign activity");

    Ok(Html(html))
}
