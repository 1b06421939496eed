//! Route definitions for project issues.
//!
//! Mounted at `/projects/{project_id}/issues` by `api_routes()`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{activity, issue};
use crate::state::AppState;

/// Issue routes.
///
/// ```text
/// GET    /                        -> list_issues
/// POST   /                        -> create_issue (issue-create)
/// GET    /{issue_id}              -> get_issue
/// PUT    /{issue_id}/assignee     -> reassign_issue (issue-modify)
/// PUT    /{issue_id}/status       -> change_issue_status (issue-modify)
/// GET    /{issue_id}/activity     -> list_issue_activity
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(issue::list_issues).post(issue::create_issue))
        .route("/{issue_id}", get(issue::get_issue))
        .route("/{issue_id}/assignee", put(issue::reassign_issue))
        .route("/{issue_id}/status", put(issue::change_issue_status))
        .route("/{issue_id}/activity", get(activity::list_issue_activity))
}
