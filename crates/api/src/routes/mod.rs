pub mod activity;
pub mod health;
pub mod issue;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /issues/counts                                            open/closed totals
///
/// /projects/{project_id}/issues                             list, create
/// /projects/{project_id}/issues/{issue_id}                  detail
/// /projects/{project_id}/issues/{issue_id}/assignee         reassign (PUT)
/// /projects/{project_id}/issues/{issue_id}/status           close / reopen (PUT)
/// /projects/{project_id}/issues/{issue_id}/activity         activity feed
///
/// /activity/{activity_id}/reassign                          HTML feed entry
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/issues/counts", get(handlers::issue::issue_counts))
        .nest("/projects/{project_id}/issues", issue::router())
        .nest("/activity", activity::router())
}
