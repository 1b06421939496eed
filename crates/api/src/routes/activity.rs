//! Route definitions for rendered activity entries.
//!
//! Mounted at `/activity` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::activity;
use crate::state::AppState;

/// ```text
/// GET    /{activity_id}/reassign  -> render_reassign_activity (text/html)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{activity_id}/reassign",
        get(activity::render_reassign_activity),
    )
}
