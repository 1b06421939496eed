//! Capability-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! grant the required capability. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use issuetrack_core::error::CoreError;
use issuetrack_core::permissions::{ISSUE_CREATE, ISSUE_MODIFY};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require_capability(
    parts: &mut Parts,
    state: &AppState,
    capability: &'static str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !user.actor().can(capability) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Capability '{capability}' required"
        ))));
    }
    Ok(user)
}

/// Requires `issue-create`. Rejects with 403 Forbidden otherwise.
pub struct CanCreateIssues(pub AuthUser);

impl FromRequestParts<AppState> for CanCreateIssues {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_capability(parts, state, ISSUE_CREATE)
            .await
            .map(CanCreateIssues)
    }
}

/// Requires `issue-modify` (reassigning, closing, reopening).
///
/// ```ignore
/// async fn close(CanModifyIssues(user): CanModifyIssues) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct CanModifyIssues(pub AuthUser);

impl FromRequestParts<AppState> for CanModifyIssues {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_capability(parts, state, ISSUE_MODIFY)
            .await
            .map(CanModifyIssues)
    }
}
