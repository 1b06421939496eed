//! Application URL paths.

use crate::types::DbId;

/// Relative path of an issue page, with an optional trailing segment.
///
/// `issue_path(1, 3, "")` is `project/1/issue/3`;
/// `issue_path(1, 3, "edit")` is `project/1/issue/3/edit`.
pub fn issue_path(project_id: DbId, issue_id: DbId, suffix: &str) -> String {
    let suffix = suffix.trim_matches('/');
    if suffix.is_empty() {
        format!("project/{project_id}/issue/{issue_id}")
    } else {
        format!("project/{project_id}/issue/{issue_id}/{suffix}")
    }
}

/// Join a relative path onto the configured site base URL.
///
/// An empty base yields a root-relative path.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
