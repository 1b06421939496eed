//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::CanCreateIssues`] -- Requires the `issue-create` capability.
//! - [`rbac::CanModifyIssues`] -- Requires the `issue-modify` capability.

pub mod auth;
pub mod rbac;
