//! Role names, capability names, and the mapping between them.
//!
//! Role names must match the `role` column values seeded in the `users`
//! migration. Each role inherits every capability of the roles below it.

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

pub const ROLE_USER: &str = "user";
pub const ROLE_DEVELOPER: &str = "developer";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_ADMINISTRATOR: &str = "administrator";

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

pub const ISSUE_VIEW: &str = "issue-view";
pub const ISSUE_CREATE: &str = "issue-create";
pub const ISSUE_COMMENT: &str = "issue-comment";
/// Allows assigning, reassigning, closing and reopening issues.
pub const ISSUE_MODIFY: &str = "issue-modify";
pub const PROJECT_CREATE: &str = "project-create";
pub const PROJECT_MODIFY: &str = "project-modify";
pub const ADMINISTRATION: &str = "administration";

const USER_CAPABILITIES: &[&str] = &[ISSUE_VIEW, ISSUE_CREATE, ISSUE_COMMENT];
const DEVELOPER_CAPABILITIES: &[&str] = &[ISSUE_VIEW, ISSUE_CREATE, ISSUE_COMMENT, ISSUE_MODIFY];
const MANAGER_CAPABILITIES: &[&str] = &[
    ISSUE_VIEW,
    ISSUE_CREATE,
    ISSUE_COMMENT,
    ISSUE_MODIFY,
    PROJECT_CREATE,
    PROJECT_MODIFY,
];
const ADMINISTRATOR_CAPABILITIES: &[&str] = &[
    ISSUE_VIEW,
    ISSUE_CREATE,
    ISSUE_COMMENT,
    ISSUE_MODIFY,
    PROJECT_CREATE,
    PROJECT_MODIFY,
    ADMINISTRATION,
];

/// Capabilities granted to `role`. Unknown roles get none.
pub fn capabilities_for_role(role: &str) -> &'static [&'static str] {
    match role {
        ROLE_USER => USER_CAPABILITIES,
        ROLE_DEVELOPER => DEVELOPER_CAPABILITIES,
        ROLE_MANAGER => MANAGER_CAPABILITIES,
        ROLE_ADMINISTRATOR => ADMINISTRATOR_CAPABILITIES,
        _ => &[],
    }
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// The user performing an operation, with the capabilities they hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: DbId,
    pub capabilities: Vec<String>,
}

impl Actor {
    pub fn new<I, S>(id: DbId, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            capabilities: capabilities.into_iter().map(Into::into).collect(),
        }
    }

    /// Build an actor from a role name using [`capabilities_for_role`].
    pub fn from_role(id: DbId, role: &str) -> Self {
        Self::new(id, capabilities_for_role(role).iter().copied())
    }

    pub fn can(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_user_cannot_modify_issues() {
        let actor = Actor::from_role(1, ROLE_USER);
        assert!(actor.can(ISSUE_CREATE));
        assert!(!actor.can(ISSUE_MODIFY));
    }

    #[test]
    fn developer_and_above_can_modify_issues() {
        for role in [ROLE_DEVELOPER, ROLE_MANAGER, ROLE_ADMINISTRATOR] {
            assert!(
                Actor::from_role(1, role).can(ISSUE_MODIFY),
                "{role} should hold {ISSUE_MODIFY}"
            );
        }
    }

    #[test]
    fn only_administrator_has_administration() {
        assert!(Actor::from_role(1, ROLE_ADMINISTRATOR).can(ADMINISTRATION));
        assert!(!Actor::from_role(1, ROLE_MANAGER).can(ADMINISTRATION));
    }

    #[test]
    fn unknown_role_has_no_capabilities() {
        assert!(capabilities_for_role("guest").is_empty());
        assert!(!Actor::from_role(1, "guest").can(ISSUE_VIEW));
    }
}
