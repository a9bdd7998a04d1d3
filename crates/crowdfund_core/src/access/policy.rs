//! Caller authorization gates for project mutations.

use crate::model::project::Project;
use std::fmt::{Display, Formatter};

/// Mutating action requested against one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProjectAction {
    SetTags,
    UpdateProgress,
    SetCategory,
}

impl ProjectAction {
    /// Stable string id used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SetTags => "set_tags",
            Self::UpdateProgress => "update_progress",
            Self::SetCategory => "set_category",
        }
    }
}

impl Display for ProjectAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny,
}

impl AccessDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Authorization contract consulted before every project mutation.
///
/// Implementations must be pure: the same inputs always produce the same
/// decision.
pub trait AccessPolicy {
    fn authorize(&self, project: &Project, caller: &str, action: ProjectAction) -> AccessDecision;
}

/// Default policy: only the project owner may mutate the project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnerOnlyPolicy;

impl AccessPolicy for OwnerOnlyPolicy {
    fn authorize(&self, project: &Project, caller: &str, _action: ProjectAction) -> AccessDecision {
        if project.is_owned_by(caller) {
            AccessDecision::Allow
        } else {
            AccessDecision::Deny
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessDecision, AccessPolicy, OwnerOnlyPolicy, ProjectAction};
    use crate::model::project::Project;

    const ALL_ACTIONS: [ProjectAction; 3] = [
        ProjectAction::SetTags,
        ProjectAction::UpdateProgress,
        ProjectAction::SetCategory,
    ];

    #[test]
    fn owner_only_allows_owner_for_every_action() {
        let project = Project::new(1, "user1", "Project One").expect("valid project");
        for action in ALL_ACTIONS {
            assert_eq!(
                OwnerOnlyPolicy.authorize(&project, "user1", action),
                AccessDecision::Allow
            );
        }
    }

    #[test]
    fn owner_only_denies_everyone_else() {
        let project = Project::new(1, "user1", "Project One").expect("valid project");
        for caller in ["user2", "", "USER1"] {
            for action in ALL_ACTIONS {
                assert!(!OwnerOnlyPolicy
                    .authorize(&project, caller, action)
                    .is_allowed());
            }
        }
    }

    #[test]
    fn action_ids_are_stable() {
        assert_eq!(ProjectAction::SetTags.as_str(), "set_tags");
        assert_eq!(ProjectAction::UpdateProgress.to_string(), "update_progress");
        assert_eq!(ProjectAction::SetCategory.as_str(), "set_category");
    }
}
