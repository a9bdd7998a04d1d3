use crowdfund_core::{
    AccessDecision, AccessPolicy, InMemoryProjectRepository, Project, ProjectAction,
    ProjectRuleEngine, RuleError,
};

/// Lets one moderator update progress on any project; everything else is
/// owner-only.
struct ModeratorPolicy {
    moderator: &'static str,
}

impl AccessPolicy for ModeratorPolicy {
    fn authorize(&self, project: &Project, caller: &str, action: ProjectAction) -> AccessDecision {
        let moderated = action == ProjectAction::UpdateProgress && caller == self.moderator;
        if moderated || project.is_owned_by(caller) {
            AccessDecision::Allow
        } else {
            AccessDecision::Deny
        }
    }
}

fn engine_with_moderator() -> ProjectRuleEngine<InMemoryProjectRepository> {
    let repo = InMemoryProjectRepository::with_projects([
        Project::new(1, "user1", "Project One").unwrap(),
    ])
    .unwrap();
    ProjectRuleEngine::new(repo).with_policy(ModeratorPolicy { moderator: "mod" })
}

#[test]
fn custom_policy_can_grant_non_owner_access() {
    let mut engine = engine_with_moderator();

    let stored = engine.update_project_progress(1, 30, "mod").unwrap();

    assert_eq!(stored.percentage_complete, 30);
}

#[test]
fn custom_policy_denials_surface_as_unauthorized() {
    let mut engine = engine_with_moderator();

    let err = engine
        .set_project_tags(1, vec!["tag1".to_string()], "mod")
        .unwrap_err();

    assert_eq!(
        err,
        RuleError::Unauthorized {
            project_id: 1,
            caller: "mod".to_string(),
            action: ProjectAction::SetTags,
        }
    );
}

#[test]
fn policy_is_not_consulted_for_missing_projects() {
    let mut engine = engine_with_moderator();

    let err = engine.update_project_progress(9, 30, "mod").unwrap_err();

    assert_eq!(err, RuleError::NotFound(9));
}

#[test]
fn range_check_still_applies_to_authorized_non_owner() {
    let mut engine = engine_with_moderator();

    let err = engine.update_project_progress(1, 101, "mod").unwrap_err();

    assert_eq!(err, RuleError::InvalidPercentage(101));
    assert!(engine.project_progress(1).is_none());
}
