//! Core rule logic for crowdfunded projects.
//! This crate is the single source of truth for project mutation invariants.

pub mod access;
pub mod clock;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use access::policy::{AccessDecision, AccessPolicy, OwnerOnlyPolicy, ProjectAction};
pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::project::{
    checked_percentage, Project, ProjectId, ProjectProgress, ProjectValidationError,
    MAX_PERCENTAGE,
};
pub use repo::project_repo::{
    InMemoryProjectRepository, ProjectRepository, RepoError, RepoResult,
};
pub use service::rule_engine::{ProjectRuleEngine, RuleError, RuleResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
