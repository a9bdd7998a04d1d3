//! Project rule engine.
//!
//! # Responsibility
//! - Validate and apply owner-only mutations to project metadata.
//! - Surface rejections as distinguishable `RuleError` kinds.
//!
//! # Invariants
//! - Checks run in a fixed order: existence, authorization, value range.
//! - Every check completes before the repository is touched, so a rejected
//!   call leaves all state unchanged.
//! - Successful writes replace the previous value wholesale.

use crate::access::policy::{AccessPolicy, OwnerOnlyPolicy, ProjectAction};
use crate::clock::{Clock, SystemClock};
use crate::model::project::{checked_percentage, Project, ProjectId, ProjectProgress};
use crate::repo::project_repo::{ProjectRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reasons for rule engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// Referenced project does not exist.
    NotFound(ProjectId),
    /// Caller is not allowed to perform `action` on the project.
    Unauthorized {
        project_id: ProjectId,
        caller: String,
        action: ProjectAction,
    },
    /// Progress value outside `0..=100`.
    InvalidPercentage(i64),
    /// Category is blank after trimming.
    InvalidCategory(String),
    /// Storage-level failure while seeding.
    Repo(RepoError),
}

impl RuleError {
    /// Stable numeric code for user-facing presentation.
    pub fn code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Unauthorized { .. } => 403,
            Self::InvalidPercentage(_) | Self::InvalidCategory(_) => 400,
            Self::Repo(RepoError::DuplicateProject(_)) => 409,
            Self::Repo(_) => 422,
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Unauthorized { .. } => "unauthorized",
            Self::InvalidPercentage(_) => "invalid_percentage",
            Self::InvalidCategory(_) => "invalid_category",
            Self::Repo(_) => "repo",
        }
    }
}

impl Display for RuleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "project not found: {id}"),
            Self::Unauthorized {
                project_id,
                caller,
                action,
            } => write!(
                f,
                "caller `{caller}` is not authorized to {action} on project {project_id}"
            ),
            Self::InvalidPercentage(value) => {
                write!(f, "invalid percentage: {value}; expected 0..=100")
            }
            Self::InvalidCategory(value) => write!(f, "invalid category: `{value}`"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RuleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for RuleError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub type RuleResult<T> = Result<T, RuleError>;

/// Validates and applies project metadata mutations.
///
/// Owns its repository; callers pass the authenticated identity on every
/// call.
pub struct ProjectRuleEngine<R: ProjectRepository> {
    repo: R,
    policy: Box<dyn AccessPolicy>,
    clock: Box<dyn Clock>,
}

impl<R: ProjectRepository> ProjectRuleEngine<R> {
    /// Creates an engine with `OwnerOnlyPolicy` and the system clock.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            policy: Box::new(OwnerOnlyPolicy),
            clock: Box::new(SystemClock),
        }
    }

    /// Replaces the authorization policy.
    pub fn with_policy(mut self, policy: impl AccessPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Replaces the time source used for `last_update`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Read access to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Validates and stores one externally supplied project.
    pub fn seed_project(&mut self, project: Project) -> RuleResult<()> {
        let project_id = project.id;
        if let Err(err) = self.repo.insert_project(project) {
            let err = RuleError::Repo(err);
            log_rejection("seed_project", project_id, &err);
            return Err(err);
        }
        info!(
            "event=project_seeded module=rules status=ok project_id={}",
            project_id
        );
        Ok(())
    }

    /// Replaces the full tag list of a project.
    ///
    /// Tags are stored verbatim and in the given order.
    pub fn set_project_tags(
        &mut self,
        project_id: ProjectId,
        tags: Vec<String>,
        caller: &str,
    ) -> RuleResult<()> {
        self.authorize(project_id, caller, ProjectAction::SetTags)?;

        let tag_count = tags.len();
        self.repo.set_tags(project_id, tags)?;
        info!(
            "event=project_tags_set module=rules status=ok project_id={} tag_count={}",
            project_id, tag_count
        );
        Ok(())
    }

    /// Records a new completion percentage stamped with the current time.
    ///
    /// Returns the stored record.
    pub fn update_project_progress(
        &mut self,
        project_id: ProjectId,
        percentage: i64,
        caller: &str,
    ) -> RuleResult<ProjectProgress> {
        self.authorize(project_id, caller, ProjectAction::UpdateProgress)?;

        let Some(percentage_complete) = checked_percentage(percentage) else {
            let err = RuleError::InvalidPercentage(percentage);
            log_rejection(ProjectAction::UpdateProgress.as_str(), project_id, &err);
            return Err(err);
        };

        let progress = ProjectProgress {
            percentage_complete,
            last_update: self.clock.now_epoch_ms(),
        };
        self.repo.set_progress(project_id, progress)?;
        info!(
            "event=project_progress_updated module=rules status=ok project_id={} percentage={} last_update={}",
            project_id, progress.percentage_complete, progress.last_update
        );
        Ok(progress)
    }

    /// Replaces the category of a project. Surrounding whitespace is trimmed.
    pub fn set_project_category(
        &mut self,
        project_id: ProjectId,
        category: &str,
        caller: &str,
    ) -> RuleResult<()> {
        self.authorize(project_id, caller, ProjectAction::SetCategory)?;

        let trimmed = category.trim();
        if trimmed.is_empty() {
            let err = RuleError::InvalidCategory(category.to_string());
            log_rejection(ProjectAction::SetCategory.as_str(), project_id, &err);
            return Err(err);
        }

        self.repo.set_category(project_id, trimmed.to_string())?;
        info!(
            "event=project_category_set module=rules status=ok project_id={}",
            project_id
        );
        Ok(())
    }

    pub fn project(&self, project_id: ProjectId) -> Option<&Project> {
        self.repo.get_project(project_id)
    }

    pub fn project_count(&self) -> usize {
        self.repo.project_count()
    }

    pub fn project_tags(&self, project_id: ProjectId) -> Option<&[String]> {
        self.repo.get_tags(project_id)
    }

    pub fn project_progress(&self, project_id: ProjectId) -> Option<ProjectProgress> {
        self.repo.get_progress(project_id)
    }

    pub fn project_category(&self, project_id: ProjectId) -> Option<&str> {
        self.repo.get_category(project_id)
    }

    /// Lists ids of projects tagged with exactly `tag`, ascending.
    pub fn projects_with_tag(&self, tag: &str) -> Vec<ProjectId> {
        self.repo.ids_with_tag(tag)
    }

    fn authorize(
        &self,
        project_id: ProjectId,
        caller: &str,
        action: ProjectAction,
    ) -> RuleResult<()> {
        let Some(project) = self.repo.get_project(project_id) else {
            let err = RuleError::NotFound(project_id);
            log_rejection(action.as_str(), project_id, &err);
            return Err(err);
        };

        if !self.policy.authorize(project, caller, action).is_allowed() {
            let err = RuleError::Unauthorized {
                project_id,
                caller: caller.to_string(),
                action,
            };
            log_rejection(action.as_str(), project_id, &err);
            return Err(err);
        }

        Ok(())
    }
}

fn log_rejection(operation: &str, project_id: ProjectId, err: &RuleError) {
    // Caller identities and payloads stay out of logs.
    warn!(
        "event=rule_rejected module=rules status=error operation={} project_id={} reason={} code={}",
        operation,
        project_id,
        err.reason(),
        err.code()
    );
}
