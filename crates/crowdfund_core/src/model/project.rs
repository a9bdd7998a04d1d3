//! Project domain model.
//!
//! # Responsibility
//! - Define the canonical project record seeded by external collaborators.
//! - Define the progress record owned by the rule engine.
//!
//! # Invariants
//! - `id` is unique and never reused for another project.
//! - `owner` and `title` are non-empty after trimming.
//! - `ProjectProgress::percentage_complete` is always within `0..=100`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a crowdfunded project.
pub type ProjectId = u64;

/// Upper bound (inclusive) for progress percentages.
pub const MAX_PERCENTAGE: i64 = 100;

/// Validation errors for project records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    EmptyOwner { id: ProjectId },
    EmptyTitle { id: ProjectId },
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyOwner { id } => write!(f, "project {id} owner must not be empty"),
            Self::EmptyTitle { id } => write!(f, "project {id} title must not be empty"),
        }
    }
}

impl Error for ProjectValidationError {}

/// Canonical project record.
///
/// Projects are immutable once seeded; the rule engine only reads them to
/// resolve ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProjectWire")]
pub struct Project {
    /// Unique project key.
    pub id: ProjectId,
    /// Identity allowed to mutate project metadata.
    pub owner: String,
    /// Display title.
    pub title: String,
}

impl Project {
    /// Creates a validated project record.
    pub fn new(
        id: ProjectId,
        owner: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<Self, ProjectValidationError> {
        let project = Self {
            id,
            owner: owner.into(),
            title: title.into(),
        };
        project.validate()?;
        Ok(project)
    }

    /// Validates record-level invariants.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.owner.trim().is_empty() {
            return Err(ProjectValidationError::EmptyOwner { id: self.id });
        }
        if self.title.trim().is_empty() {
            return Err(ProjectValidationError::EmptyTitle { id: self.id });
        }
        Ok(())
    }

    /// Returns whether `caller` is this project's owner.
    pub fn is_owned_by(&self, caller: &str) -> bool {
        self.owner == caller
    }
}

#[derive(Deserialize)]
struct ProjectWire {
    id: ProjectId,
    owner: String,
    title: String,
}

impl TryFrom<ProjectWire> for Project {
    type Error = ProjectValidationError;

    fn try_from(value: ProjectWire) -> Result<Self, Self::Error> {
        Project::new(value.id, value.owner, value.title)
    }
}

/// Latest completion snapshot for one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectProgress {
    /// Completion in percent, `0..=100`.
    pub percentage_complete: u8,
    /// Unix epoch milliseconds of the accepted update.
    pub last_update: i64,
}

/// Converts a raw percentage into the stored representation.
///
/// Returns `None` when the value falls outside `0..=100`.
pub fn checked_percentage(value: i64) -> Option<u8> {
    if (0..=MAX_PERCENTAGE).contains(&value) {
        u8::try_from(value).ok()
    } else {
        None
    }
}
