//! Project repository contracts and in-memory implementation.
//!
//! # Responsibility
//! - Own project records and the per-project tag/progress/category maps.
//! - Keep storage details out of the rule engine.
//!
//! # Invariants
//! - `insert_project` validates the record and rejects duplicate ids.
//! - Tag, progress and category writes replace the previous value wholesale.
//! - Writes for unknown project ids are rejected with `NotFound`.

use crate::model::project::{Project, ProjectId, ProjectProgress, ProjectValidationError};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for project storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    InvalidProject(ProjectValidationError),
    DuplicateProject(ProjectId),
    NotFound(ProjectId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProject(err) => write!(f, "{err}"),
            Self::DuplicateProject(id) => write!(f, "project already exists: {id}"),
            Self::NotFound(id) => write!(f, "project not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidProject(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProjectValidationError> for RepoError {
    fn from(value: ProjectValidationError) -> Self {
        Self::InvalidProject(value)
    }
}

/// Repository interface for projects and their mutable metadata.
pub trait ProjectRepository {
    /// Inserts one seeded project.
    fn insert_project(&mut self, project: Project) -> RepoResult<()>;
    /// Gets one project by id.
    fn get_project(&self, id: ProjectId) -> Option<&Project>;
    /// Returns the number of known projects.
    fn project_count(&self) -> usize;
    /// Replaces the full tag list of one project.
    fn set_tags(&mut self, id: ProjectId, tags: Vec<String>) -> RepoResult<()>;
    /// Gets the tag list of one project, if ever set.
    fn get_tags(&self, id: ProjectId) -> Option<&[String]>;
    /// Returns ids of projects whose tag list contains `tag`, ascending.
    fn ids_with_tag(&self, tag: &str) -> Vec<ProjectId>;
    /// Replaces the progress record of one project.
    fn set_progress(&mut self, id: ProjectId, progress: ProjectProgress) -> RepoResult<()>;
    /// Gets the progress record of one project, if ever set.
    fn get_progress(&self, id: ProjectId) -> Option<ProjectProgress>;
    /// Replaces the category of one project.
    fn set_category(&mut self, id: ProjectId, category: String) -> RepoResult<()>;
    /// Gets the category of one project, if ever set.
    fn get_category(&self, id: ProjectId) -> Option<&str>;
}

/// Process-local repository backed by ordered maps.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: BTreeMap<ProjectId, Project>,
    tags: BTreeMap<ProjectId, Vec<String>>,
    progress: BTreeMap<ProjectId, ProjectProgress>,
    categories: BTreeMap<ProjectId, String>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository pre-seeded with `projects`.
    ///
    /// Fails on the first invalid or duplicate record.
    pub fn with_projects(projects: impl IntoIterator<Item = Project>) -> RepoResult<Self> {
        let mut repo = Self::new();
        for project in projects {
            repo.insert_project(project)?;
        }
        Ok(repo)
    }

    fn ensure_exists(&self, id: ProjectId) -> RepoResult<()> {
        if self.projects.contains_key(&id) {
            Ok(())
        } else {
            Err(RepoError::NotFound(id))
        }
    }
}

impl ProjectRepository for InMemoryProjectRepository {
    fn insert_project(&mut self, project: Project) -> RepoResult<()> {
        project.validate()?;
        if self.projects.contains_key(&project.id) {
            return Err(RepoError::DuplicateProject(project.id));
        }
        self.projects.insert(project.id, project);
        Ok(())
    }

    fn get_project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(&id)
    }

    fn project_count(&self) -> usize {
        self.projects.len()
    }

    fn set_tags(&mut self, id: ProjectId, tags: Vec<String>) -> RepoResult<()> {
        self.ensure_exists(id)?;
        self.tags.insert(id, tags);
        Ok(())
    }

    fn get_tags(&self, id: ProjectId) -> Option<&[String]> {
        self.tags.get(&id).map(Vec::as_slice)
    }

    fn ids_with_tag(&self, tag: &str) -> Vec<ProjectId> {
        self.tags
            .iter()
            .filter(|(_, tags)| tags.iter().any(|value| value == tag))
            .map(|(id, _)| *id)
            .collect()
    }

    fn set_progress(&mut self, id: ProjectId, progress: ProjectProgress) -> RepoResult<()> {
        self.ensure_exists(id)?;
        self.progress.insert(id, progress);
        Ok(())
    }

    fn get_progress(&self, id: ProjectId) -> Option<ProjectProgress> {
        self.progress.get(&id).copied()
    }

    fn set_category(&mut self, id: ProjectId, category: String) -> RepoResult<()> {
        self.ensure_exists(id)?;
        self.categories.insert(id, category);
        Ok(())
    }

    fn get_category(&self, id: ProjectId) -> Option<&str> {
        self.categories.get(&id).map(String::as_str)
    }
}
