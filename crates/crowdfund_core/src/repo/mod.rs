//! Repository layer abstractions.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for projects.
//! - Keep storage details isolated from rule orchestration.
//!
//! # Invariants
//! - Repository writes validate records before accepting them.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateProject`).

pub mod project_repo;
