//! Domain model for crowdfunded projects.
//!
//! # Responsibility
//! - Define canonical data structures used by the rule engine.
//!
//! # Invariants
//! - Every project is identified by a stable `ProjectId`.
//! - Project records are never mutated by the rule engine.

pub mod project;
