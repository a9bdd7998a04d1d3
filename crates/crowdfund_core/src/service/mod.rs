//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into rule-checked use-case APIs.
//! - Keep callers decoupled from storage details.

pub mod rule_engine;
