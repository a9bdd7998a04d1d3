//! Access control contracts.
//!
//! Ownership is resolved by an `AccessPolicy`; the rule engine never compares
//! identities directly.

pub mod policy;
