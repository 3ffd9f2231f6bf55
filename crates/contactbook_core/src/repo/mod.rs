//! Repository layer for contacts.
//!
//! # Responsibility
//! - Own the in-memory contact collection and its write policies.
//! - Decide when the persistence collaborator is invoked.
//!
//! # Invariants
//! - Writes validate through the contact entity before being committed.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateEmail`)
//!   instead of storage errors.

pub mod contact_repo;
