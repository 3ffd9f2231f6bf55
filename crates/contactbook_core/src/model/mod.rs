//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical contact entity and its wire record.
//! - Own per-field normalization and validation rules.
//!
//! # Invariants
//! - Every contact is identified by a stable `ContactId`.
//! - Entity fields are only ever written through their validators.

pub mod contact;
pub mod validation;
