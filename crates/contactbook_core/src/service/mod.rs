//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into form-level use cases.
//! - Keep CLI/UI layers decoupled from storage details.

pub mod contact_book;
pub mod edit_session;
