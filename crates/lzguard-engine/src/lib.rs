//! lzguard Engine - Orchestration layer
//!
//! Turns two configuration revisions into a validation report: parses the
//! documents, decodes the current revision, diffs, and runs scope checks,
//! document checks and the change-policy catalog.

pub mod commands;

pub use commands::document::{document_digest, parse_document};
pub use commands::validate_change::{
    validate_change, validate_change_with, ValidationReport, Verdict,
};

/// Result type for engine operations, carrying the canonical error
pub type Result<T> = std::result::Result<T, lzguard_core::errors::LzError>;
