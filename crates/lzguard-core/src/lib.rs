//! lzguard Core - landing-zone configuration change guard
//!
//! This crate provides the pure kernel for validating a proposed landing-zone
//! configuration revision against the previous one:
//! - Untyped configuration tree model and paths
//! - Schema description language and accumulating decoder
//! - The landing-zone schema catalog (accounts, OUs, networking, deployments)
//! - Structural diff engine with identity-aware list alignment
//! - Change-policy guard: declarative predicate catalog and evaluator
//! - Whole-document checks and deployment scope validation
//!
//! Nothing here performs I/O. Documents are handed in already fetched and
//! parsed; see the `lzguard-engine` crate for orchestration.

pub mod checks;
pub mod diff;
pub mod errors;
pub mod guard;
pub mod landing_zone;
pub mod logging_facility;
pub mod options;
pub mod schema;
pub mod scope;
pub mod value;

// Re-export commonly used types
pub use diff::{compute_diff, DiffEntry, DiffKind};
pub use errors::{DecodeError, FieldError, GuardError, LzError, LzErrorKind, Result};
pub use guard::{evaluate, PathPredicate, RuleGroup, Violation, CATALOG};
pub use landing_zone::decode_accelerator_config;
pub use options::{ChangeScope, GuardOptions, Overrides};
pub use value::{ConfigValue, Path, PathSegment};
