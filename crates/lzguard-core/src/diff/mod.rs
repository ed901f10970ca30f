//! Structural configuration diff engine.
//!
//! Compares two configuration trees and produces an ordered list of
//! [`DiffEntry`] values suitable for the change-policy guard and human review.
//!
//! ## Entry point
//!
//! ```ignore
//! use lzguard_core::diff::engine::compute_diff;
//!
//! let entries = compute_diff(&previous, &current);
//! let summary = lzguard_core::diff::human_summary::render_human_summary(&entries);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: entries follow a depth-first walk, keys of the previous
//!   tree in order first, then keys only the current tree has.
//! - **Minimality**: identical sub-trees contribute no entries; `diff(x, x)`
//!   is empty.
//! - **Element removal**: removing one element from a list yields exactly one
//!   `ArrayChanged`/`Deleted` entry regardless of its position.
//! - **Purity**: neither input tree is mutated and the engine never fails.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::compute_diff;
pub use human_summary::render_human_summary;
pub use model::{ArrayItemChange, DiffEntry, DiffKind};
