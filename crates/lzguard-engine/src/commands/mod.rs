//! Command orchestration layer.
//!
//! Commands own lifecycle logging (`log_op_start!` / `log_op_end!` /
//! `log_op_error!`). The core crate below only emits `tracing::debug!` details.

pub mod document;
pub mod validate_change;
