//! Core types shared across lzguard facilities
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Correlation types**: RequestId, TraceId, RequestContext
//! - **Sensitive data**: Sensitive<T> marker for redacting account emails and similar values
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::{RequestContext, RequestId, TraceId};
pub use sensitive::Sensitive;
