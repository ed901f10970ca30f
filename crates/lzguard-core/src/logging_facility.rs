//! Structured logging for validation runs.
//!
//! Each public operation of the engine emits one start event and exactly one
//! of end or end-error, all carrying `op`, `event` and `component`. Inner
//! guard stages log at debug level only, with `rule_id` and `config_path`
//! where a change was blocked. Account emails pass through
//! [`lzguard_core_types::Sensitive`] and never reach output in clear.
//!
//! ```rust
//! use lzguard_core::logging_facility::{init, Profile};
//!
//! init(Profile::Production);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
