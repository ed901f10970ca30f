//! Boundary logging macros.
//!
//! Every event carries `component`, `op` and `event`. Extra fields follow the
//! usual `tracing` field syntax.

/// Shared body of the boundary macros. Not part of the public surface.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use lzguard_core::log_op_start;
/// log_op_start!("validate_change");
/// log_op_start!("validate_change", request_id = "exec-42", scope = "FULL");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            lzguard_core_types::schema::EVENT_START
            $(, $($field)*)?
        )
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use lzguard_core::log_op_end;
/// log_op_end!("validate_change", duration_ms = 42, verdict = "Accepted");
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            lzguard_core_types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Log the failed end of an operation
///
/// `$err` is anything convertible into [`LzError`](crate::errors::LzError);
/// its kind and stable code are logged as `err_kind` and `err_code`.
///
/// # Example
///
/// ```
/// # use lzguard_core::{log_op_error, errors::GuardError};
/// let err = GuardError::InvalidDocument { reason: "root must be an object".to_string() };
/// log_op_error!("parse_document", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let lz_err: $crate::errors::LzError = $err.into();
        $crate::__log_op_event!(
            error,
            $op,
            lzguard_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?lz_err.kind(),
            err_code = lz_err.code()
            $(, $($field)*)?
        )
    }};
}
