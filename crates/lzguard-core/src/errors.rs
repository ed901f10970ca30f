use crate::value::Path;
use lzguard_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using GuardError
pub type Result<T> = std::result::Result<T, GuardError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every hard failure of a validation run maps to one of these kinds. Each
/// kind has a stable error code that pipelines match on; policy violations
/// are not errors and never appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LzErrorKind {
    // Input documents
    /// Bytes are not UTF-8, not JSON, or the root is not an object
    InvalidDocument,
    /// The current document does not conform to the landing-zone schema
    DecodeFailed,

    // Options
    /// Guard options could not be parsed or name an unknown override flag
    InvalidOptions,
    /// ACCOUNT or OU scope requested without a target list
    MissingScopeTargets,

    // Integration
    Serialization,

    // Internal
    Internal,
}

impl LzErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            LzErrorKind::InvalidDocument => "ERR_INVALID_DOCUMENT",
            LzErrorKind::DecodeFailed => "ERR_DECODE_FAILED",
            LzErrorKind::InvalidOptions => "ERR_INVALID_OPTIONS",
            LzErrorKind::MissingScopeTargets => "ERR_MISSING_SCOPE_TARGETS",
            LzErrorKind::Serialization => "ERR_SERIALIZATION",
            LzErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification used by callers plus enough context (operation,
/// offending config path, field errors) to explain a failed validation run.
#[derive(Debug, Clone)]
pub struct LzError {
    kind: LzErrorKind,
    op: Option<String>,
    path: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    field_errors: Vec<FieldError>,
}

impl LzError {
    /// Create a new error with the specified kind
    pub fn new(kind: LzErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            field_errors: Vec::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the config path the error refers to
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the field errors of a failed decode
    pub fn with_field_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.field_errors = errors;
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> LzErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the config path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the trace ID context, if any
    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Field errors of a failed decode (empty for every other kind)
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }
}

impl std::fmt::Display for LzError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        for field_error in &self.field_errors {
            write!(f, "\n  {}", field_error)?;
        }
        Ok(())
    }
}

impl std::error::Error for LzError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// ========== End Error Facility ==========

/// One defect found while decoding a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Location of the offending value
    pub path: Path,
    /// Expected shape, e.g. `Cidr` or `Array<SubnetConfig>`
    pub expected: String,
    /// Refinement message, when the refinement supplies one
    pub message: Option<String>,
}

impl FieldError {
    pub fn new(path: Path, expected: impl Into<String>) -> Self {
        Self {
            path,
            expected: expected.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = self.path.render();
        let path = if path.is_empty() { "<root>" } else { path.as_str() };
        write!(f, "{}: expected {}", path, self.expected)?;
        if let Some(message) = &self.message {
            write!(f, " ({})", message)?;
        }
        Ok(())
    }
}

/// Every field error collected in one decode pass
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("document does not match schema {schema} ({} field errors){}", .errors.len(), render_lines(.errors))]
pub struct DecodeError {
    pub schema: String,
    pub errors: Vec<FieldError>,
}

fn render_lines(errors: &[FieldError]) -> String {
    errors.iter().map(|e| format!("\n  {}", e)).collect()
}

/// Domain errors raised by the guard
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuardError {
    /// Current document failed to decode
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Input bytes could not be read as a configuration document
    #[error("Invalid document: {reason}")]
    InvalidDocument { reason: String },

    /// Override flag name is not one the guard knows
    #[error("Unknown override flag: {flag}")]
    UnknownOverride { flag: String },

    /// Guard options text could not be parsed
    #[error("Invalid guard options: {reason}")]
    InvalidOptions { reason: String },

    /// A limited scope was requested without naming its targets
    #[error("Scope {scope} requires a non-empty target list")]
    MissingScopeTargets { scope: String },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Internal error (should never happen)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<GuardError> for LzError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Decode(decode) => {
                let message = format!(
                    "document does not match schema {} ({} field errors)",
                    decode.schema,
                    decode.errors.len()
                );
                LzError::new(LzErrorKind::DecodeFailed)
                    .with_op("decode")
                    .with_message(message)
                    .with_field_errors(decode.errors)
            }

            GuardError::InvalidDocument { reason } => {
                LzError::new(LzErrorKind::InvalidDocument).with_message(reason)
            }

            GuardError::UnknownOverride { flag } => LzError::new(LzErrorKind::InvalidOptions)
                .with_op("parse_overrides")
                .with_message(format!("Unknown override flag: {}", flag)),

            GuardError::InvalidOptions { reason } => {
                LzError::new(LzErrorKind::InvalidOptions).with_message(reason)
            }

            GuardError::MissingScopeTargets { scope } => {
                LzError::new(LzErrorKind::MissingScopeTargets)
                    .with_op("validate_scope")
                    .with_message(format!("Scope {} requires a non-empty target list", scope))
            }

            GuardError::Serialization { message } => {
                LzError::new(LzErrorKind::Serialization).with_message(message)
            }

            GuardError::Internal { message } => {
                LzError::new(LzErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for GuardError {
    fn from(err: serde_json::Error) -> Self {
        GuardError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for GuardError {
    fn from(err: toml::de::Error) -> Self {
        GuardError::InvalidOptions {
            reason: err.to_string(),
        }
    }
}
