//! Correlation types for tying a validation run to its caller
//!
//! A pipeline step that validates a configuration change hands in a
//! `RequestContext`; its ids are echoed on the report, on errors and on
//! every log event of that run.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! correlation_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Fresh time-ordered id (UUIDv7)
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Adopt an id minted elsewhere, e.g. a pipeline execution id
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

correlation_id!(
    /// Identifier of one validation request
    RequestId
);

correlation_id!(
    /// Trace identifier propagated from an outer pipeline
    TraceId
);

/// Context carried through one validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub trace_id: Option<TraceId>,
}

impl RequestContext {
    /// Create a new context with a fresh RequestId
    pub fn new() -> Self {
        Self {
            request_id: RequestId::new(),
            trace_id: None,
        }
    }

    /// Create a context with an existing RequestId
    pub fn with_request_id(request_id: RequestId) -> Self {
        Self {
            request_id,
            trace_id: None,
        }
    }

    /// Add a TraceId to the context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Trace id as a string, empty when none was propagated
    pub fn trace_str(&self) -> &str {
        self.trace_id.as_ref().map(TraceId::as_str).unwrap_or("")
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_generation() {
        let id1 = RequestId::new();
        let id2 = RequestId::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_request_id_display() {
        let id = RequestId::from_string("pipeline-exec-42".to_string());
        assert_eq!(format!("{}", id), "pipeline-exec-42");
    }

    #[test]
    fn test_trace_id_generation() {
        let id1 = TraceId::new();
        let id2 = TraceId::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_request_context_creation() {
        let ctx = RequestContext::new();
        assert!(!ctx.request_id.as_str().is_empty());
        assert!(ctx.trace_id.is_none());
        assert_eq!(ctx.trace_str(), "");
    }

    #[test]
    fn test_request_context_with_trace_id() {
        let trace_id = TraceId::from_string("trace-1".to_string());
        let ctx = RequestContext::new().with_trace_id(trace_id.clone());

        assert_eq!(ctx.trace_id, Some(trace_id));
        assert_eq!(ctx.trace_str(), "trace-1");
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = RequestId::from_string("exec-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"exec-7\"");
    }

    #[test]
    fn test_serialization() {
        let ctx = RequestContext::with_request_id(RequestId::new());
        let json = serde_json::to_string(&ctx).unwrap();
        let deserialized: RequestContext = serde_json::from_str(&json).unwrap();
        assert_eq!(ctx, deserialized);
    }
}
