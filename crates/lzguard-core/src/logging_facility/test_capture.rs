//! In-memory capture of log events for test assertions
//!
//! Guard tests use this to check that a validation run logs its start and end,
//! that violations are reported with their rule ids, and that account emails
//! never reach log output unredacted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// A captured log event with all its fields rendered as strings
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    /// Rendered value of `name`, if the event carried it
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn mentions(&self, needle: &str) -> bool {
        self.fields.values().any(|v| v.contains(needle))
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: String) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.insert(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.to_string());
    }
}

/// Layer collecting every event it sees
pub struct TestCaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let layer = Self {
            events: Arc::clone(&events),
        };
        (layer, TestCapture { events })
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            component: visitor.fields.get("component").cloned(),
            op: visitor.fields.get("op").cloned(),
            event: visitor.fields.get("event").cloned(),
            fields: visitor.fields,
        };

        self.events
            .lock()
            .map(|mut events| events.push(captured))
            .ok();
    }
}

/// Handle for reading captured events
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events whose `op` field equals `op`
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op.as_deref() == Some(op))
            .collect()
    }

    /// First `op`/`event` pair captured, if any
    pub fn find(&self, op: &str, event: &str) -> Option<CapturedEvent> {
        self.events_for_op(op)
            .into_iter()
            .find(|e| e.event.as_deref() == Some(event))
    }

    /// # Panics
    ///
    /// Panics if no event with the given operation and event type was captured
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        assert!(
            self.find(op, event).is_some(),
            "Expected event op={} event={} not found in {} captured events",
            op,
            event,
            self.events().len()
        );
    }

    /// # Panics
    ///
    /// Panics if any captured field value contains `needle`
    pub fn assert_never_logged(&self, needle: &str) {
        let leaked = self.count_events(|e| e.mentions(needle));
        assert_eq!(leaked, 0, "{} captured events mention {:?}", leaked, needle);
    }

    pub fn clear(&self) {
        self.events.lock().map(|mut e| e.clear()).ok();
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber and return its handle
///
/// Every caller in the process shares one capture. Tests running in parallel
/// see each other's events, so assertions should filter by a value unique to
/// the test (a request id, an account key).
///
/// # Example
///
/// ```
/// use lzguard_core::logging_facility::test_capture::init_test_capture;
/// use lzguard_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example_op");
/// capture.assert_event_exists("doc_example_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            tracing_subscriber::registry().with(layer).try_init().ok();
            capture
        })
        .clone()
}
