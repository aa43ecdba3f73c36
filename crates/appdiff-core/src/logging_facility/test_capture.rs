//! In-memory event capture for logging assertions
//!
//! Tests install one process-wide capture layer and then query it by
//! operation, event kind, level, or any recorded field. Every diff event
//! carries `app_id`, so concurrently running tests stay separable by giving
//! each its own app id.

use appdiff_core_types::schema::{FIELD_APP_ID, FIELD_EVENT, FIELD_OP};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded log event, fields rendered as strings
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    /// Value of a recorded field
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The `op` field of lifecycle events
    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    /// The `event` field of lifecycle events (`start`, `end`, `end_error`)
    pub fn kind(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }

    /// The `app_id` field, if the event was tagged with one
    pub fn app_id(&self) -> Option<&str> {
        self.field(FIELD_APP_ID)
    }

    /// Whether this is the given lifecycle event of `op`
    pub fn is_lifecycle(&self, op: &str, kind: &str) -> bool {
        self.op() == Some(op) && self.kind() == Some(kind)
    }
}

/// Strings are stored bare; everything else through its Debug form
struct Recorder<'a>(&'a mut BTreeMap<String, String>);

impl Visit for Recorder<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

type Sink = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    sink: Sink,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        event.record(&mut Recorder(&mut fields));

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields,
        };
        if let Ok(mut sink) = self.sink.lock() {
            sink.push(captured);
        }
    }
}

/// Shared handle over everything captured so far
#[derive(Clone)]
pub struct TestCapture {
    sink: Sink,
}

impl TestCapture {
    /// Snapshot of all captured events
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.sink.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events tagged with `app_id`
    pub fn events_for_app(&self, app_id: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.app_id() == Some(app_id))
            .collect()
    }

    /// Number of events matching `predicate`
    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    /// Assert that `op` emitted a lifecycle event of `kind`
    ///
    /// # Panics
    ///
    /// Panics if no such event was captured
    pub fn assert_event_exists(&self, op: &str, kind: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is_lifecycle(op, kind)),
            "no {} event for op {} among {} captured events",
            kind,
            op,
            events.len()
        );
    }

    /// Drop everything captured so far
    pub fn clear(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            sink.clear();
        }
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber (first call only) and
/// return the shared handle.
///
/// ```
/// use appdiff_core::logging_facility::test_capture::init_test_capture;
/// use appdiff_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_capture_op");
/// capture.assert_event_exists("doc_capture_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let sink: Sink = Arc::default();
            tracing_subscriber::registry()
                .with(CaptureLayer { sink: sink.clone() })
                .init();
            TestCapture { sink }
        })
        .clone()
}
