//! Shared test utilities used across colonet crates.
//!
//! - [`tracing`] captures spans and events emitted while a closure runs so
//!   tests can assert on instrumentation.
//! - [`property`] reads the environment overrides that tune property-based
//!   suites.

pub mod property;

pub mod tracing {
    //! In-memory capture of tracing output for assertions.
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex, MutexGuard};

    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::registry::{LookupSpan, Registry};

    #[derive(Default)]
    struct Recording {
        spans: Vec<SpanRecord>,
        events: Vec<EventRecord>,
    }

    /// Layer that stores every closed span and every event it observes.
    ///
    /// Clones share the same storage, so a test can keep one handle while
    /// the subscriber owns another.
    #[derive(Clone, Default)]
    pub struct RecordingLayer {
        recording: Arc<Mutex<Recording>>,
    }

    impl RecordingLayer {
        fn lock(&self) -> MutexGuard<'_, Recording> {
            self.recording.lock().expect("recording lock poisoned")
        }

        /// Returns the closed spans in completion order.
        ///
        /// # Examples
        /// ```
        /// use colonet_test_support::tracing::RecordingLayer;
        ///
        /// assert!(RecordingLayer::default().spans().is_empty());
        /// ```
        #[must_use]
        pub fn spans(&self) -> Vec<SpanRecord> {
            self.lock().spans.clone()
        }

        /// Returns the names of the closed spans in completion order.
        #[must_use]
        pub fn span_names(&self) -> Vec<String> {
            self.lock().spans.iter().map(|span| span.name.clone()).collect()
        }

        /// Returns the recorded events in emission order.
        #[must_use]
        pub fn events(&self) -> Vec<EventRecord> {
            self.lock().events.clone()
        }

        /// Returns the first event whose `message` equals `message`.
        #[must_use]
        pub fn event_with_message(&self, message: &str) -> Option<EventRecord> {
            self.lock()
                .events
                .iter()
                .find(|event| event.message() == Some(message))
                .cloned()
        }
    }

    /// A closed span and the fields recorded on it.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SpanRecord {
        /// Span name from the callsite metadata.
        pub name: String,
        /// Fields recorded at creation or later via `Span::record`.
        pub fields: HashMap<String, String>,
    }

    /// An emitted event with its level, target and fields.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EventRecord {
        /// Event level.
        pub level: Level,
        /// Event target, usually the emitting module path.
        pub target: String,
        /// Structured fields, including `message` when present.
        pub fields: HashMap<String, String>,
    }

    impl EventRecord {
        /// Returns the rendered value of `name`, if the event carried it.
        #[must_use]
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }

        /// Returns the event's message.
        #[must_use]
        pub fn message(&self) -> Option<&str> {
            self.field("message")
        }
    }

    /// Runs `f` with a thread-local subscriber that records into a fresh
    /// layer, returning the closure's output and the layer.
    ///
    /// # Examples
    /// ```
    /// use colonet_test_support::tracing::capture;
    ///
    /// let ((), recorded) = capture(|| tracing::info!(answer = 42, "hello"));
    /// let event = recorded.event_with_message("hello").expect("event");
    /// assert_eq!(event.field("answer"), Some("42"));
    /// ```
    pub fn capture<T>(f: impl FnOnce() -> T) -> (T, RecordingLayer) {
        let layer = RecordingLayer::default();
        let subscriber = Registry::default().with(layer.clone());
        let output = tracing::subscriber::with_default(subscriber, f);
        (output, layer)
    }

    #[derive(Default)]
    struct OpenSpan {
        fields: HashMap<String, String>,
    }

    impl<S> Layer<S> for RecordingLayer
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut open = OpenSpan::default();
            attrs.record(&mut FieldVisitor(&mut open.fields));
            span.extensions_mut().insert(open);
        }

        fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
            if let Some(span) = ctx.span(id)
                && let Some(open) = span.extensions_mut().get_mut::<OpenSpan>()
            {
                values.record(&mut FieldVisitor(&mut open.fields));
            }
        }

        fn on_close(&self, id: Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            let fields = span
                .extensions_mut()
                .remove::<OpenSpan>()
                .map(|open| open.fields)
                .unwrap_or_default();
            self.lock().spans.push(SpanRecord {
                name: span.name().to_owned(),
                fields,
            });
        }

        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = HashMap::new();
            event.record(&mut FieldVisitor(&mut fields));
            let metadata = event.metadata();
            self.lock().events.push(EventRecord {
                level: *metadata.level(),
                target: metadata.target().to_owned(),
                fields,
            });
        }
    }

    struct FieldVisitor<'a>(&'a mut HashMap<String, String>);

    impl Visit for FieldVisitor<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_owned(), value.to_owned());
        }

        fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_owned(), format!("{value:?}"));
        }
    }

}
