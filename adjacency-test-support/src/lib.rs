//! Shared test doubles used across adjacency crates.
//!
//! [`tracing::CaptureLayer`] records spans and events, [`sink::RecordingSink`]
//! keeps every message a [`adjacency_core::LogSink`] receives and
//! [`surface::RecordingSurface`] keeps every graph handed to a
//! [`adjacency_core::DrawingSurface`].

pub mod tracing {
    //! Capture layer for asserting on instrumentation in tests.
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::registry::LookupSpan;

    /// Layer that keeps closed spans and emitted events in memory.
    ///
    /// Clones share storage, so a clone can be installed in a subscriber
    /// while the original is kept for assertions.
    #[derive(Clone, Default)]
    pub struct CaptureLayer {
        journal: Arc<Mutex<Journal>>,
    }

    #[derive(Default)]
    struct Journal {
        spans: Vec<CapturedSpan>,
        events: Vec<CapturedEvent>,
    }

    impl CaptureLayer {
        fn journal(&self) -> MutexGuard<'_, Journal> {
            self.journal.lock().unwrap_or_else(PoisonError::into_inner)
        }

        /// Returns the closed spans in completion order.
        ///
        /// # Examples
        /// ```
        /// use adjacency_test_support::tracing::CaptureLayer;
        ///
        /// assert!(CaptureLayer::default().spans().is_empty());
        /// ```
        #[must_use]
        pub fn spans(&self) -> Vec<CapturedSpan> {
            self.journal().spans.clone()
        }

        /// Returns the emitted events in emission order.
        #[must_use]
        pub fn events(&self) -> Vec<CapturedEvent> {
            self.journal().events.clone()
        }

        /// Returns the first closed span called `name`.
        #[must_use]
        pub fn span(&self, name: &str) -> Option<CapturedSpan> {
            self.journal()
                .spans
                .iter()
                .find(|span| span.name == name)
                .cloned()
        }

        /// Returns the events emitted at exactly `level`.
        #[must_use]
        pub fn events_at(&self, level: Level) -> Vec<CapturedEvent> {
            self.journal()
                .events
                .iter()
                .filter(|event| event.level == level)
                .cloned()
                .collect()
        }
    }

    /// Runs `body` with a fresh [`CaptureLayer`] installed as the default
    /// subscriber and returns the body's value together with the layer.
    ///
    /// # Examples
    /// ```
    /// use adjacency_test_support::tracing::capture;
    ///
    /// let ((), layer) = capture(|| tracing::info!(answer = 42, "hello"));
    /// let events = layer.events();
    /// assert_eq!(events.len(), 1);
    /// assert_eq!(events[0].message(), Some("hello"));
    /// assert_eq!(events[0].field("answer"), Some("42"));
    /// ```
    pub fn capture<T>(body: impl FnOnce() -> T) -> (T, CaptureLayer) {
        let layer = CaptureLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        let value = tracing::subscriber::with_default(subscriber, body);
        (value, layer)
    }

    /// A span that has closed, with its recorded fields.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CapturedSpan {
        /// Span name from the callsite metadata.
        pub name: String,
        /// Fields recorded at creation or later via `Span::record`.
        pub fields: HashMap<String, String>,
    }

    impl CapturedSpan {
        /// Returns the textual value of `name`, if recorded.
        #[must_use]
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }
    }

    /// An emitted event.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CapturedEvent {
        /// Event level.
        pub level: Level,
        /// Event target.
        pub target: String,
        /// Event fields, including `message`.
        pub fields: HashMap<String, String>,
    }

    impl CapturedEvent {
        /// Returns the textual value of `name`, if present.
        #[must_use]
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }

        /// Returns the formatted event message.
        #[must_use]
        pub fn message(&self) -> Option<&str> {
            self.field("message")
        }
    }

    struct SpanFields(HashMap<String, String>);

    impl<S> Layer<S> for CaptureLayer
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut fields = HashMap::new();
            attrs.record(&mut Fields(&mut fields));
            span.extensions_mut().insert(SpanFields(fields));
        }

        fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            if let Some(SpanFields(fields)) = span.extensions_mut().get_mut::<SpanFields>() {
                values.record(&mut Fields(fields));
            }
        }

        fn on_close(&self, id: Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            let fields = span
                .extensions_mut()
                .remove::<SpanFields>()
                .map(|SpanFields(fields)| fields)
                .unwrap_or_default();
            self.journal().spans.push(CapturedSpan {
                name: span.name().to_owned(),
                fields,
            });
        }

        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = HashMap::new();
            event.record(&mut Fields(&mut fields));
            let metadata = event.metadata();
            self.journal().events.push(CapturedEvent {
                level: *metadata.level(),
                target: metadata.target().to_owned(),
                fields,
            });
        }
    }

    struct Fields<'a>(&'a mut HashMap<String, String>);

    impl Visit for Fields<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_owned(), format!("{value:?}"));
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_owned(), value.to_owned());
        }

        fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }
    }
}

pub mod sink {
    //! A [`LogSink`] that remembers what it was told.
    use std::sync::{Mutex, PoisonError};

    use adjacency_core::LogSink;

    /// Level a [`RecordingSink`] message was delivered at.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum SinkLevel {
        /// Delivered via [`LogSink::log`].
        Log,
        /// Delivered via [`LogSink::error`].
        Error,
    }

    /// Stores every message in delivery order.
    ///
    /// # Examples
    /// ```
    /// use adjacency_core::LogSink;
    /// use adjacency_test_support::sink::{RecordingSink, SinkLevel};
    ///
    /// let sink = RecordingSink::default();
    /// sink.error("bad shape");
    /// assert_eq!(sink.messages(), vec![(SinkLevel::Error, "bad shape".to_owned())]);
    /// ```
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        messages: Mutex<Vec<(SinkLevel, String)>>,
    }

    impl RecordingSink {
        /// Returns every message received so far.
        #[must_use]
        pub fn messages(&self) -> Vec<(SinkLevel, String)> {
            self.messages
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Returns the messages received at `level`.
        #[must_use]
        pub fn at(&self, level: SinkLevel) -> Vec<String> {
            self.messages()
                .into_iter()
                .filter(|(received, _)| *received == level)
                .map(|(_, message)| message)
                .collect()
        }

        fn push(&self, level: SinkLevel, message: &str) {
            self.messages
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((level, message.to_owned()));
        }
    }

    impl LogSink for RecordingSink {
        fn log(&self, message: &str) {
            self.push(SinkLevel::Log, message);
        }

        fn error(&self, message: &str) {
            self.push(SinkLevel::Error, message);
        }
    }
}

pub mod surface {
    //! A [`DrawingSurface`] that keeps the graphs it was asked to draw.
    use adjacency_core::{DrawingSurface, Graph, RenderOptions};

    /// Failure produced by [`RecordingSurface::failing`].
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct SurfaceFailure(pub String);

    impl std::fmt::Display for SurfaceFailure {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl std::error::Error for SurfaceFailure {}

    /// Records each draw call; optionally fails every call instead.
    ///
    /// # Examples
    /// ```
    /// use adjacency_core::{DrawingSurface, Graph, RenderOptions};
    /// use adjacency_test_support::surface::RecordingSurface;
    ///
    /// let mut surface = RecordingSurface::default();
    /// surface.draw(&Graph::default(), &RenderOptions::default())?;
    /// assert_eq!(surface.draws().len(), 1);
    /// # Ok::<(), adjacency_test_support::surface::SurfaceFailure>(())
    /// ```
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        draws: Vec<(Graph, RenderOptions)>,
        failure: Option<String>,
    }

    impl RecordingSurface {
        /// Creates a surface whose every draw fails with `reason`.
        #[must_use]
        pub fn failing(reason: impl Into<String>) -> Self {
            Self {
                draws: Vec::new(),
                failure: Some(reason.into()),
            }
        }

        /// Returns the recorded draw calls.
        #[must_use]
        pub fn draws(&self) -> &[(Graph, RenderOptions)] {
            &self.draws
        }

        /// Returns the graphs drawn so far.
        #[must_use]
        pub fn graphs(&self) -> Vec<&Graph> {
            self.draws.iter().map(|(graph, _)| graph).collect()
        }
    }

    impl DrawingSurface for RecordingSurface {
        type Error = SurfaceFailure;

        fn draw(&mut self, graph: &Graph, options: &RenderOptions) -> Result<(), SurfaceFailure> {
            if let Some(reason) = &self.failure {
                return Err(SurfaceFailure(reason.clone()));
            }
            self.draws.push((graph.clone(), options.clone()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::sink::{RecordingSink, SinkLevel};
    use super::surface::{RecordingSurface, SurfaceFailure};
    use super::tracing::capture;

    use adjacency_core::{DrawingSurface, Graph, LogSink, RenderOptions};
    use rstest::rstest;
    use tracing::Level;

    #[rstest]
    fn capture_keeps_span_fields_recorded_late() {
        let ((), layer) = capture(|| {
            let span = tracing::info_span!("work", stage = tracing::field::Empty);
            let _entered = span.enter();
            span.record("stage", "late");
            tracing::warn!(attempt = 2_u64, "retrying");
        });
        let span = layer.span("work").expect("span closed");
        assert_eq!(span.field("stage"), Some("late"));
        let warnings = layer.events_at(Level::WARN);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field("attempt"), Some("2"));
        assert_eq!(warnings[0].message(), Some("retrying"));
    }

    #[rstest]
    fn recording_sink_separates_levels() {
        let sink = RecordingSink::default();
        sink.log("one");
        sink.error("two");
        sink.log("three");
        assert_eq!(sink.at(SinkLevel::Log), vec!["one", "three"]);
        assert_eq!(sink.at(SinkLevel::Error), vec!["two"]);
    }

    #[rstest]
    fn failing_surface_records_nothing() {
        let mut surface = RecordingSurface::failing("no display");
        let err = surface
            .draw(&Graph::default(), &RenderOptions::default())
            .expect_err("surface configured to fail");
        assert_eq!(err, SurfaceFailure("no display".to_owned()));
        assert!(surface.draws().is_empty());
    }
}
