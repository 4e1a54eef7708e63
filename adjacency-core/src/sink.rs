//! Leveled message sinks used to report soft failures.
//!
//! [`crate::GraphAdapter`] never logs through a global: the sink is injected,
//! which lets tests observe exactly which messages were emitted.

use std::{io::Write, sync::Mutex};

use tracing::{error, info, warn};

/// Receives leveled, unstructured text messages.
///
/// # Examples
/// ```
/// use std::cell::RefCell;
/// use adjacency_core::LogSink;
///
/// #[derive(Default)]
/// struct Collect(RefCell<Vec<String>>);
///
/// impl LogSink for Collect {
///     fn log(&self, message: &str) {
///         self.0.borrow_mut().push(format!("log: {message}"));
///     }
///     fn error(&self, message: &str) {
///         self.0.borrow_mut().push(format!("error: {message}"));
///     }
/// }
///
/// let sink = Collect::default();
/// sink.error("boom");
/// assert_eq!(sink.0.borrow().as_slice(), ["error: boom"]);
/// ```
pub trait LogSink {
    /// Records an informational message.
    fn log(&self, message: &str);

    /// Records an error message.
    fn error(&self, message: &str);
}

impl<T: LogSink + ?Sized> LogSink for &T {
    fn log(&self, message: &str) {
        (**self).log(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}

/// Forwards messages to `tracing` at `INFO` and `ERROR` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, message: &str) {
        info!(target: "adjacency::sink", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "adjacency::sink", "{message}");
    }
}

/// Writes `[ log ]: …` and `[ error ]: …` lines to a writer.
///
/// # Examples
/// ```
/// use adjacency_core::{LogSink, WriterSink};
///
/// let sink = WriterSink::new(Vec::new());
/// sink.log("loaded");
/// sink.error("not square");
/// let text = String::from_utf8(sink.into_inner()).expect("sink output is UTF-8");
/// assert_eq!(text, "[ log ]: loaded\n[ error ]: not square\n");
/// ```
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write> WriterSink<W> {
    /// Wraps `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_line(&self, level: &str, message: &str) {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Err(err) = writeln!(writer, "[ {level} ]: {message}") {
            warn!(error = %err, level, "failed to write sink message");
        }
    }
}

impl<W: Write> LogSink for WriterSink<W> {
    fn log(&self, message: &str) {
        self.write_line("log", message);
    }

    fn error(&self, message: &str) {
        self.write_line("error", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_sink_prefixes_levels() {
        let sink = WriterSink::new(Vec::new());
        sink.log("first");
        sink.error("second");
        sink.log("third");
        let text = String::from_utf8(sink.into_inner()).expect("utf-8 output");
        assert_eq!(
            text,
            "[ log ]: first\n[ error ]: second\n[ log ]: third\n"
        );
    }

    #[test]
    fn writer_sink_swallows_write_failures() {
        let sink = WriterSink::new(FailingWriter);
        sink.error("lost");
        sink.log("also lost");
    }

    #[test]
    fn references_forward_to_the_sink() {
        let sink = WriterSink::new(Vec::new());
        let by_ref: &dyn LogSink = &sink;
        by_ref.error("via reference");
        (&by_ref).log("via double reference");
        let text = String::from_utf8(sink.into_inner()).expect("utf-8 output");
        assert!(text.contains("[ error ]: via reference"));
        assert!(text.contains("[ log ]: via double reference"));
    }
}
