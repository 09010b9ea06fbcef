//! Append-only diagnostic message log.
//!
//! Services record short human-readable notes about what they did into a
//! [`MessageSink`]. The log is purely observational: nothing reads it to
//! make decisions.

use std::collections::VecDeque;

use chrono::Utc;
use parking_lot::Mutex;

use crate::types::Timestamp;

/// Destination for diagnostic messages.
///
/// Implementations must be cheap, synchronous and infallible, and must keep
/// messages in the order they were recorded.
pub trait MessageSink: Send + Sync {
    fn record(&self, text: String);
}

/// A single recorded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub recorded_at: Timestamp,
}

/// In-memory [`MessageSink`] shared via `Arc<MessageLog>`.
///
/// With a capacity set, the oldest entries are dropped once the log is
/// full. A capacity of `None` keeps everything until [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Mutex<VecDeque<Message>>,
    capacity: Option<usize>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that keeps at most `capacity` entries.
    ///
    /// A capacity of zero is treated as unbounded.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            capacity: (capacity > 0).then_some(capacity),
        }
    }

    /// Append a message.
    pub fn add(&self, text: impl Into<String>) {
        let message = Message {
            text: text.into(),
            recorded_at: Utc::now(),
        };
        tracing::debug!(text = %message.text, "Diagnostic message recorded");

        let mut entries = self.entries.lock();
        entries.push_back(message);
        if let Some(cap) = self.capacity {
            while entries.len() > cap {
                entries.pop_front();
            }
        }
    }

    /// Snapshot of the recorded messages, oldest first.
    pub fn messages(&self) -> Vec<Message> {
        self.entries.lock().iter().cloned().collect()
    }

    /// Snapshot of just the message texts, oldest first.
    pub fn texts(&self) -> Vec<String> {
        self.entries.lock().iter().map(|m| m.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop every recorded message.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl MessageSink for MessageLog {
    fn record(&self, text: String) {
        self.add(text);
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;

    use super::*;

    /// Shared buffer the fmt layer writes into.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn preserves_order() {
        let log = MessageLog::new();
        log.add("first");
        log.add("second");
        log.record("third".to_string());

        assert_eq!(log.texts(), vec!["first", "second", "third"]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn capacity_drops_oldest() {
        let log = MessageLog::with_capacity(2);
        log.add("a");
        log.add("b");
        log.add("c");

        assert_eq!(log.texts(), vec!["b", "c"]);
    }

    #[test]
    fn zero_capacity_is_unbounded() {
        let log = MessageLog::with_capacity(0);
        for i in 0..100 {
            log.add(format!("m{i}"));
        }
        assert_eq!(log.len(), 100);
    }

    #[test]
    fn clear_empties_the_log() {
        let log = MessageLog::new();
        log.add("something");
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn messages_keep_record_order_and_time() {
        let log = MessageLog::new();
        log.add("first");
        log.add("second");

        let messages = log.messages();
        assert_eq!(messages[0].text, "first");
        assert_eq!(messages[1].text, "second");
        assert!(messages[0].recorded_at <= messages[1].recorded_at);
    }

    #[test]
    fn recorded_text_is_a_trace_field() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            MessageLog::new().add("getHeroes: fetched heroes");
        });

        let output = String::from_utf8(captured.0.lock().clone()).unwrap();
        assert!(
            output.contains("Diagnostic message recorded text=getHeroes: fetched heroes"),
            "{output}"
        );
    }
}
