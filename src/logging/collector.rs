//! This module provides a `tracing` layer for collecting log entries into a
//! [`LogBuffer`].
use super::{LogBuffer, LogEntry};
use chrono::Utc;
use std::sync::Arc;
use tracing::{Event, Subscriber};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    registry::LookupSpan,
    EnvFilter, Layer,
};

/// A `tracing` layer that collects log entries and sends them to a `LogBuffer`.
pub struct LogCollector {
    buffer: Arc<LogBuffer>,
}

impl LogCollector {
    pub fn new(buffer: Arc<LogBuffer>) -> Self {
        Self { buffer }
    }

    /// Installs the global subscriber: an `EnvFilter` taken from `RUST_LOG`
    /// (falling back to `default_directive`) in front of the collector.
    ///
    /// # Errors
    ///
    /// This function will return an error if the global default subscriber
    /// has already been set.
    pub fn init_subscriber(
        buffer: Arc<LogBuffer>,
        default_directive: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        // No console output: the terminal belongs to the renderer.
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(LogCollector::new(buffer));

        tracing::subscriber::set_global_default(subscriber)?;
        Ok(())
    }
}

impl<S> Layer<S> for LogCollector
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));

        let module = match metadata.module_path() {
            Some(module_path) => module_path
                .rsplit("::")
                .next()
                .unwrap_or(module_path)
                .to_string(),
            None => metadata.target().to_string(),
        };

        self.buffer.add_entry(LogEntry {
            timestamp: Utc::now(),
            level: *metadata.level(),
            module,
            message,
        });
    }
}

/// A `tracing::field::Visit` implementation for extracting the message from an event.
struct MessageVisitor<'a>(&'a mut String);

impl MessageVisitor<'_> {
    fn set_message(&mut self, message: String) {
        if self.0.is_empty() {
            *self.0 = message;
        } else {
            self.0.insert_str(0, &format!("{} ", message));
        }
    }

    fn push_field(&mut self, name: &str, value: impl std::fmt::Display) {
        if !self.0.is_empty() {
            self.0.push(' ');
        }
        self.0.push_str(&format!("{}={}", name, value));
    }
}

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.set_message(format!("{:?}", value));
        } else {
            self.push_field(field.name(), format!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.set_message(value.to_string());
        } else {
            self.push_field(field.name(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn events_are_recorded_with_fields() {
        let buffer = Arc::new(LogBuffer::new(16));
        let subscriber = tracing_subscriber::registry().with(LogCollector::new(buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(pod = "web-1", "Deletion request failed");
            tracing::info!("Listed pods");
        });

        let entries = buffer.entries_at_least(Level::TRACE);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, Level::WARN);
        assert!(entries[0].message.starts_with("Deletion request failed"));
        assert!(entries[0].message.contains("pod=web-1"));
        assert_eq!(entries[0].module, "tests");
        assert_eq!(entries[1].message, "Listed pods");
    }
}
