//! Audit sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::AuditEvent;

/// Trait for receiving audit events.
///
/// # Design Rules
///
/// - `emit()` must be fast and non-blocking (no inline network calls or
///   DB writes)
/// - Implementations should queue events for async processing
/// - Failure to record must never affect the emitting operation
///   (best-effort, fire-and-forget)
pub trait AuditSink: Send + Sync {
    /// Emit a single audit event.
    fn emit(&self, event: AuditEvent);

    /// Emit multiple audit events.
    ///
    /// Default implementation calls `emit()` for each event.
    fn emit_batch(&self, events: Vec<AuditEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

/// No-op implementation for tests or contexts that don't record audits.
#[derive(Clone, Default)]
pub struct NoOpAuditSink;

impl AuditSink for NoOpAuditSink {
    fn emit(&self, _event: AuditEvent) {
        // Intentionally empty - events are discarded
    }
}

/// Mock sink for testing - collects emitted events.
#[derive(Clone, Default)]
pub struct MockAuditSink {
    events: Arc<Mutex<Vec<AuditEvent>>>,
}

impl MockAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Clears collected events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    /// Returns the number of collected events.
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Returns true if no events have been collected.
    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl AuditSink for MockAuditSink {
    fn emit(&self, event: AuditEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::super::AuditEventKind;
    use super::*;

    fn created(id: &str) -> AuditEvent {
        AuditEvent::new(
            "u1",
            AuditEventKind::ListingCreated {
                external_id: id.to_string(),
            },
        )
    }

    #[test]
    fn noop_sink_does_not_panic() {
        let sink = NoOpAuditSink;
        sink.emit(created("X1"));
        sink.emit_batch(vec![created("X2"), created("X3")]);
    }

    #[test]
    fn mock_sink_collects_events() {
        let sink = MockAuditSink::new();
        assert!(sink.is_empty());

        sink.emit(created("X1"));
        assert_eq!(sink.len(), 1);

        sink.emit_batch(vec![created("X2"), created("X3")]);
        assert_eq!(sink.len(), 3);

        sink.clear();
        assert!(sink.is_empty());
    }
}
