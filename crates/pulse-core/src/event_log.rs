//! Append-only event log for one session.
//!
//! The log is the single source of truth: every derivation (stage, turn,
//! issues, summary window) is a pure function of it. Appending is purely
//! additive - no deduplication, no reordering, no backpressure. Memory
//! growth is unbounded at this layer by design; bounding what consumers
//! hold is the summarization windower's job.

use pulse_proto::ValidationEvent;

/// Ordered, append-only sequence of validation events for one session.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<ValidationEvent>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    ///
    /// A structurally valid event is never rejected here; malformed frames
    /// must be filtered at the transport boundary before they reach the log.
    pub fn append(&mut self, event: ValidationEvent) {
        self.events.push(event);
    }

    /// Returns the number of events appended so far.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no event has been appended.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the most recent event, if any.
    pub fn last(&self) -> Option<&ValidationEvent> {
        self.events.last()
    }

    /// Returns a consistent snapshot of the full sequence.
    ///
    /// The log is single-writer and append-only, so a borrow taken between
    /// appends always observes a complete prefix of the session.
    pub fn as_slice(&self) -> &[ValidationEvent] {
        &self.events
    }

    /// Iterates the events in append order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationEvent> {
        self.events.iter()
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a ValidationEvent;
    type IntoIter = std::slice::Iter<'a, ValidationEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
