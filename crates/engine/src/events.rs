//! Event types for editor session notifications.
//!
//! The session reports context recomputes, highlight rescans and commits
//! through an optional callback so the host UI can react without polling.
//! The collector is used by tests to verify how many recomputes an edit
//! produced.

use mathexpr_core::Commit;

use crate::context::WordQuery;
use crate::highlight::HighlightSpan;

/// Events emitted by an editor session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Cursor context was recomputed.
    ContextUpdated(ContextUpdatedEvent),

    /// Function highlights were rescanned after a content change.
    HighlightsChanged(HighlightsChangedEvent),

    /// The document was serialized for the host (blur or explicit save).
    Committed(Commit),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextUpdatedEvent {
    pub word_query: Option<WordQuery>,
    /// Name of the enclosing recognized call, if any.
    pub function_hint: Option<&'static str>,
    /// Number of filtered candidates.
    pub candidates: usize,
    pub popup_visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightsChangedEvent {
    /// Content version the spans were computed for.
    pub version: u64,
    pub spans: Vec<HighlightSpan>,
}

/// Callback type for receiving session events.
pub type EventCallback = Box<dyn FnMut(SessionEvent)>;

/// Simple event collector for testing.
#[derive(Default)]
pub struct EventCollector {
    events: Vec<SessionEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Filter to only ContextUpdated events.
    pub fn context_updates(&self) -> Vec<&ContextUpdatedEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::ContextUpdated(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    /// Filter to only HighlightsChanged events.
    pub fn highlight_changes(&self) -> Vec<&HighlightsChangedEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::HighlightsChanged(h) => Some(h),
                _ => None,
            })
            .collect()
    }

    /// Filter to only Committed events.
    pub fn commits(&self) -> Vec<&Commit> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::Committed(c) => Some(c),
                _ => None,
            })
            .collect()
    }
}
