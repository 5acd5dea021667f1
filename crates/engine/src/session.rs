//! Editor session
//!
//! Wires the analyzers to an editing surface. Document and selection
//! notifications funnel through [`EditorSession::dispatch`], so context,
//! suggestions and highlights are always computed from the same state.
//! Selecting a candidate runs several surface commands back to back; while
//! they run, notifications are dropped and a single recompute follows.

use mathexpr_config::Settings;
use mathexpr_core::{Commit, Document, FormulaDescriptor, VariableCatalog};

use crate::anchor::{anchor_rect, AnchorRect, HostGeometry};
use crate::autocomplete::{all_candidates, filter_candidates, selection_plan, Candidate, EditStep, SuggestionState};
use crate::context::{analyze, CursorContext, WordQuery};
use crate::events::{ContextUpdatedEvent, EventCallback, HighlightsChangedEvent, SessionEvent};
use crate::expression::codec;
use crate::highlight::{FunctionHighlighter, HighlightSpan};
use crate::surface::{EditSurface, MemorySurface};

/// Change reported by the editing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    DocumentChanged,
    SelectionChanged,
}

/// Keyboard intents the suggestion UI forwards verbatim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    MoveNext,
    MovePrevious,
    Confirm,
    Dismiss,
}

pub struct EditorSession<S: EditSurface> {
    surface: S,
    settings: Settings,
    candidates: Vec<Candidate>,
    context: CursorContext,
    suggestions: SuggestionState,
    highlighter: FunctionHighlighter,
    edits_in_progress: bool,
    interacting: bool,
    focused: bool,
    on_event: Option<EventCallback>,
}

impl EditorSession<MemorySurface> {
    /// Decode `expression` into a headless surface and open a session on it.
    pub fn from_expression(expression: &str, catalog: VariableCatalog, settings: Settings) -> Self {
        let doc = codec::decode_with_default(expression, &catalog, settings.default_var_type);
        Self::new(MemorySurface::new(doc), catalog, settings)
    }
}

impl<S: EditSurface> EditorSession<S> {
    pub fn new(surface: S, catalog: VariableCatalog, settings: Settings) -> Self {
        let cursor = surface.selection().from;
        Self {
            surface,
            settings,
            candidates: all_candidates(&catalog),
            context: CursorContext::empty(cursor),
            suggestions: SuggestionState::new(),
            highlighter: FunctionHighlighter::new(),
            edits_in_progress: false,
            interacting: false,
            focused: false,
            on_event: None,
        }
    }

    pub fn set_event_callback(&mut self, callback: EventCallback) {
        self.on_event = Some(callback);
    }

    fn emit(&mut self, event: SessionEvent) {
        if let Some(cb) = self.on_event.as_mut() {
            cb(event);
        }
    }

    // ========================================================================
    // Surface access
    // ========================================================================

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access for host-driven edits. Report each edit back
    /// through [`dispatch`](Self::dispatch).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn document(&self) -> &Document {
        self.surface.document()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Placeholder text to show while the document is empty
    pub fn placeholder(&self) -> Option<&str> {
        if self.document().is_empty() && !self.settings.placeholder.is_empty() {
            Some(&self.settings.placeholder)
        } else {
            None
        }
    }

    // ========================================================================
    // Notification dispatch
    // ========================================================================

    pub fn dispatch(&mut self, notification: Notification) {
        if self.edits_in_progress {
            log::trace!("{:?} dropped: edits in progress", notification);
            return;
        }
        match notification {
            Notification::DocumentChanged => {
                self.refresh_highlights();
                self.recompute();
            }
            Notification::SelectionChanged => self.recompute(),
        }
    }

    fn refresh_highlights(&mut self) {
        let version = self.surface.version();
        if self.highlighter.is_fresh(version) {
            return;
        }
        let spans = self.highlighter.spans(self.surface.document(), version).to_vec();
        self.emit(SessionEvent::HighlightsChanged(HighlightsChangedEvent { version, spans }));
    }

    fn recompute(&mut self) {
        let cursor = self.surface.selection().from;
        let ctx = analyze(self.surface.document(), cursor, self.settings.lookbehind);

        let items = match &ctx.word_query {
            Some(q) => filter_candidates(&self.candidates, &q.word),
            None => Vec::new(),
        };
        self.suggestions.set_items(items);
        self.suggestions.set_visible(ctx.wants_popup());
        self.context = ctx;

        log::trace!(
            "context at {}: word={:?} hint={:?} candidates={}",
            self.context.cursor,
            self.context.word_query.as_ref().map(|q| q.word.as_str()),
            self.context.function_hint.map(|f| f.name),
            self.suggestions.items().len(),
        );

        let event = ContextUpdatedEvent {
            word_query: self.context.word_query.clone(),
            function_hint: self.context.function_hint.map(|f| f.name),
            candidates: self.suggestions.items().len(),
            popup_visible: self.is_popup_visible(),
        };
        self.emit(SessionEvent::ContextUpdated(event));
    }

    // ========================================================================
    // Suggestion surface
    // ========================================================================

    pub fn context(&self) -> &CursorContext {
        &self.context
    }

    pub fn word_query(&self) -> Option<&WordQuery> {
        self.context.word_query.as_ref()
    }

    /// Function hint for display; suppressed while a word is being typed
    pub fn function_hint(&self) -> Option<&'static FormulaDescriptor> {
        self.context.suggestion_hint()
    }

    pub fn candidates(&self) -> &[Candidate] {
        self.suggestions.items()
    }

    pub fn active_index(&self) -> usize {
        self.suggestions.active_index()
    }

    /// Whether there is anything to show: a hint or at least one candidate
    pub fn is_popup_visible(&self) -> bool {
        self.suggestions.is_visible()
            && (self.function_hint().is_some() || !self.suggestions.items().is_empty())
    }

    pub fn popup_anchor(&self, host: &HostGeometry) -> AnchorRect {
        anchor_rect(host, self.settings.popup_gap)
    }

    /// Mark a pointer press inside the popup so the blur it causes keeps the
    /// popup open.
    pub fn begin_popup_interaction(&mut self) {
        self.interacting = true;
    }

    /// Replace the current word query with `candidate` as one atomic edit.
    pub fn select(&mut self, candidate: &Candidate) {
        let plan = selection_plan(candidate, self.context.word_query.as_ref());
        log::debug!("selecting {} ({} steps)", candidate.label(), plan.len());

        self.edits_in_progress = true;
        for step in plan {
            self.apply(step);
        }
        self.edits_in_progress = false;

        self.suggestions.set_visible(false);
        self.context.word_query = None;
        self.dispatch(Notification::DocumentChanged);
    }

    fn apply(&mut self, step: EditStep) {
        let notification = match step {
            EditStep::DeleteRange { from, to } => {
                self.surface.delete_range(from, to);
                Notification::DocumentChanged
            }
            EditStep::InsertNode(node) => {
                self.surface.insert_node(node);
                Notification::DocumentChanged
            }
            EditStep::InsertText(text) => {
                self.surface.insert_text(&text);
                Notification::DocumentChanged
            }
            EditStep::CursorBack(n) => {
                let pos = self.surface.selection().from.saturating_sub(n);
                self.surface.set_cursor(pos);
                Notification::SelectionChanged
            }
        };
        self.dispatch(notification);
    }

    /// Handle a keyboard intent. Returns true when the key was consumed.
    pub fn handle_intent(&mut self, intent: KeyIntent) -> bool {
        if !self.is_popup_visible() {
            return false;
        }
        match intent {
            KeyIntent::MoveNext => self.suggestions.move_next(),
            KeyIntent::MovePrevious => self.suggestions.move_previous(),
            KeyIntent::Confirm => {
                let Some(candidate) = self.suggestions.active().cloned() else {
                    return false;
                };
                self.select(&candidate);
            }
            KeyIntent::Dismiss => self.suggestions.set_visible(false),
        }
        true
    }

    // ========================================================================
    // Focus and commit
    // ========================================================================

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.recompute();
    }

    /// Serialize the current document for the host.
    pub fn commit(&mut self) -> Commit {
        let commit = codec::encode(self.surface.document());
        log::debug!(
            "commit: {} chars, {} variables",
            commit.expression.chars().count(),
            commit.variable_ids.len()
        );
        self.emit(SessionEvent::Committed(commit.clone()));
        commit
    }

    /// Leave the editor: commit, then close the popup unless the blur came
    /// from a press inside it.
    pub fn blur(&mut self) -> Commit {
        self.focused = false;
        let commit = self.commit();
        if self.interacting {
            self.interacting = false;
        } else {
            self.suggestions.set_visible(false);
        }
        commit
    }

    /// Current highlight spans (cached per content version)
    pub fn highlights(&mut self) -> &[HighlightSpan] {
        let version = self.surface.version();
        self.highlighter.spans(self.surface.document(), version)
    }
}
