//! Autocomplete candidates and suggestion list state
//!
//! Candidates are the host's variables followed by the built-in formulas.
//! Filtering, navigation and the edit plan for accepting a candidate live
//! here; executing the plan against a surface is the session's job.

use mathexpr_core::{FormulaDescriptor, Inline, Variable, VariableAttrs, VariableCatalog, FORMULAS};

use crate::context::WordQuery;

/// An autocomplete entry: a host variable or a built-in function.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    Variable(Variable),
    Function(&'static FormulaDescriptor),
}

impl Candidate {
    pub fn name(&self) -> &str {
        match self {
            Candidate::Variable(v) => &v.name,
            Candidate::Function(f) => f.name,
        }
    }

    /// Label shown in the suggestion list (`NAME()` for functions)
    pub fn label(&self) -> String {
        match self {
            Candidate::Variable(v) => v.name.clone(),
            Candidate::Function(f) => format!("{}()", f.name),
        }
    }

    /// Right-hand detail column: the variable type or "Function"
    pub fn detail(&self) -> &str {
        match self {
            Candidate::Variable(v) => v.var_type.as_str(),
            Candidate::Function(_) => "Function",
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Candidate::Function(_))
    }
}

/// Catalog variables first, then formulas, each in catalog order.
pub fn all_candidates(catalog: &VariableCatalog) -> Vec<Candidate> {
    catalog
        .iter()
        .cloned()
        .map(Candidate::Variable)
        .chain(FORMULAS.iter().map(Candidate::Function))
        .collect()
}

/// Case-insensitive substring filter, order preserved.
pub fn filter_candidates(candidates: &[Candidate], word: &str) -> Vec<Candidate> {
    let needle = word.to_lowercase();
    candidates
        .iter()
        .filter(|c| c.name().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

// ============================================================================
// Suggestion list state
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct SuggestionState {
    items: Vec<Candidate>,
    active: usize,
    visible: bool,
}

impl SuggestionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list. The active index resets when the length changes.
    pub fn set_items(&mut self, items: Vec<Candidate>) {
        if items.len() != self.items.len() {
            self.active = 0;
        }
        self.items = items;
        if self.active >= self.items.len() {
            self.active = 0;
        }
    }

    pub fn items(&self) -> &[Candidate] {
        &self.items
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Active candidate, falling back to the first one
    pub fn active(&self) -> Option<&Candidate> {
        self.items.get(self.active).or_else(|| self.items.first())
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn move_next(&mut self) {
        if !self.items.is_empty() {
            self.active = (self.active + 1).min(self.items.len() - 1);
        }
    }

    pub fn move_previous(&mut self) {
        self.active = self.active.saturating_sub(1);
    }
}

// ============================================================================
// Selection edit plan
// ============================================================================

/// One primitive command against the editing surface
#[derive(Debug, Clone, PartialEq)]
pub enum EditStep {
    DeleteRange { from: usize, to: usize },
    InsertNode(Inline),
    InsertText(String),
    /// Move the cursor relative to where the previous steps left it
    CursorBack(usize),
}

/// Steps that replace the word query (if any) with `candidate`.
///
/// Variables become an atomic node followed by a space; functions become
/// `NAME()` with the cursor left between the parentheses.
pub fn selection_plan(candidate: &Candidate, query: Option<&WordQuery>) -> Vec<EditStep> {
    let mut steps = Vec::with_capacity(3);
    if let Some(q) = query {
        steps.push(EditStep::DeleteRange { from: q.from, to: q.to });
    }
    match candidate {
        Candidate::Variable(v) => {
            steps.push(EditStep::InsertNode(Inline::variable(VariableAttrs::from(v))));
            steps.push(EditStep::InsertText(" ".to_string()));
        }
        Candidate::Function(f) => {
            steps.push(EditStep::InsertText(format!("{}()", f.name)));
            steps.push(EditStep::CursorBack(1));
        }
    }
    steps
}
