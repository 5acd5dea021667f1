//! Cursor Context Analyzer
//!
//! Single source of truth for what autocomplete should show at the cursor:
//! the identifier being typed (word query) and the recognized function call
//! whose argument list encloses the cursor (function hint). Both are
//! recomputed from scratch on every document or selection change.
//!
//! Positions are document positions: one per text char, one per leaf node.

use mathexpr_core::functions::get_function;
use mathexpr_core::{Document, FormulaDescriptor};

/// Stand-in for a variable node when reading document text. It is neither a
/// word char nor whitespace, so it ends identifier scans without affecting
/// parenthesis counting.
pub const VARIABLE_PLACEHOLDER: char = '\u{FFFC}';

// ============================================================================
// Core Types
// ============================================================================

/// The identifier fragment immediately before the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordQuery {
    pub word: String,
    pub from: usize,
    pub to: usize,
}

/// Editing context at a specific cursor position
#[derive(Debug, Clone, PartialEq)]
pub struct CursorContext {
    /// Cursor position after clamping to the document
    pub cursor: usize,

    /// Identifier being typed, if any
    pub word_query: Option<WordQuery>,

    /// Innermost recognized call whose argument list holds the cursor
    pub function_hint: Option<&'static FormulaDescriptor>,
}

impl CursorContext {
    /// Empty context (nothing typed, no enclosing call)
    pub fn empty(cursor: usize) -> Self {
        Self {
            cursor,
            word_query: None,
            function_hint: None,
        }
    }

    /// Hint to show in the suggestion surface. A word query takes precedence,
    /// so the hint is suppressed while a word is being typed.
    pub fn suggestion_hint(&self) -> Option<&'static FormulaDescriptor> {
        if self.word_query.is_some() {
            None
        } else {
            self.function_hint
        }
    }

    pub fn wants_popup(&self) -> bool {
        self.word_query.is_some() || self.function_hint.is_some()
    }
}

// ============================================================================
// Analysis
// ============================================================================

pub fn analyze(doc: &Document, cursor: usize, lookbehind: usize) -> CursorContext {
    let cursor = doc.clamp(cursor);
    CursorContext {
        cursor,
        word_query: word_query(doc, cursor, lookbehind),
        function_hint: function_context(doc, cursor),
    }
}

/// Longest trailing `[a-zA-Z_]\w*` run within `lookbehind` positions before
/// the cursor. Leaf nodes terminate the run.
pub fn word_query(doc: &Document, cursor: usize, lookbehind: usize) -> Option<WordQuery> {
    let cursor = doc.clamp(cursor);
    let text = doc.text_between(cursor.saturating_sub(lookbehind), cursor, VARIABLE_PLACEHOLDER);
    let word = trailing_word(&text)?;
    let len = word.chars().count();

    Some(WordQuery {
        word: word.to_string(),
        from: cursor - len,
        to: cursor,
    })
}

/// Recognized function whose argument list encloses the cursor.
///
/// Returns `None` at top level, and also when the innermost enclosing paren
/// is not preceded by a known function name (plain grouping).
pub fn function_context(doc: &Document, cursor: usize) -> Option<&'static FormulaDescriptor> {
    let text = doc.text_between(0, cursor, VARIABLE_PLACEHOLDER);
    enclosing_call(&text)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn trailing_word(text: &str) -> Option<&str> {
    let mut word_start = None;
    for (idx, ch) in text.char_indices().rev() {
        if !is_word_char(ch) {
            break;
        }
        if ch.is_ascii_alphabetic() || ch == '_' {
            word_start = Some(idx);
        }
    }
    word_start.map(|start| &text[start..])
}

fn enclosing_call(text: &str) -> Option<&'static FormulaDescriptor> {
    let mut depth = 0usize;

    for (idx, ch) in text.char_indices().rev() {
        match ch {
            ')' => depth += 1,
            '(' if depth == 0 => {
                let before = text[..idx].trim_end();
                let name_start = before
                    .char_indices()
                    .rev()
                    .take_while(|&(_, c)| c.is_ascii_uppercase() || c == '_')
                    .last()
                    .map(|(i, _)| i)?;
                return get_function(&before[name_start..]);
            }
            '(' => depth -= 1,
            _ => {}
        }
    }
    None
}

// ============================================================================
// Tests
// ============================================================================
