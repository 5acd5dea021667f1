//! Structured editor document.
//!
//! A document is a single block holding an ordered run of inline nodes. Text
//! runs contribute one position per character; every leaf node (variables,
//! hard breaks) occupies exactly one position and can only be inserted or
//! removed as a whole.

use serde::{Deserialize, Serialize};

use crate::variable::{VarType, Variable};

/// Attributes carried by an atomic variable node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableAttrs {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub var_type: VarType,
}

impl From<&Variable> for VariableAttrs {
    fn from(v: &Variable) -> Self {
        Self {
            id: v.id.clone(),
            name: v.name.clone(),
            var_type: v.var_type,
        }
    }
}

/// Inline node kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inline {
    Text { text: String },
    Variable { attrs: VariableAttrs },
    /// Structural leaf the editor may inject; carries no formula content.
    HardBreak,
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text { text: text.into() }
    }

    pub fn variable(attrs: VariableAttrs) -> Self {
        Inline::Variable { attrs }
    }

    /// Size in position space.
    pub fn size(&self) -> usize {
        match self {
            Inline::Text { text } => text.chars().count(),
            Inline::Variable { .. } | Inline::HardBreak => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    content: Vec<Inline>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_inlines(content: Vec<Inline>) -> Self {
        Self { content }
    }

    pub fn inlines(&self) -> &[Inline] {
        &self.content
    }

    /// Total size of the block content in positions.
    pub fn size(&self) -> usize {
        self.content.iter().map(Inline::size).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn clamp(&self, pos: usize) -> usize {
        pos.min(self.size())
    }

    /// Text between two positions.
    ///
    /// Variable nodes are rendered as `variable_char`, hard breaks as `'\n'`.
    /// Both bounds are clamped.
    pub fn text_between(&self, from: usize, to: usize, variable_char: char) -> String {
        let to = self.clamp(to);
        let from = from.min(to);
        let mut out = String::new();
        let mut start = 0;

        for node in &self.content {
            let size = node.size();
            let end = start + size;
            if end <= from {
                start = end;
                continue;
            }
            if start >= to {
                break;
            }
            match node {
                Inline::Text { text } => {
                    let skip = from.saturating_sub(start);
                    let take = to.min(end) - start.max(from);
                    out.extend(text.chars().skip(skip).take(take));
                }
                Inline::Variable { .. } => out.push(variable_char),
                Inline::HardBreak => out.push('\n'),
            }
            start = end;
        }
        out
    }

    /// Text runs with their absolute start positions, in document order.
    pub fn text_runs(&self) -> impl Iterator<Item = (usize, &str)> {
        let mut start = 0;
        self.content.iter().filter_map(move |node| {
            let pos = start;
            start += node.size();
            match node {
                Inline::Text { text } => Some((pos, text.as_str())),
                _ => None,
            }
        })
    }

    /// Insert nodes at `pos` (clamped), splitting a text run if needed.
    /// Returns the position right after the inserted content.
    pub fn insert(&mut self, pos: usize, nodes: Vec<Inline>) -> usize {
        let pos = self.clamp(pos);
        let inserted: usize = nodes.iter().map(Inline::size).sum();
        let idx = self.split_at(pos);
        self.content.splice(idx..idx, nodes);
        self.normalize();
        pos + inserted
    }

    /// Remove everything in `[from, to)`. A leaf node whose position lies in
    /// the range is removed whole; leaves are never partially deleted.
    pub fn delete_range(&mut self, from: usize, to: usize) {
        let to = self.clamp(to);
        let from = from.min(to);
        if from == to {
            return;
        }
        let start_idx = self.split_at(from);
        let end_idx = self.split_at(to);
        self.content.drain(start_idx..end_idx);
        self.normalize();
    }

    /// Merge adjacent text runs and drop empty ones.
    pub fn normalize(&mut self) {
        let mut merged: Vec<Inline> = Vec::with_capacity(self.content.len());
        for node in self.content.drain(..) {
            match node {
                Inline::Text { text } if text.is_empty() => {}
                Inline::Text { text } => {
                    if let Some(Inline::Text { text: prev }) = merged.last_mut() {
                        prev.push_str(&text);
                    } else {
                        merged.push(Inline::Text { text });
                    }
                }
                other => merged.push(other),
            }
        }
        self.content = merged;
    }

    /// Ensure a node boundary exists at `pos` and return the index of the
    /// first node starting there (or `content.len()` at the end).
    fn split_at(&mut self, pos: usize) -> usize {
        let mut start = 0;
        for idx in 0..self.content.len() {
            if pos == start {
                return idx;
            }
            let size = self.content[idx].size();
            if pos < start + size {
                // Leaves have size 1, so only text can be entered here.
                if let Inline::Text { text } = &mut self.content[idx] {
                    let byte = char_to_byte(text, pos - start);
                    let tail = text.split_off(byte);
                    self.content.insert(idx + 1, Inline::Text { text: tail });
                }
                return idx + 1;
            }
            start += size;
        }
        self.content.len()
    }
}

/// Convert char index to byte offset
fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
