//! Editing surface abstraction.
//!
//! The rich-text surface is an external collaborator. The engine only reads
//! its document, selection and content version, and drives it through four
//! atomic commands. [`MemorySurface`] is a headless implementation used by
//! tests and by hosts that keep the document outside a GUI toolkit.

use mathexpr_core::{Document, Inline};

/// Selection range in document positions (`from <= to`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub from: usize,
    pub to: usize,
}

impl Selection {
    pub fn cursor(pos: usize) -> Self {
        Self { from: pos, to: pos }
    }

    pub fn new(a: usize, b: usize) -> Self {
        Self {
            from: a.min(b),
            to: a.max(b),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

pub trait EditSurface {
    fn document(&self) -> &Document;

    fn selection(&self) -> Selection;

    /// Content version. Bumped on every content mutation, never on
    /// selection-only changes.
    fn version(&self) -> u64;

    /// Replace the selection with `text`; the cursor ends after it.
    fn insert_text(&mut self, text: &str);

    /// Replace the selection with a single node; the cursor ends after it.
    fn insert_node(&mut self, node: Inline);

    fn delete_range(&mut self, from: usize, to: usize);

    fn set_cursor(&mut self, pos: usize);
}

#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    doc: Document,
    selection: Selection,
    version: u64,
}

impl MemorySurface {
    /// Surface over `doc` with the cursor at the start.
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            selection: Selection::default(),
            version: 0,
        }
    }

    pub fn set_selection(&mut self, anchor: usize, head: usize) {
        let sel = Selection::new(anchor, head);
        self.selection = Selection {
            from: self.doc.clamp(sel.from),
            to: self.doc.clamp(sel.to),
        };
    }

    fn replace_selection(&mut self, nodes: Vec<Inline>) {
        let Selection { from, to } = self.selection;
        self.doc.delete_range(from, to);
        let end = self.doc.insert(from, nodes);
        self.selection = Selection::cursor(end);
        self.version += 1;
    }
}

impl From<Document> for MemorySurface {
    fn from(doc: Document) -> Self {
        Self::new(doc)
    }
}

fn map_deleted(pos: usize, from: usize, to: usize) -> usize {
    if pos >= to {
        pos - (to - from)
    } else {
        pos.min(from)
    }
}

impl EditSurface for MemorySurface {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn insert_text(&mut self, text: &str) {
        if text.is_empty() && self.selection.is_empty() {
            return;
        }
        self.replace_selection(vec![Inline::text(text)]);
    }

    fn insert_node(&mut self, node: Inline) {
        self.replace_selection(vec![node]);
    }

    fn delete_range(&mut self, from: usize, to: usize) {
        let to = self.doc.clamp(to);
        let from = from.min(to);
        if from == to {
            return;
        }
        self.doc.delete_range(from, to);
        self.selection = Selection {
            from: map_deleted(self.selection.from, from, to),
            to: map_deleted(self.selection.to, from, to),
        };
        self.version += 1;
    }

    fn set_cursor(&mut self, pos: usize) {
        self.selection = Selection::cursor(self.doc.clamp(pos));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathexpr_core::{VarType, VariableAttrs};

    fn var(id: &str) -> Inline {
        Inline::variable(VariableAttrs {
            id: id.into(),
            name: id.into(),
            var_type: VarType::String,
        })
    }

    #[test]
    fn test_insert_text_moves_cursor_and_bumps_version() {
        let mut s = MemorySurface::default();
        s.insert_text("abc");
        assert_eq!(s.selection(), Selection::cursor(3));
        assert_eq!(s.version(), 1);
        s.set_cursor(1);
        s.insert_text("X");
        assert_eq!(s.document().inlines(), &[Inline::text("aXbc")]);
        assert_eq!(s.selection(), Selection::cursor(2));
        assert_eq!(s.version(), 2);
    }

    #[test]
    fn test_set_cursor_clamps_without_version_bump() {
        let mut s = MemorySurface::new(Document::from_inlines(vec![Inline::text("ab")]));
        s.set_cursor(40);
        assert_eq!(s.selection(), Selection::cursor(2));
        assert_eq!(s.version(), 0);
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut s = MemorySurface::new(Document::from_inlines(vec![Inline::text("hello")]));
        s.set_selection(4, 1);
        s.insert_node(var("v"));
        assert_eq!(s.document().inlines(), &[Inline::text("h"), var("v"), Inline::text("o")]);
        assert_eq!(s.selection(), Selection::cursor(2));
    }

    #[test]
    fn test_delete_range_maps_cursor() {
        let mut s = MemorySurface::new(Document::from_inlines(vec![
            Inline::text("ab"),
            var("v"),
            Inline::text("cd"),
        ]));
        s.set_cursor(5);
        s.delete_range(1, 3);
        assert_eq!(s.document().inlines(), &[Inline::text("acd")]);
        assert_eq!(s.selection(), Selection::cursor(3));
        assert_eq!(s.version(), 1);

        s.set_cursor(2);
        s.delete_range(1, 3);
        assert_eq!(s.selection(), Selection::cursor(1));
    }

    #[test]
    fn test_empty_delete_is_noop() {
        let mut s = MemorySurface::new(Document::from_inlines(vec![Inline::text("ab")]));
        s.delete_range(2, 2);
        s.delete_range(7, 9);
        assert_eq!(s.version(), 0);
    }
}
