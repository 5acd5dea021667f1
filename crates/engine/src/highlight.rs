//! Function name highlighting.
//!
//! Produces inline spans for recognized function names in the document's
//! text runs. A name can never span two runs: anything between runs (a
//! variable, a hard break) interrupts the match.

use mathexpr_core::functions::is_known_function;
use mathexpr_core::Document;

use crate::expression::scan::call_names;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    Function,
}

/// Highlight over the document positions `[from, to)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub from: usize,
    pub to: usize,
    pub kind: HighlightKind,
}

/// Scan every text run for known function names.
pub fn function_spans(doc: &Document) -> Vec<HighlightSpan> {
    let mut spans = Vec::new();
    for (start, text) in doc.text_runs() {
        for m in call_names(text) {
            if is_known_function(&text[m.bytes.clone()]) {
                spans.push(HighlightSpan {
                    from: start + m.chars.start,
                    to: start + m.chars.end,
                    kind: HighlightKind::Function,
                });
            }
        }
    }
    spans
}

/// Highlight cache keyed by the surface's content version.
///
/// Selection-only changes leave the version untouched, so the previous spans
/// are reused without rescanning.
#[derive(Debug, Default)]
pub struct FunctionHighlighter {
    cached: Option<(u64, Vec<HighlightSpan>)>,
    scans: usize,
}

impl FunctionHighlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current spans, rescanning only if `version` differs from the cached one.
    pub fn spans(&mut self, doc: &Document, version: u64) -> &[HighlightSpan] {
        let stale = !matches!(&self.cached, Some((v, _)) if *v == version);
        if stale {
            self.scans += 1;
            self.cached = Some((version, function_spans(doc)));
        }
        match &self.cached {
            Some((_, spans)) => spans,
            None => &[],
        }
    }

    /// Whether the cache is current for `version`
    pub fn is_fresh(&self, version: u64) -> bool {
        matches!(&self.cached, Some((v, _)) if *v == version)
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Number of full rescans performed so far
    pub fn scan_count(&self) -> usize {
        self.scans
    }
}
