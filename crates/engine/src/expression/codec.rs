//! Expression codec: portable string ⇄ structured document.
//!
//! Decoding never fails. Placeholders whose id is not in the catalog are kept
//! verbatim and rendered with the id as display name and the default type.
//! Encoding is a pure function of node structure: only a variable's `id`
//! reaches the output, so renaming a variable never changes the expression.

use std::collections::HashSet;

use mathexpr_core::{Commit, Document, Inline, VarType, VariableAttrs, VariableCatalog};

use super::scan::{segments, Segment};

/// Decode with the stock fallback type ([`VarType::String`]).
pub fn decode(expression: &str, catalog: &VariableCatalog) -> Document {
    decode_with_default(expression, catalog, VarType::default())
}

/// Decode an expression string into a single-block document.
///
/// An empty string yields a document with no inline nodes.
pub fn decode_with_default(
    expression: &str,
    catalog: &VariableCatalog,
    default_type: VarType,
) -> Document {
    let content = segments(expression)
        .into_iter()
        .map(|seg| match seg {
            Segment::Literal(text) => Inline::text(text),
            Segment::Placeholder { id, .. } => {
                Inline::variable(resolve_attrs(id, catalog, default_type))
            }
        })
        .collect();

    Document::from_inlines(content)
}

/// Resolve display attributes for a placeholder id.
pub(crate) fn resolve_attrs(id: &str, catalog: &VariableCatalog, default_type: VarType) -> VariableAttrs {
    match catalog.get(id) {
        Some(var) => VariableAttrs::from(var),
        None => VariableAttrs {
            id: id.to_string(),
            name: id.to_string(),
            var_type: default_type,
        },
    }
}

/// Serialize a document back to the portable string and its referenced ids.
///
/// Node kinds other than text and variables contribute nothing.
pub fn encode(doc: &Document) -> Commit {
    let mut expression = String::new();
    let mut seen = HashSet::new();
    let mut variable_ids = Vec::new();

    for node in doc.inlines() {
        match node {
            Inline::Text { text } => expression.push_str(text),
            Inline::Variable { attrs } => {
                expression.push_str("{{ ");
                expression.push_str(&attrs.id);
                expression.push_str(" }}");
                if seen.insert(attrs.id.as_str()) {
                    variable_ids.push(attrs.id.clone());
                }
            }
            Inline::HardBreak => {}
        }
    }

    Commit {
        expression,
        variable_ids,
    }
}

/// Variable ids referenced by an expression, first occurrence order.
pub fn referenced_variable_ids(expression: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    segments(expression)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Placeholder { id, .. } if seen.insert(id) => Some(id.to_string()),
            _ => None,
        })
        .collect()
}
