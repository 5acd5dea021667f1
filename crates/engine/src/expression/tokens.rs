//! Readonly tokenizer.
//!
//! Splits a portable expression into display tokens for a non-editable
//! rendering. The token sequence partitions the source: text and function
//! values plus the placeholder text behind each variable token reconstruct the
//! input exactly.

use mathexpr_core::functions::is_known_function;
use mathexpr_core::{VarType, VariableCatalog};
use serde::Serialize;

use super::codec::resolve_attrs;
use super::scan::{call_names, segments, Segment};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DisplayToken {
    Text {
        value: String,
    },
    Variable {
        id: String,
        name: String,
        #[serde(rename = "varType")]
        var_type: VarType,
    },
    Function {
        value: String,
    },
}

pub fn tokenize(expression: &str, catalog: &VariableCatalog) -> Vec<DisplayToken> {
    tokenize_with_default(expression, catalog, VarType::default())
}

pub fn tokenize_with_default(
    expression: &str,
    catalog: &VariableCatalog,
    default_type: VarType,
) -> Vec<DisplayToken> {
    let mut tokens = Vec::new();

    for seg in segments(expression) {
        match seg {
            Segment::Literal(text) => tokenize_text(text, &mut tokens),
            Segment::Placeholder { id, .. } => {
                let attrs = resolve_attrs(id, catalog, default_type);
                tokens.push(DisplayToken::Variable {
                    id: attrs.id,
                    name: attrs.name,
                    var_type: attrs.var_type,
                });
            }
        }
    }
    tokens
}

fn push_text(tokens: &mut Vec<DisplayToken>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(DisplayToken::Text { value }) = tokens.last_mut() {
        value.push_str(text);
    } else {
        tokens.push(DisplayToken::Text {
            value: text.to_string(),
        });
    }
}

fn tokenize_text(text: &str, tokens: &mut Vec<DisplayToken>) {
    let mut last = 0;
    for m in call_names(text) {
        let name = &text[m.bytes.clone()];
        if !is_known_function(name) {
            continue;
        }
        push_text(tokens, &text[last..m.bytes.start]);
        tokens.push(DisplayToken::Function {
            value: name.to_string(),
        });
        last = m.bytes.end;
    }
    push_text(tokens, &text[last..]);
}

/// Plain display text: variables by display name, everything else verbatim.
pub fn render_plain(tokens: &[DisplayToken]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            DisplayToken::Text { value } | DisplayToken::Function { value } => out.push_str(value),
            DisplayToken::Variable { name, .. } => out.push_str(name),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathexpr_core::Variable;

    fn text(s: &str) -> DisplayToken {
        DisplayToken::Text { value: s.to_string() }
    }

    fn func(s: &str) -> DisplayToken {
        DisplayToken::Function { value: s.to_string() }
    }

    #[test]
    fn test_empty() {
        assert!(tokenize("", &VariableCatalog::default()).is_empty());
    }

    #[test]
    fn test_mixed_tokens() {
        let catalog = VariableCatalog::new(vec![Variable::new("v1", "Price", VarType::Number)]);
        let tokens = tokenize("ROUND({{ v1 }} * 2, 1)", &catalog);
        assert_eq!(
            tokens,
            vec![
                func("ROUND"),
                text("("),
                DisplayToken::Variable {
                    id: "v1".into(),
                    name: "Price".into(),
                    var_type: VarType::Number,
                },
                text(" * 2, 1)"),
            ]
        );
        assert_eq!(render_plain(&tokens), "ROUND(Price * 2, 1)");
    }

    #[test]
    fn test_unknown_function_stays_text() {
        let tokens = tokenize("FOO(1) + SUM (2)", &VariableCatalog::default());
        assert_eq!(tokens, vec![text("FOO(1) + "), func("SUM"), text(" (2)")]);
    }

    #[test]
    fn test_name_without_paren_is_text() {
        let tokens = tokenize("SUM + max(1)", &VariableCatalog::default());
        assert_eq!(tokens, vec![text("SUM + max(1)")]);
    }

    #[test]
    fn test_unknown_variable_fallback() {
        let tokens = tokenize("{{ missing }}", &VariableCatalog::default());
        assert_eq!(
            tokens,
            vec![DisplayToken::Variable {
                id: "missing".into(),
                name: "missing".into(),
                var_type: VarType::String,
            }]
        );
    }

    #[test]
    fn test_json_shape() {
        let tokens = tokenize("ABS({{x}})", &VariableCatalog::default());
        let json = serde_json::to_string(&tokens).unwrap();
        assert_eq!(
            json,
            r#"[{"type":"function","value":"ABS"},{"type":"text","value":"("},{"type":"variable","id":"x","name":"x","varType":"String"},{"type":"text","value":")"}]"#
        );
    }
}
