// End-to-end editing flows through EditorSession on the headless surface.

use std::cell::RefCell;
use std::rc::Rc;

use mathexpr_config::Settings;
use mathexpr_core::{VarType, Variable, VariableCatalog};
use mathexpr_engine::events::EventCollector;
use mathexpr_engine::{
    tokenize, Candidate, DisplayToken, EditSurface, EditorSession, KeyIntent, MemorySurface,
    Notification,
};

fn catalog() -> VariableCatalog {
    VariableCatalog::new(vec![
        Variable::new("p", "price", VarType::Number),
        Variable::new("q", "quantity", VarType::Integer),
        Variable::new("t", "tax", VarType::Number),
    ])
}

fn observed(expr: &str) -> (EditorSession<MemorySurface>, Rc<RefCell<EventCollector>>) {
    let mut session = EditorSession::from_expression(expr, catalog(), Settings::default());
    let collector = Rc::new(RefCell::new(EventCollector::new()));
    let sink = Rc::clone(&collector);
    session.set_event_callback(Box::new(move |e| sink.borrow_mut().push(e)));
    (session, collector)
}

fn type_text(s: &mut EditorSession<MemorySurface>, text: &str) {
    s.surface_mut().insert_text(text);
    s.dispatch(Notification::DocumentChanged);
}

fn move_cursor(s: &mut EditorSession<MemorySurface>, pos: usize) {
    s.surface_mut().set_cursor(pos);
    s.dispatch(Notification::SelectionChanged);
}

#[test]
fn test_select_recomputes_once() {
    let (mut s, events) = observed("");
    type_text(&mut s, "SUM(pr");
    events.borrow_mut().clear();

    let price = Candidate::Variable(Variable::new("p", "price", VarType::Number));
    s.select(&price);
    assert_eq!(s.surface().selection().from, 6);
    assert_eq!(mathexpr_engine::encode(s.document()).expression, "SUM({{ p }} ");

    let events = events.borrow();
    assert_eq!(events.context_updates().len(), 1);
    assert_eq!(events.highlight_changes().len(), 1);

    let update = events.context_updates()[0];
    assert_eq!(update.word_query, None);
    assert_eq!(update.function_hint, Some("SUM"));
    assert!(update.popup_visible);
}

#[test]
fn test_selection_change_reuses_highlights() {
    let (mut s, events) = observed("MAX(1, 2) + ABS(3)");
    assert_eq!(s.highlights().len(), 2);
    events.borrow_mut().clear();

    move_cursor(&mut s, 4);
    move_cursor(&mut s, 16);
    assert_eq!(s.highlights().len(), 2);

    let events = events.borrow();
    assert!(events.highlight_changes().is_empty());
    assert_eq!(events.context_updates().len(), 2);
    assert_eq!(events.context_updates()[0].function_hint, Some("MAX"));
    assert_eq!(events.context_updates()[1].function_hint, Some("ABS"));
}

#[test]
fn test_keyboard_flow_builds_expression() {
    let (mut s, events) = observed("");
    s.focus();

    type_text(&mut s, "mu");
    assert!(s.is_popup_visible());
    assert_eq!(s.candidates()[0].name(), "MULTIPLY");
    assert!(s.handle_intent(KeyIntent::Confirm));
    assert_eq!(s.surface().selection().from, 9);
    assert!(s.is_popup_visible());
    assert_eq!(s.function_hint().map(|f| f.name), Some("MULTIPLY"));

    type_text(&mut s, "t");
    let names: Vec<&str> = s.candidates().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["quantity", "tax", "SUBTRACT", "MULTIPLY"]);
    assert!(s.handle_intent(KeyIntent::MoveNext));
    assert_eq!(s.active_index(), 1);
    assert!(s.handle_intent(KeyIntent::MovePrevious));
    assert!(s.handle_intent(KeyIntent::Confirm));

    type_text(&mut s, ", 2");
    let commit = s.blur();
    assert_eq!(commit.expression, "MULTIPLY({{ q }} , 2)");
    assert_eq!(commit.variable_ids, vec!["q"]);
    assert_eq!(events.borrow().commits().len(), 1);

    let tokens = tokenize(&commit.expression, &catalog());
    assert_eq!(tokens[0], DisplayToken::Function { value: "MULTIPLY".into() });
    assert!(matches!(&tokens[2], DisplayToken::Variable { name, .. } if name == "quantity"));
}

#[test]
fn test_grouping_paren_gives_no_hint() {
    let (mut s, _) = observed("SUM((1 + 2) * (3");
    move_cursor(&mut s, 17);
    assert_eq!(s.context().function_hint, None);
    assert!(!s.is_popup_visible());

    move_cursor(&mut s, 11);
    assert_eq!(s.context().function_hint.map(|f| f.name), Some("SUM"));
}

#[test]
fn test_surface_edits_wait_for_dispatch() {
    let (mut s, events) = observed("1");
    move_cursor(&mut s, 1);
    events.borrow_mut().clear();

    s.surface_mut().insert_text(" + ta");
    assert!(events.borrow().is_empty());
    assert!(s.word_query().is_none());

    s.dispatch(Notification::DocumentChanged);
    assert_eq!(s.word_query().map(|q| q.word.as_str()), Some("ta"));
    assert_eq!(events.borrow().context_updates().len(), 1);
}
