use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_call_wrong_argc_lists_parameters() {
    let err = call_wrong_argc("Point", "move", &["dx".to_string(), "dy".to_string()], 1);
    assert_eq!(
        err.to_string(),
        "cannot call method 'move' on an object of class 'Point': wrong arg count, expected 2 (dx,dy), got 1"
    );
}

#[test]
fn test_factories_set_kind() {
    assert_eq!(
        name_not_found("x").kind,
        EvalErrorKind::NameNotFound {
            name: "x".to_string()
        }
    );
    assert!(matches!(
        call_empty("A", "m").kind,
        EvalErrorKind::CallEmpty { .. }
    ));
    assert!(matches!(
        abstract_class("Program").kind,
        EvalErrorKind::Abstract { .. }
    ));
}

#[test]
fn test_user_exception_message() {
    assert_eq!(user_exception("boom").to_string(), "exception: boom");
}

#[test]
fn test_field_undefined_message() {
    assert_eq!(
        field_undefined("Dog", "wings").to_string(),
        "cannot set 'wings' field of an object of class 'Dog': no such field"
    );
}

#[test]
fn test_trace_kept_from_innermost_site() {
    let inner = CallTrace::new(vec!["B.inner".to_string(), "A.outer".to_string()]);
    let err = call_empty("B", "inner").with_trace_if_absent(|| inner.clone());
    let err = err.with_trace_if_absent(|| CallTrace::new(vec!["A.outer".to_string()]));
    assert_eq!(err.trace, Some(inner));
}

#[test]
fn test_call_trace_display() {
    let trace = CallTrace::new(vec!["App.main".to_string()]);
    assert_eq!(trace.to_string(), "  0: App.main\n");
    assert!(CallTrace::default().is_empty());
}
