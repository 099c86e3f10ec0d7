#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::errors::EvalErrorKind;
use crate::input_handler::scripted_handler;
use crate::interpreter::InterpreterBuilder;
use crate::print_handler::buffer_handler;
use adv_ir::ast::{Expr, Stmt};
use adv_ir::prelude::with_builtins;
use adv_ir::{ClassDef, Library};
use pretty_assertions::assert_eq;

fn interpreter(classes: Vec<ClassDef>, input: &[&str]) -> Interpreter {
    let mut defs = vec![ClassDef::new("Main")
        .parent("Program")
        .method(Method::new("main", &[], vec![]))];
    defs.extend(classes);
    let library = Library::new("natives", with_builtins(defs)).unwrap();
    InterpreterBuilder::new(library)
        .print_handler(buffer_handler())
        .input_handler(scripted_handler(input.iter().copied()))
        .build()
        .unwrap()
}

fn call(interp: &Interpreter, this: &ObjRef, method: &str, args: &[ObjRef]) -> EvalResult {
    let method = interp
        .library()
        .lookup::<Method>(this.class(), method)
        .unwrap();
    interp.run_method(this, method, args)
}

fn new_object(interp: &Interpreter, class: &str) -> ObjRef {
    interp
        .instantiate(interp.library().class_id(class).unwrap())
        .unwrap()
}

fn text(object: &ObjRef) -> Option<&str> {
    object.text()
}

fn shapes() -> Vec<ClassDef> {
    vec![
        ClassDef::new("Shape")
            .parent("Object")
            .abstract_class()
            .field("name")
            .method(Method::empty("area", &[])),
        ClassDef::new("Circle")
            .parent("Shape")
            .field("radius")
            .field("center")
            .method(Method::new("area", &[], vec![Stmt::ret(Expr::string("pi r^2"))])),
    ]
}

// Registry

#[test]
fn test_defaults_cover_native_ontology() {
    let registry = BuiltinRegistry::with_defaults();
    for (class, method) in [
        ("Object", "toString"),
        ("Object", "throw"),
        ("String", "equals"),
        ("String", "+"),
        ("String", "at"),
        ("String", "fromCharCode"),
        ("Output", "write"),
        ("Input", "read"),
        ("Mirror", "instantiate"),
        ("Mirror", "method"),
    ] {
        assert!(registry.contains(class, method), "{class}.{method}");
    }
    assert!(registry.lookup("Output", "write").unwrap().requires_program);
    assert!(!registry.lookup("String", "at").unwrap().requires_program);
}

#[test]
fn test_register_replaces_existing() {
    let mut registry = BuiltinRegistry::new();
    assert!(registry.is_empty());
    registry.register("Object", "hash", false, |_| Ok(None));
    registry.register("Object", "hash", true, |_| Ok(None));
    assert_eq!(registry.len(), 1);
    assert!(registry.lookup("Object", "hash").unwrap().requires_program);
    assert!(registry.lookup("String", "hash").is_none());
}

// Strings

#[test]
fn test_string_equals_compares_text() {
    let interp = interpreter(vec![], &[]);
    let ab = interp.string("ab");
    let same = call(&interp, &ab, "equals", &[interp.string("ab")]).unwrap();
    let other = call(&interp, &ab, "equals", &[interp.string("abc")]).unwrap();
    assert!(same.ptr_eq(&interp.boolean(true)));
    assert!(other.ptr_eq(&interp.boolean(false)));
}

#[test]
fn test_string_equals_rejects_non_string() {
    let interp = interpreter(vec![], &[]);
    let ab = interp.string("ab");
    let err = call(&interp, &ab, "equals", &[interp.null()]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::CallInvalidArgument {
            class: "String".to_string(),
            method: "equals".to_string(),
        }
    );
}

#[test]
fn test_string_concat() {
    let interp = interpreter(vec![], &[]);
    let joined = call(&interp, &interp.string("ab"), "+", &[interp.string("c")]).unwrap();
    assert_eq!(text(&joined), Some("abc"));
}

#[test]
fn test_string_at() {
    let interp = interpreter(vec![], &[]);
    let abc = interp.string("abc");
    let b = call(&interp, &abc, "at", &[interp.string("1")]).unwrap();
    assert_eq!(text(&b), Some("b"));
    for out_of_range in ["3", "5", "-1"] {
        let got = call(&interp, &abc, "at", &[interp.string(out_of_range)]).unwrap();
        assert!(got.ptr_eq(&interp.null()), "index {out_of_range}");
    }
}

#[test]
fn test_string_at_counts_chars() {
    let interp = interpreter(vec![], &[]);
    let got = call(&interp, &interp.string("héllo"), "at", &[interp.string("2")]).unwrap();
    assert_eq!(text(&got), Some("l"));
}

#[test]
fn test_string_at_rejects_non_numeral() {
    let interp = interpreter(vec![], &[]);
    let err = call(&interp, &interp.string("abc"), "at", &[interp.string("one")]).unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::CallInvalidArgument { .. }
    ));
}

#[test]
fn test_integer_coercion_uses_user_to_string() {
    let one = ClassDef::new("One").parent("Object").method(Method::new(
        "toString",
        &[],
        vec![Stmt::ret(Expr::string("1"))],
    ));
    let interp = interpreter(vec![one], &[]);
    let index = new_object(&interp, "One");
    let got = call(&interp, &interp.string("abc"), "at", &[index]).unwrap();
    assert_eq!(text(&got), Some("b"));
}

#[test]
fn test_integer_coercion_falls_back_to_class_name() {
    let interp = interpreter(vec![ClassDef::new("2").parent("Object")], &[]);
    let index = new_object(&interp, "2");
    let got = call(&interp, &interp.string("abc"), "at", &[index]).unwrap();
    assert_eq!(text(&got), Some("c"));
}

#[test]
fn test_string_length_and_to_string() {
    let interp = interpreter(vec![], &[]);
    let s = interp.string("héllo");
    let len = call(&interp, &s, "length", &[]).unwrap();
    assert_eq!(text(&len), Some("5"));
    let same = call(&interp, &s, "toString", &[]).unwrap();
    assert!(same.ptr_eq(&s));
}

#[test]
fn test_from_char_code() {
    let interp = interpreter(vec![], &[]);
    let s = interp.string("");
    let a = call(&interp, &s, "fromCharCode", &[interp.string("65")]).unwrap();
    assert_eq!(text(&a), Some("A"));
    let err = call(&interp, &s, "fromCharCode", &[interp.string("-1")]).unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::CallInvalidArgument { .. }
    ));
}

// Object defaults

#[test]
fn test_object_to_string_is_class_name() {
    let interp = interpreter(shapes(), &[]);
    let circle = new_object(&interp, "Circle");
    let name = call(&interp, &circle, "toString", &[]).unwrap();
    assert_eq!(text(&name), Some("Circle"));
}

#[test]
fn test_throw_raises_user_exception() {
    let interp = interpreter(shapes(), &[]);
    let circle = new_object(&interp, "Circle");
    let err = call(&interp, &circle, "throw", &[interp.string("boom")]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UserException {
            message: "boom".to_string()
        }
    );
    assert_eq!(err.to_string(), "exception: boom");
    assert_eq!(
        err.trace.unwrap().frames(),
        &["Object.throw".to_string()]
    );
}

// Console

#[test]
fn test_output_write_requires_program_field() {
    let interp = interpreter(vec![], &[]);
    let output = new_object(&interp, "Output");
    let err = call(&interp, &output, "write", &[interp.string("hi")]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::CallNoProgram {
            class: "Output".to_string(),
            method: "write".to_string(),
        }
    );

    let stranger = new_object(&interp, "Main");
    output.set_field("program", stranger).unwrap();
    let err = call(&interp, &output, "write", &[interp.string("hi")]).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::CallNoProgram { .. }));
    assert_eq!(interp.print_handler().get_output(), "");
}

#[test]
fn test_output_write_prints_line() {
    let interp = interpreter(shapes(), &[]);
    let output = new_object(&interp, "Output");
    output.set_field("program", interp.program().clone()).unwrap();
    let result = call(&interp, &output, "write", &[interp.string("hi")]).unwrap();
    assert!(result.ptr_eq(&interp.null()));
    call(&interp, &output, "write", &[new_object(&interp, "Circle")]).unwrap();
    assert_eq!(interp.print_handler().get_output(), "hi\nCircle\n");
}

#[test]
fn test_input_read_lines_then_null() {
    let interp = interpreter(vec![], &["first", "second"]);
    let input = new_object(&interp, "Input");
    input.set_field("program", interp.program().clone()).unwrap();
    let first = call(&interp, &input, "read", &[]).unwrap();
    let second = call(&interp, &input, "read", &[]).unwrap();
    let end = call(&interp, &input, "read", &[]).unwrap();
    assert_eq!(text(&first), Some("first"));
    assert_eq!(text(&second), Some("second"));
    assert!(end.ptr_eq(&interp.null()));
    assert_eq!(interp.print_handler().get_output(), "> > > ");
}

// Mirror

fn mirror_of(interp: &Interpreter, class: &str) -> ObjRef {
    let mirror = new_object(interp, "Mirror");
    mirror
        .set_field("toReflect", interp.string(class))
        .unwrap();
    mirror
}

#[test]
fn test_mirror_instantiate_and_type_name() {
    let interp = interpreter(shapes(), &[]);
    let mirror = new_object(&interp, "Mirror");
    let circle = call(&interp, &mirror, "instantiate", &[interp.string("Circle")]).unwrap();
    assert_eq!(circle.class_name(), "Circle");
    let name = call(&interp, &mirror, "typeName", &[circle]).unwrap();
    assert_eq!(text(&name), Some("Circle"));

    let err = call(&interp, &mirror, "instantiate", &[interp.string("Square")]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::NameNotFound {
            name: "Square".to_string()
        }
    );
    let err = call(&interp, &mirror, "instantiate", &[interp.string("Shape")]).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::Abstract { .. }));
}

#[test]
fn test_mirror_parent_and_abstract() {
    let interp = interpreter(shapes(), &[]);
    let circle = mirror_of(&interp, "Circle");
    let parent = call(&interp, &circle, "parent", &[]).unwrap();
    assert_eq!(text(&parent), Some("Shape"));
    let is_abstract = call(&interp, &circle, "isAbstract", &[]).unwrap();
    assert!(is_abstract.ptr_eq(&interp.boolean(false)));

    let shape = mirror_of(&interp, "Shape");
    let is_abstract = call(&interp, &shape, "isAbstract", &[]).unwrap();
    assert!(is_abstract.ptr_eq(&interp.boolean(true)));

    let object = mirror_of(&interp, "Object");
    let parent = call(&interp, &object, "parent", &[]).unwrap();
    assert!(parent.ptr_eq(&interp.null()));
}

#[test]
fn test_mirror_lists_own_members_only() {
    let interp = interpreter(shapes(), &[]);
    let circle = mirror_of(&interp, "Circle");
    let field_at = |i: &str| call(&interp, &circle, "field", &[interp.string(i)]).unwrap();
    let method_at = |i: &str| call(&interp, &circle, "method", &[interp.string(i)]).unwrap();

    assert_eq!(text(&field_at("0")), Some("radius"));
    assert_eq!(text(&field_at("1")), Some("center"));
    assert!(field_at("2").ptr_eq(&interp.null()));
    assert!(field_at("-1").ptr_eq(&interp.null()));
    assert_eq!(text(&method_at("0")), Some("area"));
    assert!(method_at("1").ptr_eq(&interp.null()));
}

#[test]
fn test_mirror_unknown_reflected_class() {
    let interp = interpreter(shapes(), &[]);
    let mirror = mirror_of(&interp, "Square");
    let err = call(&interp, &mirror, "parent", &[]).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::NameNotFound { .. }));

    let unset = new_object(&interp, "Mirror");
    let err = call(&interp, &unset, "isAbstract", &[]).unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::CallInvalidArgument { .. }
    ));
}
