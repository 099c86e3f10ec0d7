//! The builtin class ontology every library must carry.
//!
//! Loaders either supply these classes themselves or prepend
//! [`builtin_classes`] to their own definitions.

use crate::class::{ClassDef, Method};

pub const OBJECT: &str = "Object";
pub const PROGRAM: &str = "Program";
pub const TRUE: &str = "True";
pub const FALSE: &str = "False";
pub const NULL: &str = "Null";
pub const STRING: &str = "String";
pub const OUTPUT: &str = "Output";
pub const INPUT: &str = "Input";
pub const MIRROR: &str = "Mirror";

/// Classes a library is rejected without.
pub const REQUIRED: [&str; 6] = [OBJECT, PROGRAM, TRUE, FALSE, NULL, STRING];

/// Entry method declared (abstract) on `Program`.
pub const MAIN: &str = "main";

/// Field through which host objects reach the running program.
pub const PROGRAM_FIELD: &str = "program";

/// Field naming the class a `Mirror` reflects over.
pub const TO_REFLECT_FIELD: &str = "toReflect";

/// The standard builtin classes, body-less methods included.
pub fn builtin_classes() -> Vec<ClassDef> {
    vec![
        ClassDef::new(OBJECT)
            .method(Method::empty("toString", &[]))
            .method(Method::empty("throw", &["message"])),
        ClassDef::new(PROGRAM)
            .parent(OBJECT)
            .abstract_class()
            .method(Method::empty(MAIN, &[])),
        ClassDef::new(TRUE).parent(OBJECT),
        ClassDef::new(FALSE).parent(OBJECT),
        ClassDef::new(NULL).parent(OBJECT),
        ClassDef::new(STRING)
            .parent(OBJECT)
            .method(Method::empty("equals", &["other"]))
            .method(Method::empty("+", &["other"]))
            .method(Method::empty("at", &["index"]))
            .method(Method::empty("length", &[]))
            .method(Method::empty("toString", &[]))
            .method(Method::empty("fromCharCode", &["code"])),
        ClassDef::new(OUTPUT)
            .parent(OBJECT)
            .field(PROGRAM_FIELD)
            .method(Method::empty("write", &["value"])),
        ClassDef::new(INPUT)
            .parent(OBJECT)
            .field(PROGRAM_FIELD)
            .method(Method::empty("read", &[])),
        ClassDef::new(MIRROR)
            .parent(OBJECT)
            .field(TO_REFLECT_FIELD)
            .method(Method::empty("instantiate", &["name"]))
            .method(Method::empty("typeName", &["object"]))
            .method(Method::empty("parent", &[]))
            .method(Method::empty("isAbstract", &[]))
            .method(Method::empty("field", &["index"]))
            .method(Method::empty("method", &["index"])),
    ]
}

/// Builtin classes followed by `classes`.
pub fn with_builtins(classes: impl IntoIterator<Item = ClassDef>) -> Vec<ClassDef> {
    let mut all = builtin_classes();
    all.extend(classes);
    all
}
