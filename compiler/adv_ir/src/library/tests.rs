#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::class::{Field, Method};
use crate::prelude::{builtin_classes, with_builtins};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn sample() -> Library {
    Library::new(
        "sample",
        with_builtins([
            ClassDef::new("Animal")
                .parent("Object")
                .abstract_class()
                .field("name")
                .method(Method::new("speak", &[], vec![]))
                .method(Method::empty("legs", &[])),
            ClassDef::new("Dog")
                .parent("Animal")
                .field("owner")
                .method(Method::new("speak", &[], vec![])),
            ClassDef::new("Puppy").parent("Dog").field("name"),
        ]),
    )
    .unwrap()
}

fn id(library: &Library, name: &str) -> ClassId {
    library.class_id(name).unwrap()
}

#[test]
fn test_is_reflexive_and_follows_ancestors() {
    let lib = sample();
    let puppy = id(&lib, "Puppy");
    let dog = id(&lib, "Dog");
    let animal = id(&lib, "Animal");
    let object = id(&lib, "Object");
    let string = id(&lib, "String");

    assert!(lib.is(puppy, puppy));
    assert!(lib.is(puppy, dog));
    assert!(lib.is(puppy, animal));
    assert!(lib.is(puppy, object));
    assert!(!lib.is(dog, puppy));
    assert!(!lib.is(puppy, string));
}

#[test]
fn test_ancestors_walks_to_root() {
    let lib = sample();
    let names: Vec<&str> = lib
        .ancestors(id(&lib, "Puppy"))
        .map(|c| lib.class(c).name.as_str())
        .collect();
    assert_eq!(names, vec!["Puppy", "Dog", "Animal", "Object"]);
}

#[test]
fn test_lookup_prefers_override() {
    let lib = sample();
    let puppy = id(&lib, "Puppy");
    let resolved = lib.resolve::<Method>(puppy, "speak").unwrap();
    assert_eq!(resolved.declaring, id(&lib, "Dog"));
    assert!(resolved.member.body.is_some());
}

#[test]
fn test_declaring_class_of_inherited_empty_method() {
    let lib = sample();
    let puppy = id(&lib, "Puppy");
    assert_eq!(
        lib.declaring_class::<Method>(puppy, "legs"),
        Some(id(&lib, "Animal"))
    );
    assert_eq!(
        lib.declaring_class::<Method>(puppy, "toString"),
        Some(id(&lib, "Object"))
    );
    assert!(lib.lookup::<Method>(puppy, "fly").is_none());
}

#[test]
fn test_fields_and_methods_are_separate_namespaces() {
    let lib = sample();
    let dog = id(&lib, "Dog");
    assert!(lib.lookup::<Field>(dog, "owner").is_some());
    assert!(lib.lookup::<Method>(dog, "owner").is_none());
    assert!(lib.lookup::<Field>(dog, "speak").is_none());
}

#[test]
fn test_layout_covers_inherited_fields_once() {
    let lib = sample();
    let layout = lib.layout(id(&lib, "Puppy"));
    assert_eq!(layout.names(), &["name".to_string(), "owner".to_string()]);
    assert_eq!(layout.index_of("name"), Some(0));
    assert_eq!(layout.index_of("owner"), Some(1));
    assert_eq!(layout.index_of("missing"), None);
    assert_eq!(layout.class_name(), "Puppy");
}

#[test]
fn test_program_classes_skip_abstract() {
    let lib = Library::new(
        "programs",
        with_builtins([
            ClassDef::new("Base").parent("Program").abstract_class(),
            ClassDef::new("App").parent("Base"),
            ClassDef::new("Other").parent("Object"),
        ]),
    )
    .unwrap();
    let programs: Vec<&str> = lib
        .program_classes()
        .map(|c| lib.class(c).name.as_str())
        .collect();
    assert_eq!(programs, vec!["App"]);
}

#[test]
fn test_duplicate_class_rejected() {
    let err = Library::new(
        "dup",
        with_builtins([ClassDef::new("A"), ClassDef::new("A")]),
    )
    .unwrap_err();
    assert_eq!(
        err,
        LibraryError::DuplicateClass {
            name: "A".to_string()
        }
    );
}

#[test]
fn test_duplicate_member_rejected() {
    let err = Library::new(
        "dup",
        with_builtins([ClassDef::new("A").field("x").field("x")]),
    )
    .unwrap_err();
    assert!(matches!(err, LibraryError::DuplicateMember { .. }));
}

#[test]
fn test_duplicate_method_reported_by_name() {
    let err = Library::new(
        "dup",
        with_builtins([ClassDef::new("A")
            .field("run")
            .method(Method::empty("run", &[]))
            .method(Method::empty("stop", &[]))
            .method(Method::empty("run", &["fast"]))]),
    )
    .unwrap_err();
    assert_eq!(
        err,
        LibraryError::DuplicateMember {
            class: "A".to_string(),
            member: "run".to_string(),
        }
    );
}

#[test]
fn test_unknown_parent_rejected() {
    let err = Library::new("bad", with_builtins([ClassDef::new("A").parent("Nope")])).unwrap_err();
    assert_eq!(
        err,
        LibraryError::UnknownParent {
            class: "A".to_string(),
            parent: "Nope".to_string()
        }
    );
}

#[test]
fn test_cycle_rejected() {
    let err = Library::new(
        "cycle",
        with_builtins([ClassDef::new("A").parent("B"), ClassDef::new("B").parent("A")]),
    )
    .unwrap_err();
    assert!(matches!(err, LibraryError::InheritanceCycle { .. }));
}

#[test]
fn test_missing_builtin_rejected() {
    let defs: Vec<ClassDef> = builtin_classes()
        .into_iter()
        .filter(|c| c.name != "Null")
        .collect();
    let err = Library::new("partial", defs).unwrap_err();
    assert_eq!(
        err,
        LibraryError::MissingBuiltin {
            name: "Null".to_string()
        }
    );
}

/// Parent choices for a random tree: class `i` extends `Object` or an earlier class.
fn tree_strategy() -> impl Strategy<Value = Vec<Option<usize>>> {
    (1usize..12).prop_flat_map(|n| {
        (0..n)
            .map(|i| {
                if i == 0 {
                    Just(None).boxed()
                } else {
                    proptest::option::of(0..i).boxed()
                }
            })
            .collect::<Vec<_>>()
    })
}

fn tree_library(parents: &[Option<usize>]) -> Library {
    let defs = parents.iter().enumerate().map(|(i, parent)| {
        let parent = parent.map_or_else(|| "Object".to_string(), |p| format!("C{p}"));
        ClassDef::new(format!("C{i}")).parent(parent)
    });
    Library::new("tree", with_builtins(defs)).unwrap()
}

proptest! {
    #[test]
    fn prop_is_matches_ancestor_chain(parents in tree_strategy()) {
        let lib = tree_library(&parents);
        for a in lib.ids() {
            prop_assert!(lib.is(a, a));
            let chain: Vec<ClassId> = lib.ancestors(a).collect();
            for b in lib.ids() {
                prop_assert_eq!(lib.is(a, b), chain.contains(&b));
                if a != b && lib.is(a, b) {
                    prop_assert!(!lib.is(b, a));
                }
            }
        }
    }

    #[test]
    fn prop_is_transitive(parents in tree_strategy()) {
        let lib = tree_library(&parents);
        for a in lib.ids() {
            for b in lib.ancestors(a) {
                for c in lib.ancestors(b) {
                    prop_assert!(lib.is(a, c));
                }
            }
        }
    }
}
