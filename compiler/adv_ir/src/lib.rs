//! Adv IR - class graph and syntax trees for the Adv runtime.
//!
//! This crate contains the load-time data the evaluator runs against:
//! - `ClassDef` as handed in by a loader, `Class` as stored after validation
//! - `Library`: the immutable class table with ancestor and member queries
//! - `InstanceLayout`: per-class field slot layouts
//! - `Expr`/`Stmt`: method body trees
//! - `prelude`: the builtin class ontology
//!
//! # Design
//!
//! - Parents are `ClassId` indices, never pointers
//! - Nothing here is mutated after `Library::new` returns
//! - `SharedLibrary` lets several interpreters read one library

pub mod ast;
mod class;
mod class_id;
mod layout;
mod library;
pub mod prelude;

pub use ast::{CallExpr, Expr, Stmt};
pub use class::{Class, ClassDef, Field, Member, Method};
pub use class_id::ClassId;
pub use layout::InstanceLayout;
pub use library::{Ancestors, BuiltinClasses, Library, LibraryError, Resolved, SharedLibrary};
