//! Class, method and field descriptors.
//!
//! `ClassDef` is what a loader hands in (parent by name); `Class` is the
//! resolved, immutable form stored in a `Library` (parent by `ClassId`).

use crate::ast::Stmt;
use crate::ClassId;

/// A storage slot declared on one class.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub name: String,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Field { name: name.into() }
    }
}

/// A named, parameterized method declared on one class.
///
/// A method without a body is either abstract or fulfilled by a native
/// handler; which one is decided at call time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Method {
    pub name: String,
    pub params: Vec<String>,
    pub body: Option<Vec<Stmt>>,
}

impl Method {
    /// Method with an interpreted body.
    pub fn new(name: impl Into<String>, params: &[&str], body: Vec<Stmt>) -> Self {
        Method {
            name: name.into(),
            params: params.iter().map(|p| (*p).to_string()).collect(),
            body: Some(body),
        }
    }

    /// Body-less method (abstract or native).
    pub fn empty(name: impl Into<String>, params: &[&str]) -> Self {
        Method {
            name: name.into(),
            params: params.iter().map(|p| (*p).to_string()).collect(),
            body: None,
        }
    }

    /// Number of declared parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Class description as produced by a loader.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDef {
    pub name: String,
    pub parent: Option<String>,
    pub is_abstract: bool,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
}

impl ClassDef {
    /// A concrete class with no parent and no members.
    pub fn new(name: impl Into<String>) -> Self {
        ClassDef {
            name: name.into(),
            parent: None,
            is_abstract: false,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(Field::new(name));
        self
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }
}

/// A resolved class stored in a `Library`.
#[derive(Clone, Debug)]
pub struct Class {
    pub name: String,
    pub parent: Option<ClassId>,
    pub is_abstract: bool,
    /// Own fields in declaration order.
    pub fields: Vec<Field>,
    /// Own methods in declaration order.
    pub methods: Vec<Method>,
}

/// Something a class can declare and a subclass can inherit.
pub trait Member: Sized {
    fn name(&self) -> &str;

    /// The members of this kind declared directly on `class`.
    fn own(class: &Class) -> &[Self];
}

impl Member for Field {
    fn name(&self) -> &str {
        &self.name
    }

    fn own(class: &Class) -> &[Self] {
        &class.fields
    }
}

impl Member for Method {
    fn name(&self) -> &str {
        &self.name
    }

    fn own(class: &Class) -> &[Self] {
        &class.methods
    }
}
