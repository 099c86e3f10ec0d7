//! The class graph: an immutable table of classes with single inheritance.
//!
//! # Queries
//!
//! Everything is built on one primitive, [`Library::resolve`], which walks
//! the ancestor chain from a class until a member with the given name is
//! found among a class's *own* members. Dynamic dispatch uses the member it
//! returns; native method lookup uses the declaring class it returns.

#![expect(
    clippy::disallowed_types,
    reason = "Arc is the implementation of SharedLibrary"
)]

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

use crate::class::{Class, ClassDef, Member};
use crate::layout::InstanceLayout;
use crate::prelude;
use crate::ClassId;

/// Error raised while building a `Library` from loader output.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LibraryError {
    #[error("class '{name}' is defined more than once")]
    DuplicateClass { name: String },
    #[error("class '{class}' declares '{member}' more than once")]
    DuplicateMember { class: String, member: String },
    #[error("class '{class}' extends unknown class '{parent}'")]
    UnknownParent { class: String, parent: String },
    #[error("class '{class}' is part of an inheritance cycle")]
    InheritanceCycle { class: String },
    #[error("builtin class '{name}' is missing")]
    MissingBuiltin { name: String },
    #[error("library has more classes than can be indexed")]
    TooManyClasses,
}

/// Ids of the builtin classes the evaluator refers to directly.
#[derive(Copy, Clone, Debug)]
pub struct BuiltinClasses {
    pub object: ClassId,
    pub program: ClassId,
    pub true_: ClassId,
    pub false_: ClassId,
    pub null: ClassId,
    pub string: ClassId,
}

/// A member found by [`Library::resolve`], with the class that declares it.
#[derive(Debug)]
pub struct Resolved<'a, M> {
    pub declaring: ClassId,
    pub member: &'a M,
}

impl<M> Clone for Resolved<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Resolved<'_, M> {}

/// A named, validated collection of classes.
pub struct Library {
    name: String,
    classes: Vec<Class>,
    by_name: FxHashMap<String, ClassId>,
    layouts: Vec<InstanceLayout>,
    builtins: BuiltinClasses,
}

impl Library {
    /// Resolve parent names, check the graph is a tree, and compute layouts.
    pub fn new(name: impl Into<String>, defs: Vec<ClassDef>) -> Result<Self, LibraryError> {
        let mut by_name = FxHashMap::default();
        for (index, def) in defs.iter().enumerate() {
            let id = ClassId::new(u32::try_from(index).map_err(|_| LibraryError::TooManyClasses)?);
            if by_name.insert(def.name.clone(), id).is_some() {
                return Err(LibraryError::DuplicateClass {
                    name: def.name.clone(),
                });
            }
            check_unique_members(def)?;
        }

        let mut classes = Vec::with_capacity(defs.len());
        for def in defs {
            let parent = match &def.parent {
                Some(parent) => Some(*by_name.get(parent).ok_or_else(|| {
                    LibraryError::UnknownParent {
                        class: def.name.clone(),
                        parent: parent.clone(),
                    }
                })?),
                None => None,
            };
            classes.push(Class {
                name: def.name,
                parent,
                is_abstract: def.is_abstract,
                fields: def.fields,
                methods: def.methods,
            });
        }

        check_acyclic(&classes)?;

        let builtin = |name: &str| {
            by_name
                .get(name)
                .copied()
                .ok_or_else(|| LibraryError::MissingBuiltin {
                    name: name.to_string(),
                })
        };
        for required in prelude::REQUIRED {
            builtin(required)?;
        }
        let builtins = BuiltinClasses {
            object: builtin(prelude::OBJECT)?,
            program: builtin(prelude::PROGRAM)?,
            true_: builtin(prelude::TRUE)?,
            false_: builtin(prelude::FALSE)?,
            null: builtin(prelude::NULL)?,
            string: builtin(prelude::STRING)?,
        };

        let mut library = Library {
            name: name.into(),
            classes,
            by_name,
            layouts: Vec::new(),
            builtins,
        };
        library.layouts = library.ids().map(|id| library.compute_layout(id)).collect();
        Ok(library)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The class with the given id.
    ///
    /// Ids only come from this library, so indexing cannot go out of range.
    #[inline]
    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.index()]
    }

    /// Find a class by name.
    #[inline]
    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    pub fn class_by_name(&self, name: &str) -> Option<&Class> {
        self.class_id(name).map(|id| self.class(id))
    }

    /// All class ids in definition order.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Library::new rejects tables that do not fit in u32"
    )]
    pub fn ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        (0..self.classes.len()).map(|i| ClassId::new(i as u32))
    }

    /// All classes with their ids, in definition order.
    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &Class)> + '_ {
        self.ids().zip(self.classes.iter())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    #[inline]
    pub fn builtins(&self) -> &BuiltinClasses {
        &self.builtins
    }

    #[inline]
    pub fn layout(&self, id: ClassId) -> &InstanceLayout {
        &self.layouts[id.index()]
    }

    /// `class` followed by each of its ancestors up to the root.
    pub fn ancestors(&self, class: ClassId) -> Ancestors<'_> {
        Ancestors {
            library: self,
            next: Some(class),
        }
    }

    /// Whether `target` is `subject` or one of its ancestors.
    pub fn is(&self, subject: ClassId, target: ClassId) -> bool {
        self.ancestors(subject).any(|id| id == target)
    }

    /// Find a member by name starting at `class` and walking up the parent chain.
    pub fn resolve<M: Member>(&self, class: ClassId, name: &str) -> Option<Resolved<'_, M>> {
        self.ancestors(class).find_map(|id| {
            M::own(self.class(id))
                .iter()
                .find(|member| member.name() == name)
                .map(|member| Resolved {
                    declaring: id,
                    member,
                })
        })
    }

    /// The member visible on `class` under `name`, own or inherited.
    pub fn lookup<M: Member>(&self, class: ClassId, name: &str) -> Option<&M> {
        self.resolve(class, name).map(|r| r.member)
    }

    /// The nearest class at or above `class` that declares `name` itself.
    pub fn declaring_class<M: Member>(&self, class: ClassId, name: &str) -> Option<ClassId> {
        self.resolve::<M>(class, name).map(|r| r.declaring)
    }

    /// Concrete classes that are a `Program`, in definition order.
    pub fn program_classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        let program = self.builtins.program;
        self.ids()
            .filter(move |&id| !self.class(id).is_abstract && self.is(id, program))
    }

    fn compute_layout(&self, id: ClassId) -> InstanceLayout {
        let mut chain: Vec<ClassId> = self.ancestors(id).collect();
        chain.reverse();
        let names = chain
            .into_iter()
            .flat_map(|c| self.class(c).fields.iter().map(|f| f.name.as_str()));
        InstanceLayout::new(id, &self.class(id).name, names)
    }
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("name", &self.name)
            .field("classes", &self.classes.len())
            .finish_non_exhaustive()
    }
}

/// Iterator over a class and its ancestors.
pub struct Ancestors<'a> {
    library: &'a Library,
    next: Option<ClassId>,
}

impl Iterator for Ancestors<'_> {
    type Item = ClassId;

    fn next(&mut self) -> Option<ClassId> {
        let current = self.next?;
        self.next = self.library.class(current).parent;
        Some(current)
    }
}

/// First name that occurs twice.
fn duplicate<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = rustc_hash::FxHashSet::default();
    names.into_iter().find(|name| !seen.insert(*name))
}

fn check_unique_members(def: &ClassDef) -> Result<(), LibraryError> {
    let dup = duplicate(def.fields.iter().map(|f| f.name.as_str()))
        .or_else(|| duplicate(def.methods.iter().map(|m| m.name.as_str())));
    match dup {
        Some(member) => Err(LibraryError::DuplicateMember {
            class: def.name.clone(),
            member: member.to_string(),
        }),
        None => Ok(()),
    }
}

fn check_acyclic(classes: &[Class]) -> Result<(), LibraryError> {
    // A chain longer than the class count must revisit a class.
    for class in classes {
        let mut steps = 0usize;
        let mut current = class.parent;
        while let Some(id) = current {
            steps += 1;
            if steps > classes.len() {
                return Err(LibraryError::InheritanceCycle {
                    class: class.name.clone(),
                });
            }
            current = classes[id.index()].parent;
        }
    }
    Ok(())
}

/// Immutable library shared by any number of interpreters.
pub struct SharedLibrary(Arc<Library>);

impl SharedLibrary {
    pub fn new(library: Library) -> Self {
        SharedLibrary(Arc::new(library))
    }
}

impl Clone for SharedLibrary {
    fn clone(&self) -> Self {
        SharedLibrary(Arc::clone(&self.0))
    }
}

impl std::ops::Deref for SharedLibrary {
    type Target = Library;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Library> for SharedLibrary {
    fn from(library: Library) -> Self {
        SharedLibrary::new(library)
    }
}

impl fmt::Debug for SharedLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedLibrary({:?})", &*self.0)
    }
}

#[cfg(test)]
mod tests;
