//! Runtime objects.
//!
//! An `AdvObject` is bound to one class for its whole life and owns one slot
//! per field its class declares or inherits. Slots use the class's shared
//! `InstanceLayout`. An empty slot stands for the canonical Null object, so
//! Null itself never has to exist before the first instance is built; the
//! interpreter substitutes the canonical Null when a slot is read.
//!
//! Objects are reference counted (`ObjRef`). Language equality is identity
//! of the allocation, never structural comparison.

#![expect(
    clippy::disallowed_types,
    reason = "Rc is the implementation of ObjRef"
)]

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use adv_ir::{ClassId, InstanceLayout, Library};

use crate::errors::{abstract_class, field_undefined, EvalResult};

/// A runtime instance.
pub struct AdvObject {
    layout: InstanceLayout,
    slots: RefCell<Vec<Option<ObjRef>>>,
    /// Payload of string objects; always bound to `String`.
    text: Option<Box<str>>,
}

impl AdvObject {
    /// Instantiate `class`, all fields empty (Null).
    pub fn construct(library: &Library, class: ClassId) -> EvalResult<ObjRef> {
        let def = library.class(class);
        if def.is_abstract {
            return Err(abstract_class(&def.name));
        }
        Ok(Self::with_text(library.layout(class).clone(), None))
    }

    /// A string object wrapping `text`.
    pub fn string(library: &Library, text: impl Into<Box<str>>) -> ObjRef {
        let layout = library.layout(library.builtins().string).clone();
        Self::with_text(layout, Some(text.into()))
    }

    fn with_text(layout: InstanceLayout, text: Option<Box<str>>) -> ObjRef {
        let slots = vec![None; layout.len()];
        ObjRef(Rc::new(AdvObject {
            layout,
            slots: RefCell::new(slots),
            text,
        }))
    }

    #[inline]
    pub fn class(&self) -> ClassId {
        self.layout.class()
    }

    #[inline]
    pub fn class_name(&self) -> &str {
        self.layout.class_name()
    }

    /// The string payload, if this is a string object.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Whether the class (or an ancestor) declares `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.layout.index_of(field).is_some()
    }

    /// Read a field. `None` means Null: either never assigned or not declared.
    pub fn field(&self, field: &str) -> Option<ObjRef> {
        let index = self.layout.index_of(field)?;
        self.slots.borrow().get(index).cloned().flatten()
    }

    /// Overwrite a declared field.
    pub fn set_field(&self, field: &str, value: ObjRef) -> EvalResult<()> {
        let index = self
            .layout
            .index_of(field)
            .ok_or_else(|| field_undefined(self.class_name(), field))?;
        if let Some(slot) = self.slots.borrow_mut().get_mut(index) {
            *slot = Some(value);
        }
        Ok(())
    }
}

impl Drop for AdvObject {
    /// Tear down uniquely owned children with a worklist, so dropping a long
    /// chain of objects doesn't recurse once per link.
    fn drop(&mut self) {
        let mut pending: Vec<ObjRef> = self.slots.get_mut().drain(..).flatten().collect();
        while let Some(mut child) = pending.pop() {
            if let Some(object) = Rc::get_mut(&mut child.0) {
                pending.extend(object.slots.get_mut().drain(..).flatten());
            }
        }
    }
}

impl fmt::Display for AdvObject {
    /// The string payload for strings, the class name otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => f.write_str(text),
            None => f.write_str(self.class_name()),
        }
    }
}

impl fmt::Debug for AdvObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("AdvObject");
        s.field("class", &self.class_name());
        if let Some(text) = &self.text {
            s.field("text", text);
        }
        s.finish_non_exhaustive()
    }
}

/// Shared handle to an `AdvObject`.
#[derive(Clone)]
pub struct ObjRef(Rc<AdvObject>);

impl ObjRef {
    /// Reference identity, the language's `==`.
    #[inline]
    pub fn ptr_eq(&self, other: &ObjRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for ObjRef {
    type Target = AdvObject;

    #[inline]
    fn deref(&self) -> &AdvObject {
        &self.0
    }
}

impl fmt::Display for ObjRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl fmt::Debug for ObjRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
