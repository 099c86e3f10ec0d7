//! Per-class field slot layouts.
//!
//! Every class gets one layout covering its inherited and own fields,
//! computed once at load time and shared by all of its instances.

#![expect(
    clippy::disallowed_types,
    reason = "Arc is the implementation of InstanceLayout"
)]

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

use crate::ClassId;

struct LayoutData {
    class: ClassId,
    class_name: String,
    /// Field names in slot order: root ancestor first, declaration order within a class.
    names: Vec<String>,
    indices: FxHashMap<String, usize>,
}

/// Slot layout for instances of one class.
#[derive(Clone)]
pub struct InstanceLayout(Arc<LayoutData>);

impl InstanceLayout {
    pub(crate) fn new<'a>(
        class: ClassId,
        class_name: &str,
        field_names: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut names = Vec::new();
        let mut indices = FxHashMap::default();
        for name in field_names {
            // A field redeclared by a subclass shares the inherited slot.
            if !indices.contains_key(name) {
                indices.insert(name.to_string(), names.len());
                names.push(name.to_string());
            }
        }
        InstanceLayout(Arc::new(LayoutData {
            class,
            class_name: class_name.to_string(),
            names,
            indices,
        }))
    }

    /// The class this layout belongs to.
    #[inline]
    pub fn class(&self) -> ClassId {
        self.0.class
    }

    #[inline]
    pub fn class_name(&self) -> &str {
        &self.0.class_name
    }

    /// Slot index of a field, if the class or an ancestor declares it.
    #[inline]
    pub fn index_of(&self, field: &str) -> Option<usize> {
        self.0.indices.get(field).copied()
    }

    /// Field names in slot order.
    pub fn names(&self) -> &[String] {
        &self.0.names
    }

    pub fn len(&self) -> usize {
        self.0.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.names.is_empty()
    }
}

impl fmt::Debug for InstanceLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceLayout")
            .field("class", &self.0.class_name)
            .field("fields", &self.0.names)
            .finish()
    }
}
