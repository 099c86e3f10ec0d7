//! Stable class indices.
//!
//! Parents are stored as `ClassId`s into the owning `Library` rather than
//! as pointers, so the class graph never forms reference cycles.

use std::fmt;

/// Index of a class inside a `Library`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct ClassId(u32);

impl ClassId {
    /// Create a new `ClassId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        ClassId(index)
    }

    /// Get the index into the library's class table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}
