//! Call frame tracking.
//!
//! Every method invocation pushes a frame naming the class that declares the
//! method and the method itself. The stack enforces the optional depth limit
//! and is snapshotted into a `CallTrace` when an error unwinds through it.

use adv_ir::{ClassId, Library};

use crate::errors::{stack_overflow, CallTrace, EvalError};

/// A single frame in the live call stack.
#[derive(Clone, Debug)]
pub struct CallFrame {
    /// Class declaring the invoked method.
    pub class: ClassId,
    pub method: String,
}

/// Live call stack for the interpreter.
#[derive(Clone, Debug, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth` is `None` for unlimited.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// The frame is not pushed on overflow.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(stack_overflow(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Snapshot as `Class.method` entries, most recent call first.
    pub fn capture(&self, library: &Library) -> CallTrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|f| format!("{}.{}", library.class(f.class).name, f.method))
            .collect();
        CallTrace::new(frames)
    }
}
