//! Native ("builtin") methods.
//!
//! A method declared without a body is looked up here by the name of the
//! class that *declares* it and the method name, so a handler registered on
//! a base class serves every subclass that inherits the empty body.
//!
//! The registry is filled before a run starts and only read afterwards.
//!
//! Handler groups:
//! - `primitives`: `String` operations, `Object.toString`, `Object.throw`
//! - `io`: `Output.write`, `Input.read`
//! - `mirror`: reflection over the class graph

mod io;
mod mirror;
mod primitives;

use rustc_hash::FxHashMap;
use std::fmt;

use adv_ir::{ClassId, Method};

use crate::errors::{call_invalid_argument, EvalError, EvalResult};
use crate::interpreter::Interpreter;
use crate::object::ObjRef;

/// Everything a native handler gets to see about one call.
pub struct NativeCall<'a> {
    pub interpreter: &'a Interpreter,
    /// The receiver.
    pub this: &'a ObjRef,
    /// Evaluated arguments; the count already matches `method.params`.
    pub args: &'a [ObjRef],
    /// The resolved body-less method.
    pub method: &'a Method,
    /// Class that declares `method`.
    pub declaring: ClassId,
}

impl NativeCall<'_> {
    /// `CallInvalidArgument` for this call.
    #[cold]
    pub fn invalid_argument(&self) -> EvalError {
        call_invalid_argument(self.this.class_name(), &self.method.name)
    }

    pub fn arg(&self, index: usize) -> EvalResult<&ObjRef> {
        self.args.get(index).ok_or_else(|| self.invalid_argument())
    }

    /// Text of a string object; `CallInvalidArgument` for anything else.
    pub fn expect_str<'o>(&self, object: &'o ObjRef) -> EvalResult<&'o str> {
        object.text().ok_or_else(|| self.invalid_argument())
    }

    /// The receiver as text.
    pub fn this_str(&self) -> EvalResult<&str> {
        self.expect_str(self.this)
    }

    /// Argument `index` as text.
    pub fn str_arg(&self, index: usize) -> EvalResult<&str> {
        self.expect_str(self.arg(index)?)
    }

    /// Argument `index` as a base-10 integer.
    ///
    /// The argument's own `toString` is invoked when it has one, so any
    /// object whose textual form is a numeral counts; otherwise the runtime
    /// class name is parsed.
    pub fn int_arg(&self, index: usize) -> EvalResult<i64> {
        let object = self.arg(index)?;
        let text = match self.interpreter.call_to_string(object)? {
            Some(text) => text,
            None => object.class_name().to_string(),
        };
        text.parse().map_err(|_| self.invalid_argument())
    }
}

/// Native handler signature. `Ok(None)` means the canonical Null.
pub type NativeFn = dyn Fn(&NativeCall<'_>) -> EvalResult<Option<ObjRef>>;

/// A registered native method.
pub struct BuiltinMethod {
    /// Receiver must be the running program or reference it through its `program` field.
    pub requires_program: bool,
    handler: Box<NativeFn>,
}

impl BuiltinMethod {
    pub fn call(&self, call: &NativeCall<'_>) -> EvalResult<Option<ObjRef>> {
        (self.handler)(call)
    }
}

impl fmt::Debug for BuiltinMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinMethod")
            .field("requires_program", &self.requires_program)
            .finish_non_exhaustive()
    }
}

/// Native handlers keyed by declaring class name, then method name.
#[derive(Debug, Default)]
pub struct BuiltinRegistry {
    methods: FxHashMap<String, FxHashMap<String, BuiltinMethod>>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the primitive, I/O and reflection handlers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        primitives::register(&mut registry);
        io::register(&mut registry);
        mirror::register(&mut registry);
        registry
    }

    /// Register a handler, replacing any previous one for the same method.
    pub fn register<F>(&mut self, class: &str, method: &str, requires_program: bool, handler: F)
    where
        F: Fn(&NativeCall<'_>) -> EvalResult<Option<ObjRef>> + 'static,
    {
        tracing::trace!(class, method, requires_program, "registering builtin method");
        self.methods.entry(class.to_string()).or_default().insert(
            method.to_string(),
            BuiltinMethod {
                requires_program,
                handler: Box::new(handler),
            },
        );
    }

    pub fn lookup(&self, class: &str, method: &str) -> Option<&BuiltinMethod> {
        self.methods.get(class)?.get(method)
    }

    pub fn contains(&self, class: &str, method: &str) -> bool {
        self.lookup(class, method).is_some()
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.methods.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests;
