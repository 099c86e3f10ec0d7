//! Tree-walking interpreter for Adv programs.
//!
//! An `Interpreter` owns one run of one library: the single live program
//! instance, the canonical `True`/`False`/`Null` objects, the native method
//! registry and the console handlers. Everything works through `&self`;
//! the only interior state is the call stack.
//!
//! - `builder`: `InterpreterBuilder`
//! - `eval`: statements and expressions
//! - `dispatch`: method invocation and the native fallback

mod builder;
mod dispatch;
mod eval;

pub use builder::InterpreterBuilder;

use std::cell::RefCell;
use std::fmt;

use adv_ir::prelude::{MAIN, PROGRAM_FIELD};
use adv_ir::{Class, ClassId, Library, Member, Method, Resolved, SharedLibrary, Stmt};

use crate::builtins::{BuiltinRegistry, NativeCall};
use crate::diagnostics::CallStack;
use crate::errors::{call_undefined, call_wrong_argc, EvalResult};
use crate::input_handler::SharedInputHandler;
use crate::object::{AdvObject, ObjRef};
use crate::print_handler::SharedPrintHandler;

/// Parser callback used by `eval`: source text to a statement sequence.
///
/// The error string becomes the message of a `Parse` error.
pub type StatementParser = dyn Fn(&str) -> Result<Vec<Stmt>, String>;

/// Method name the textual form of an object is taken from.
const TO_STRING: &str = "toString";

/// The runtime for one program.
pub struct Interpreter {
    library: SharedLibrary,
    /// The single live instance of the entry class.
    program: ObjRef,
    null: ObjRef,
    true_: ObjRef,
    false_: ObjRef,
    builtins: BuiltinRegistry,
    print_handler: SharedPrintHandler,
    input_handler: SharedInputHandler,
    statement_parser: Option<Box<StatementParser>>,
    call_stack: RefCell<CallStack>,
}

impl Interpreter {
    /// Interpreter with the default natives writing to stdout and reading stdin.
    pub fn new(library: impl Into<SharedLibrary>) -> EvalResult<Self> {
        InterpreterBuilder::new(library).build()
    }

    /// Run the entry class's `main` on the live program instance.
    pub fn run(&self) -> EvalResult {
        let program = self.program.clone();
        let main = self
            .library
            .resolve::<Method>(program.class(), MAIN)
            .ok_or_else(|| call_undefined(program.class_name(), MAIN))?;
        tracing::debug!(program = program.class_name(), "running program");
        self.invoke(&program, main, &[])
    }

    /// Invoke `method` on `this`, for embedders and native handlers.
    ///
    /// `method` is normally one resolved from `this`'s class; a method
    /// borrowed from elsewhere is attributed to `this`'s class.
    pub fn run_method(&self, this: &ObjRef, method: &Method, args: &[ObjRef]) -> EvalResult {
        if args.len() != method.arity() {
            return Err(call_wrong_argc(
                this.class_name(),
                &method.name,
                &method.params,
                args.len(),
            ));
        }
        let declaring = self.declaring_class_of(this.class(), method);
        self.invoke(
            this,
            Resolved {
                declaring,
                member: method,
            },
            args,
        )
    }

    /// Register or replace a native handler.
    pub fn add_builtin_method<F>(
        &mut self,
        class: &str,
        method: &str,
        requires_program: bool,
        handler: F,
    ) where
        F: Fn(&NativeCall<'_>) -> EvalResult<Option<ObjRef>> + 'static,
    {
        self.builtins
            .register(class, method, requires_program, handler);
    }

    #[inline]
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// All loaded classes.
    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &Class)> + '_ {
        self.library.classes()
    }

    pub fn class_by_name(&self, name: &str) -> Option<&Class> {
        self.library.class_by_name(name)
    }

    /// Concrete classes usable as an entry point.
    pub fn program_classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.library.program_classes()
    }

    /// The live program instance.
    #[inline]
    pub fn program(&self) -> &ObjRef {
        &self.program
    }

    #[inline]
    pub fn null(&self) -> ObjRef {
        self.null.clone()
    }

    /// The canonical `True` or `False` object.
    #[inline]
    pub fn boolean(&self, value: bool) -> ObjRef {
        if value {
            self.true_.clone()
        } else {
            self.false_.clone()
        }
    }

    /// A fresh string object.
    pub fn string(&self, text: impl Into<Box<str>>) -> ObjRef {
        AdvObject::string(&self.library, text)
    }

    /// A new instance of `class`, or the canonical object for `True`, `False` and `Null`.
    pub fn instantiate(&self, class: ClassId) -> EvalResult {
        let builtins = self.library.builtins();
        if class == builtins.null {
            Ok(self.null())
        } else if class == builtins.true_ {
            Ok(self.true_.clone())
        } else if class == builtins.false_ {
            Ok(self.false_.clone())
        } else {
            AdvObject::construct(&self.library, class)
        }
    }

    /// Read a field, mapping an empty or undeclared slot to Null.
    pub fn get_field(&self, object: &ObjRef, field: &str) -> ObjRef {
        object.field(field).unwrap_or_else(|| self.null())
    }

    pub fn set_field(&self, object: &ObjRef, field: &str, value: ObjRef) -> EvalResult<()> {
        object.set_field(field, value)
    }

    /// Whether `object`'s class is `True` (or derives from it).
    pub fn is_true(&self, object: &ObjRef) -> bool {
        self.library
            .is(object.class(), self.library.builtins().true_)
    }

    /// Whether `object` is the live program or points at it through its `program` field.
    pub fn has_program_context(&self, object: &ObjRef) -> bool {
        object.ptr_eq(&self.program)
            || object
                .field(PROGRAM_FIELD)
                .is_some_and(|p| p.ptr_eq(&self.program))
    }

    /// The text `Output.write` prints for `object`.
    ///
    /// String payload first, then a `toString` returning a string, then the class name.
    pub fn display(&self, object: &ObjRef) -> EvalResult<String> {
        Ok(self
            .call_to_string(object)?
            .unwrap_or_else(|| object.class_name().to_string()))
    }

    /// Text produced by `object.toString()`, if it has a usable one.
    ///
    /// `None` when there is no zero-argument `toString`, when it is an
    /// unwired native, or when it returns something other than a string.
    pub fn call_to_string(&self, object: &ObjRef) -> EvalResult<Option<String>> {
        if let Some(text) = object.text() {
            return Ok(Some(text.to_string()));
        }
        let Some(resolved) = self.library.resolve::<Method>(object.class(), TO_STRING) else {
            return Ok(None);
        };
        if resolved.member.arity() != 0 || !self.is_callable(resolved) {
            return Ok(None);
        }
        let result = self.invoke(object, resolved, &[])?;
        Ok(result.text().map(str::to_string))
    }

    #[inline]
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    #[inline]
    pub fn input_handler(&self) -> &SharedInputHandler {
        &self.input_handler
    }

    /// Current interpreted call depth.
    pub fn call_depth(&self) -> usize {
        self.call_stack.borrow().depth()
    }

    /// A body, or a native registered for the declaring class.
    fn is_callable(&self, resolved: Resolved<'_, Method>) -> bool {
        resolved.member.body.is_some()
            || self
                .builtins
                .contains(&self.library.class(resolved.declaring).name, &resolved.member.name)
    }

    /// The class at or above `class` whose own methods include `method`.
    fn declaring_class_of(&self, class: ClassId, method: &Method) -> ClassId {
        let library = &self.library;
        library
            .ancestors(class)
            .find(|&id| {
                library
                    .class(id)
                    .methods
                    .iter()
                    .any(|own| std::ptr::eq(own, method))
            })
            .or_else(|| library.declaring_class::<Method>(class, method.name()))
            .unwrap_or(class)
    }
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("library", &self.library.name())
            .field("program", &self.program)
            .field("builtins", &self.builtins.len())
            .field("eval", &self.statement_parser.is_some())
            .finish_non_exhaustive()
    }
}
