//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::cell::RefCell;

use adv_ir::{SharedLibrary, Stmt};

use super::{Interpreter, StatementParser};
use crate::builtins::BuiltinRegistry;
use crate::diagnostics::CallStack;
use crate::errors::{program_not_found, EvalResult};
use crate::input_handler::{stdin_handler, SharedInputHandler};
use crate::object::AdvObject;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for creating Interpreter instances.
///
/// Defaults: stdout output, stdin input, no `eval` support, unlimited call
/// depth, and the standard natives installed.
pub struct InterpreterBuilder {
    library: SharedLibrary,
    print_handler: Option<SharedPrintHandler>,
    input_handler: Option<SharedInputHandler>,
    statement_parser: Option<Box<StatementParser>>,
    max_call_depth: Option<usize>,
    default_builtins: bool,
}

impl InterpreterBuilder {
    pub fn new(library: impl Into<SharedLibrary>) -> Self {
        Self {
            library: library.into(),
            print_handler: None,
            input_handler: None,
            statement_parser: None,
            max_call_depth: None,
            default_builtins: true,
        }
    }

    /// Set the print handler used by `Output.write` and the `Input.read` prompt.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set the line source used by `Input.read`.
    #[must_use]
    pub fn input_handler(mut self, handler: SharedInputHandler) -> Self {
        self.input_handler = Some(handler);
        self
    }

    /// Enable `eval` with the given parser.
    #[must_use]
    pub fn statement_parser<F>(mut self, parser: F) -> Self
    where
        F: Fn(&str) -> Result<Vec<Stmt>, String> + 'static,
    {
        self.statement_parser = Some(Box::new(parser));
        self
    }

    /// Fail with `StackOverflow` once this many calls are active.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    /// Start from an empty native registry.
    #[must_use]
    pub fn without_default_builtins(mut self) -> Self {
        self.default_builtins = false;
        self
    }

    /// Pick the entry class and allocate the program and canonical objects.
    ///
    /// The entry class is the first concrete `Program` subclass in definition order.
    pub fn build(self) -> EvalResult<Interpreter> {
        let library = self.library;
        let entry = library
            .program_classes()
            .next()
            .ok_or_else(|| program_not_found(library.name()))?;
        tracing::debug!(
            library = library.name(),
            entry = %library.class(entry).name,
            "selected entry class"
        );

        let builtins = *library.builtins();
        let program = AdvObject::construct(&library, entry)?;
        let null = AdvObject::construct(&library, builtins.null)?;
        let true_ = AdvObject::construct(&library, builtins.true_)?;
        let false_ = AdvObject::construct(&library, builtins.false_)?;

        let registry = if self.default_builtins {
            BuiltinRegistry::with_defaults()
        } else {
            BuiltinRegistry::new()
        };

        Ok(Interpreter {
            library,
            program,
            null,
            true_,
            false_,
            builtins: registry,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            input_handler: self.input_handler.unwrap_or_else(stdin_handler),
            statement_parser: self.statement_parser,
            call_stack: RefCell::new(CallStack::new(self.max_call_depth)),
        })
    }
}
