//! Adv Eval - tree-walking interpreter for Adv programs.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Interpreter`: one run of one `adv_ir::Library`, built by `InterpreterBuilder`
//! - `AdvObject`/`ObjRef`: reference-counted instances with per-class slot layouts
//! - `BuiltinRegistry`: native handlers for body-less methods, keyed by declaring class
//! - `CallStack`: live frames, depth limit, traces attached to errors
//! - print and input handlers for console I/O
//!
//! # Errors
//!
//! Every `EvalError` aborts the run. Its `kind` is one of `EvalErrorKind`;
//! construction goes through the functions in [`errors`].

mod builtins;
mod diagnostics;
pub mod errors;
mod input_handler;
pub mod interpreter;
mod logging;
mod object;
mod print_handler;
mod stack;

pub use builtins::{BuiltinMethod, BuiltinRegistry, NativeCall, NativeFn};
pub use diagnostics::{CallFrame, CallStack};
pub use errors::{CallTrace, EvalError, EvalErrorKind, EvalResult};
pub use input_handler::{
    closed_handler, scripted_handler, stdin_handler, InputHandlerImpl, SharedInputHandler,
};
pub use interpreter::{Interpreter, InterpreterBuilder, StatementParser};
pub use logging::init_tracing;
pub use object::{AdvObject, ObjRef};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler,
};
pub use stack::ensure_sufficient_stack;
