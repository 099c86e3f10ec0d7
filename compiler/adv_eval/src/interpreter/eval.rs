//! Statement execution and expression evaluation.
//!
//! A `Frame` holds the receiver and the locals of one method activation.
//! `eval` reuses the frame of the method it appears in, so its code sees and
//! updates the same locals.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use adv_ir::ast::{CallExpr, Expr, Stmt};
use adv_ir::prelude::OBJECT;
use adv_ir::Method;

use super::Interpreter;
use crate::errors::{
    call_invalid_argument, call_undefined, call_wrong_argc, name_not_found, parse_error,
    unknown_is_class, EvalResult,
};
use crate::object::ObjRef;

/// Name the receiver is bound to.
const THIS: &str = "this";

/// Name `eval` is reported under when it fails.
const EVAL: &str = "eval";

/// Arguments of a single call; most calls take few.
type Args = SmallVec<[ObjRef; 4]>;

/// One method activation.
pub(super) struct Frame {
    pub(super) this: ObjRef,
    pub(super) locals: FxHashMap<String, ObjRef>,
}

impl Frame {
    /// Activation for `method` with parameters bound to `args`.
    pub(super) fn new(this: ObjRef, method: &Method, args: &[ObjRef]) -> Self {
        let locals = method
            .params
            .iter()
            .cloned()
            .zip(args.iter().cloned())
            .collect();
        Frame { this, locals }
    }
}

/// How a statement sequence finished.
pub(super) enum Flow {
    /// Ran to the end.
    Next,
    /// A `return` fired; unwind to the method boundary.
    Return(ObjRef),
}

impl Interpreter {
    /// Run `body` until it ends or a `return` fires.
    pub(super) fn exec_block(&self, frame: &mut Frame, body: &[Stmt]) -> EvalResult<Flow> {
        for stmt in body {
            if let Flow::Return(value) = self.exec_stmt(frame, stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Next)
    }

    fn exec_stmt(&self, frame: &mut Frame, stmt: &Stmt) -> EvalResult<Flow> {
        match stmt {
            Stmt::SetVar { name, value } => {
                let value = self.eval_expr(frame, value)?;
                frame.locals.insert(name.clone(), value);
            }
            Stmt::SetField {
                receiver,
                field,
                value,
            } => {
                let receiver = self.eval_expr(frame, receiver)?;
                let value = self.eval_expr(frame, value)?;
                self.set_field(&receiver, field, value)?;
            }
            Stmt::Call(call) => {
                self.eval_call(frame, call)?;
            }
            Stmt::Eval(source) => {
                self.eval_source(frame, source)?;
            }
            Stmt::Return(value) => {
                return Ok(Flow::Return(self.eval_expr(frame, value)?));
            }
            Stmt::If { condition, body } => {
                let condition = self.eval_expr(frame, condition)?;
                if self.is_true(&condition) {
                    return self.exec_block(frame, body);
                }
            }
            Stmt::While { condition, body } => loop {
                let condition = self.eval_expr(frame, condition)?;
                if !self.is_true(&condition) {
                    break;
                }
                if let Flow::Return(value) = self.exec_block(frame, body)? {
                    return Ok(Flow::Return(value));
                }
            },
        }
        Ok(Flow::Next)
    }

    pub(super) fn eval_expr(&self, frame: &mut Frame, expr: &Expr) -> EvalResult {
        match expr {
            Expr::Get { name } => self.eval_get(frame, name),
            Expr::Call(call) => self.eval_call(frame, call),
            Expr::GetField { receiver, field } => {
                let receiver = self.eval_expr(frame, receiver)?;
                Ok(self.get_field(&receiver, field))
            }
            Expr::Is {
                receiver,
                class_name,
            } => {
                let receiver = self.eval_expr(frame, receiver)?;
                let target = self
                    .library
                    .class_id(class_name)
                    .ok_or_else(|| unknown_is_class(&receiver, class_name))?;
                Ok(self.boolean(self.library.is(receiver.class(), target)))
            }
            Expr::Equals { left, right } => {
                let left = self.eval_expr(frame, left)?;
                let right = self.eval_expr(frame, right)?;
                Ok(self.boolean(left.ptr_eq(&right)))
            }
            Expr::Str(text) => Ok(self.string(text.as_str())),
            Expr::Eval(source) => self.eval_source(frame, source),
        }
    }

    /// `this`, then locals, then class literals.
    fn eval_get(&self, frame: &Frame, name: &str) -> EvalResult {
        if name == THIS {
            return Ok(frame.this.clone());
        }
        if let Some(value) = frame.locals.get(name) {
            return Ok(value.clone());
        }
        match self.library.class_id(name) {
            Some(class) => self.instantiate(class),
            None => Err(name_not_found(name)),
        }
    }

    /// Dynamic dispatch on the receiver's runtime class.
    ///
    /// The argument count is checked before any argument is evaluated.
    fn eval_call(&self, frame: &mut Frame, call: &CallExpr) -> EvalResult {
        let receiver = self.eval_expr(frame, &call.receiver)?;
        let resolved = self
            .library
            .resolve::<Method>(receiver.class(), &call.method)
            .ok_or_else(|| call_undefined(receiver.class_name(), &call.method))?;
        let method = resolved.member;
        if call.args.len() != method.arity() {
            return Err(call_wrong_argc(
                receiver.class_name(),
                &method.name,
                &method.params,
                call.args.len(),
            ));
        }
        let mut args = Args::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.eval_expr(frame, arg)?);
        }
        self.invoke(&receiver, resolved, &args)
    }

    /// Parse the text `source` evaluates to and run it in `frame`.
    ///
    /// A `return` in the evaluated code ends the evaluated code only; its
    /// value is the result. Without one the result is Null.
    fn eval_source(&self, frame: &mut Frame, source: &Expr) -> EvalResult {
        let Some(parser) = &self.statement_parser else {
            return Err(call_undefined(OBJECT, EVAL));
        };
        let source = self.eval_expr(frame, source)?;
        let text = source
            .text()
            .ok_or_else(|| call_invalid_argument(OBJECT, EVAL))?;
        let body = parser(text).map_err(|message| parse_error(&message))?;
        tracing::trace!(statements = body.len(), "evaluating parsed source");
        match self.exec_block(frame, &body)? {
            Flow::Return(value) => Ok(value),
            Flow::Next => Ok(self.null()),
        }
    }
}
