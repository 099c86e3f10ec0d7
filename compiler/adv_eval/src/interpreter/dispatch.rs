//! Method invocation.
//!
//! A method with a body is interpreted in a fresh frame. A body-less method
//! falls back to the native registry, keyed by the class that declares it:
//!
//! 1. no native registered: `CallEmpty`
//! 2. native needs program context the receiver lacks: `CallNoProgram`
//! 3. declared on `Program` and the receiver isn't the live program: `CallWrongProgram`
//! 4. otherwise the native runs; `None` becomes Null

use std::cell::RefCell;

use adv_ir::{Method, Resolved};

use super::eval::{Flow, Frame};
use super::Interpreter;
use crate::builtins::NativeCall;
use crate::diagnostics::{CallFrame, CallStack};
use crate::errors::{call_empty, call_no_program, call_wrong_program, EvalError, EvalResult};
use crate::object::ObjRef;
use crate::stack::ensure_sufficient_stack;

/// Pops the call frame it was created for when dropped.
struct FrameGuard<'a> {
    stack: &'a RefCell<CallStack>,
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        self.stack.borrow_mut().pop();
    }
}

impl Interpreter {
    /// Invoke an already resolved method. The argument count must match.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(class = %this.class_name(), method = %resolved.member.name)
    )]
    pub(super) fn invoke(
        &self,
        this: &ObjRef,
        resolved: Resolved<'_, Method>,
        args: &[ObjRef],
    ) -> EvalResult {
        ensure_sufficient_stack(|| {
            let guard = self.enter(resolved)?;
            let result = match &resolved.member.body {
                Some(body) => {
                    let mut frame = Frame::new(this.clone(), resolved.member, args);
                    self.exec_block(&mut frame, body).map(|flow| match flow {
                        Flow::Return(value) => value,
                        Flow::Next => self.null(),
                    })
                }
                None => self.call_native(this, resolved, args),
            };
            let result = result.map_err(|e| self.attach_trace(e));
            drop(guard);
            result
        })
    }

    fn enter(&self, resolved: Resolved<'_, Method>) -> EvalResult<FrameGuard<'_>> {
        // The push borrow must end before the trace is captured.
        let pushed = self.call_stack.borrow_mut().push(CallFrame {
            class: resolved.declaring,
            method: resolved.member.name.clone(),
        });
        pushed.map_err(|e| self.attach_trace(e))?;
        Ok(FrameGuard {
            stack: &self.call_stack,
        })
    }

    fn attach_trace(&self, error: EvalError) -> EvalError {
        error.with_trace_if_absent(|| self.call_stack.borrow().capture(&self.library))
    }

    fn call_native(
        &self,
        this: &ObjRef,
        resolved: Resolved<'_, Method>,
        args: &[ObjRef],
    ) -> EvalResult {
        let method = resolved.member;
        let declaring = &self.library.class(resolved.declaring).name;
        let Some(native) = self.builtins.lookup(declaring, &method.name) else {
            return Err(call_empty(this.class_name(), &method.name));
        };
        if native.requires_program && !self.has_program_context(this) {
            return Err(call_no_program(this.class_name(), &method.name));
        }
        if resolved.declaring == self.library.builtins().program && !this.ptr_eq(&self.program) {
            return Err(call_wrong_program(this.class_name(), &method.name));
        }
        tracing::trace!(declaring = %declaring, "native call");
        let call = NativeCall {
            interpreter: self,
            this,
            args,
            method,
            declaring: resolved.declaring,
        };
        Ok(native.call(&call)?.unwrap_or_else(|| self.null()))
    }
}
