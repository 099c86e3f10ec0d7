//! Error taxonomy for the evaluator.
//!
//! Every error is fatal to the running program: the language has no way to
//! catch one, so an `EvalError` unwinds the whole `run` and is handed to the
//! embedder. Factory functions are the only way the evaluator builds errors;
//! they populate `kind`, and the message comes from its `Display` impl.

use std::fmt;

use crate::object::ObjRef;

/// Result of evaluation.
pub type EvalResult<T = ObjRef> = Result<T, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("cannot run program '{library}': no program class found")]
    ProgramNotFound { library: String },

    #[error("cannot get '{name}': no such variable or class")]
    NameNotFound { name: String },

    #[error("cannot call method '{method}' on an object of class '{class}': class doesn't define such method")]
    CallUndefined { class: String, method: String },

    #[error("cannot call method '{method}' on an object of class '{class}': method's body is empty (unoverridden abstract method?)")]
    CallEmpty { class: String, method: String },

    #[error(
        "cannot call method '{method}' on an object of class '{class}': wrong arg count, expected {} ({}), got {got}",
        .params.len(),
        .params.join(",")
    )]
    CallWrongArgc {
        class: String,
        method: String,
        params: Vec<String>,
        got: usize,
    },

    #[error("cannot call method '{method}' on an object of class '{class}': the 'program' field of the object is not set to the instance of the currently running program")]
    CallNoProgram { class: String, method: String },

    #[error("cannot call method '{method}' on an object of class '{class}': the object isn't the currently running program")]
    CallWrongProgram { class: String, method: String },

    #[error("cannot call method '{method}' on an object of class '{class}': one of the arguments (or the object on which the call was performed) is not valid for that method")]
    CallInvalidArgument { class: String, method: String },

    #[error("cannot set '{field}' field of an object of class '{class}': no such field")]
    FieldUndefined { class: String, field: String },

    #[error("cannot check if '{object}' is '{class_name}': no such class")]
    Is { object: String, class_name: String },

    #[error("cannot instantiate an object of '{class}' class: the class is abstract")]
    Abstract { class: String },

    #[error("exception: {message}")]
    UserException { message: String },

    #[error("maximum call depth exceeded (limit: {depth})")]
    StackOverflow { depth: usize },

    #[error("cannot eval source: {message}")]
    Parse { message: String },
}

/// Snapshot of the interpreted call stack at an error site, innermost call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallTrace {
    frames: Vec<String>,
}

impl CallTrace {
    pub fn new(frames: Vec<String>) -> Self {
        Self { frames }
    }

    /// `Class.method` entries, innermost first.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for CallTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {frame}")?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Call stack where the error was raised, when raised inside a method.
    pub trace: Option<CallTrace>,
}

impl EvalError {
    #[cold]
    fn from_kind(kind: EvalErrorKind) -> Self {
        Self { kind, trace: None }
    }

    /// Attach a call trace unless one was already captured closer to the error site.
    #[must_use]
    pub fn with_trace_if_absent(mut self, trace: impl FnOnce() -> CallTrace) -> Self {
        if self.trace.is_none() {
            self.trace = Some(trace());
        }
        self
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::from_kind(kind)
    }
}

#[cold]
pub fn program_not_found(library: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ProgramNotFound {
        library: library.to_string(),
    })
}

#[cold]
pub fn name_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NameNotFound {
        name: name.to_string(),
    })
}

#[cold]
pub fn call_undefined(class: &str, method: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CallUndefined {
        class: class.to_string(),
        method: method.to_string(),
    })
}

#[cold]
pub fn call_empty(class: &str, method: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CallEmpty {
        class: class.to_string(),
        method: method.to_string(),
    })
}

#[cold]
pub fn call_wrong_argc(class: &str, method: &str, params: &[String], got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CallWrongArgc {
        class: class.to_string(),
        method: method.to_string(),
        params: params.to_vec(),
        got,
    })
}

#[cold]
pub fn call_no_program(class: &str, method: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CallNoProgram {
        class: class.to_string(),
        method: method.to_string(),
    })
}

#[cold]
pub fn call_wrong_program(class: &str, method: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CallWrongProgram {
        class: class.to_string(),
        method: method.to_string(),
    })
}

#[cold]
pub fn call_invalid_argument(class: &str, method: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CallInvalidArgument {
        class: class.to_string(),
        method: method.to_string(),
    })
}

#[cold]
pub fn field_undefined(class: &str, field: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::FieldUndefined {
        class: class.to_string(),
        field: field.to_string(),
    })
}

/// `is` check against a class name the library doesn't define.
#[cold]
pub fn unknown_is_class(object: &ObjRef, class_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Is {
        object: object.to_string(),
        class_name: class_name.to_string(),
    })
}

#[cold]
pub fn abstract_class(class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Abstract {
        class: class.to_string(),
    })
}

#[cold]
pub fn user_exception(message: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UserException {
        message: message.to_string(),
    })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

#[cold]
pub fn parse_error(message: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Parse {
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests;
