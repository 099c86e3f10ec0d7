//! Statement and expression trees for method bodies.
//!
//! These are produced by an external parser and consumed as-is by the
//! evaluator. Bodies are plain owned trees: the library is immutable after
//! load, so there is nothing to gain from an arena here.

/// A method call `receiver.method(args...)`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallExpr {
    pub receiver: Box<Expr>,
    pub method: String,
    pub args: Vec<Expr>,
}

/// An expression.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// `this`, a local variable, or a class literal.
    Get { name: String },
    /// `receiver.method(args...)`.
    Call(CallExpr),
    /// `receiver.field`.
    GetField { receiver: Box<Expr>, field: String },
    /// `receiver is ClassName`.
    Is { receiver: Box<Expr>, class_name: String },
    /// Reference identity of two objects.
    Equals { left: Box<Expr>, right: Box<Expr> },
    /// String literal.
    Str(String),
    /// `eval(source)`, run in the caller's local scope.
    Eval(Box<Expr>),
}

impl Expr {
    /// Bare name reference.
    pub fn get(name: impl Into<String>) -> Self {
        Expr::Get { name: name.into() }
    }

    /// The `this` receiver.
    pub fn this() -> Self {
        Expr::get("this")
    }

    /// Method call expression.
    pub fn call(receiver: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call(CallExpr {
            receiver: Box::new(receiver),
            method: method.into(),
            args,
        })
    }

    /// Field read.
    pub fn field(receiver: Expr, field: impl Into<String>) -> Self {
        Expr::GetField {
            receiver: Box::new(receiver),
            field: field.into(),
        }
    }

    /// Ancestor-chain test.
    pub fn is(receiver: Expr, class_name: impl Into<String>) -> Self {
        Expr::Is {
            receiver: Box::new(receiver),
            class_name: class_name.into(),
        }
    }

    /// Reference equality.
    pub fn equals(left: Expr, right: Expr) -> Self {
        Expr::Equals {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// String literal.
    pub fn string(text: impl Into<String>) -> Self {
        Expr::Str(text.into())
    }

    /// `eval(source)`.
    pub fn eval(source: Expr) -> Self {
        Expr::Eval(Box::new(source))
    }
}

/// A statement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stmt {
    /// `name = value`.
    SetVar { name: String, value: Expr },
    /// `receiver.field = value`.
    SetField {
        receiver: Expr,
        field: String,
        value: Expr,
    },
    /// Call whose result is discarded.
    Call(CallExpr),
    /// `eval(source)` whose result is discarded.
    Eval(Expr),
    /// `return value`.
    Return(Expr),
    /// `if condition { body }`. There is no `else`.
    If { condition: Expr, body: Vec<Stmt> },
    /// `while condition { body }`.
    While { condition: Expr, body: Vec<Stmt> },
}

impl Stmt {
    /// Local variable assignment.
    pub fn set_var(name: impl Into<String>, value: Expr) -> Self {
        Stmt::SetVar {
            name: name.into(),
            value,
        }
    }

    /// Field assignment.
    pub fn set_field(receiver: Expr, field: impl Into<String>, value: Expr) -> Self {
        Stmt::SetField {
            receiver,
            field: field.into(),
            value,
        }
    }

    /// Call statement.
    pub fn call(receiver: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Stmt::Call(CallExpr {
            receiver: Box::new(receiver),
            method: method.into(),
            args,
        })
    }

    /// Return statement.
    pub fn ret(value: Expr) -> Self {
        Stmt::Return(value)
    }

    /// Conditional block.
    pub fn if_(condition: Expr, body: Vec<Stmt>) -> Self {
        Stmt::If { condition, body }
    }

    /// Loop.
    pub fn while_(condition: Expr, body: Vec<Stmt>) -> Self {
        Stmt::While { condition, body }
    }
}
