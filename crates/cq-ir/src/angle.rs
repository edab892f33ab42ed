//! Angle expressions for rotation gates.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::f64::consts::PI;
use std::fmt;

use crate::env::ClassicalEnv;

/// Builtin functions usable inside angle expressions.
///
/// This is the closed set the source language's constant evaluator
/// provides; anything else is a parse error upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleFn {
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Inverse sine.
    ArcSin,
    /// Inverse cosine.
    ArcCos,
    /// Exponential.
    Exp,
    /// Square root.
    Sqrt,
}

impl AngleFn {
    /// Apply the function to a concrete value.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            AngleFn::Sin => x.sin(),
            AngleFn::Cos => x.cos(),
            AngleFn::Tan => x.tan(),
            AngleFn::ArcSin => x.asin(),
            AngleFn::ArcCos => x.acos(),
            AngleFn::Exp => x.exp(),
            AngleFn::Sqrt => x.sqrt(),
        }
    }

    /// Get the surface-syntax name of this function.
    pub fn name(self) -> &'static str {
        match self {
            AngleFn::Sin => "sin",
            AngleFn::Cos => "cos",
            AngleFn::Tan => "tan",
            AngleFn::ArcSin => "arcsin",
            AngleFn::ArcCos => "arccos",
            AngleFn::Exp => "exp",
            AngleFn::Sqrt => "sqrt",
        }
    }
}

/// A symbolic or concrete angle expression.
///
/// Rotation gates carry one of these. The partial evaluator reduces every
/// angle to [`AngleExpr::Constant`] before a program reaches synthesis;
/// the symbolic variants exist so specialization can perform that
/// reduction itself when handed a not-yet-reduced gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AngleExpr {
    /// A constant numeric value, in radians.
    Constant(f64),
    /// The constant π.
    Pi,
    /// A classical variable reference.
    Var(String),
    /// Negation.
    Neg(Box<AngleExpr>),
    /// Addition.
    Add(Box<AngleExpr>, Box<AngleExpr>),
    /// Subtraction.
    Sub(Box<AngleExpr>, Box<AngleExpr>),
    /// Multiplication.
    Mul(Box<AngleExpr>, Box<AngleExpr>),
    /// Division.
    Div(Box<AngleExpr>, Box<AngleExpr>),
    /// Builtin function application.
    Call(AngleFn, Box<AngleExpr>),
}

impl AngleExpr {
    /// Create a constant angle.
    pub fn constant(value: f64) -> Self {
        AngleExpr::Constant(value)
    }

    /// Create a variable reference.
    pub fn var(name: impl Into<String>) -> Self {
        AngleExpr::Var(name.into())
    }

    /// Create a π constant.
    pub fn pi() -> Self {
        AngleExpr::Pi
    }

    /// Check if this expression contains any unresolved variables.
    pub fn is_symbolic(&self) -> bool {
        match self {
            AngleExpr::Var(_) => true,
            AngleExpr::Constant(_) | AngleExpr::Pi => false,
            AngleExpr::Neg(e) | AngleExpr::Call(_, e) => e.is_symbolic(),
            AngleExpr::Add(a, b)
            | AngleExpr::Sub(a, b)
            | AngleExpr::Mul(a, b)
            | AngleExpr::Div(a, b) => a.is_symbolic() || b.is_symbolic(),
        }
    }

    /// Try to evaluate as a concrete value without an environment.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AngleExpr::Constant(v) => Some(*v),
            AngleExpr::Pi => Some(PI),
            AngleExpr::Var(_) => None,
            AngleExpr::Neg(e) => e.as_f64().map(|v| -v),
            AngleExpr::Add(a, b) => Some(a.as_f64()? + b.as_f64()?),
            AngleExpr::Sub(a, b) => Some(a.as_f64()? - b.as_f64()?),
            AngleExpr::Mul(a, b) => Some(a.as_f64()? * b.as_f64()?),
            AngleExpr::Div(a, b) => {
                let divisor = b.as_f64()?;
                if divisor == 0.0 {
                    return None;
                }
                Some(a.as_f64()? / divisor)
            }
            AngleExpr::Call(f, e) => e.as_f64().map(|v| f.apply(v)),
        }
    }

    /// Evaluate under a classical environment.
    ///
    /// Variables are looked up through the scope stack; unbound variables
    /// and division by zero yield `None`.
    pub fn eval(&self, env: &ClassicalEnv) -> Option<f64> {
        match self {
            AngleExpr::Constant(v) => Some(*v),
            AngleExpr::Pi => Some(PI),
            AngleExpr::Var(name) => env.lookup_name(name).and_then(|v| v.as_f64()),
            AngleExpr::Neg(e) => e.eval(env).map(|v| -v),
            AngleExpr::Add(a, b) => Some(a.eval(env)? + b.eval(env)?),
            AngleExpr::Sub(a, b) => Some(a.eval(env)? - b.eval(env)?),
            AngleExpr::Mul(a, b) => Some(a.eval(env)? * b.eval(env)?),
            AngleExpr::Div(a, b) => {
                let divisor = b.eval(env)?;
                if divisor == 0.0 {
                    return None;
                }
                Some(a.eval(env)? / divisor)
            }
            AngleExpr::Call(f, e) => e.eval(env).map(|v| f.apply(v)),
        }
    }

    /// Get all variable names in this expression.
    pub fn variables(&self) -> HashSet<String> {
        let mut set = HashSet::new();
        self.collect_variables(&mut set);
        set
    }

    fn collect_variables(&self, set: &mut HashSet<String>) {
        match self {
            AngleExpr::Constant(_) | AngleExpr::Pi => {}
            AngleExpr::Var(name) => {
                set.insert(name.clone());
            }
            AngleExpr::Neg(e) | AngleExpr::Call(_, e) => e.collect_variables(set),
            AngleExpr::Add(a, b)
            | AngleExpr::Sub(a, b)
            | AngleExpr::Mul(a, b)
            | AngleExpr::Div(a, b) => {
                a.collect_variables(set);
                b.collect_variables(set);
            }
        }
    }

    /// Simplify the expression by folding constant subexpressions.
    pub fn simplify(&self) -> Self {
        if let Some(v) = self.as_f64() {
            return AngleExpr::Constant(v);
        }
        match self {
            AngleExpr::Neg(e) => AngleExpr::Neg(Box::new(e.simplify())),
            AngleExpr::Add(a, b) => AngleExpr::Add(Box::new(a.simplify()), Box::new(b.simplify())),
            AngleExpr::Sub(a, b) => AngleExpr::Sub(Box::new(a.simplify()), Box::new(b.simplify())),
            AngleExpr::Mul(a, b) => AngleExpr::Mul(Box::new(a.simplify()), Box::new(b.simplify())),
            AngleExpr::Div(a, b) => AngleExpr::Div(Box::new(a.simplify()), Box::new(b.simplify())),
            AngleExpr::Call(f, e) => AngleExpr::Call(*f, Box::new(e.simplify())),
            _ => self.clone(),
        }
    }
}

impl fmt::Display for AngleExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleExpr::Constant(v) => write!(f, "{v}"),
            AngleExpr::Pi => write!(f, "pi"),
            AngleExpr::Var(name) => write!(f, "{name}"),
            AngleExpr::Neg(e) => write!(f, "-({e})"),
            AngleExpr::Add(a, b) => write!(f, "({a} + {b})"),
            AngleExpr::Sub(a, b) => write!(f, "({a} - {b})"),
            AngleExpr::Mul(a, b) => write!(f, "({a} * {b})"),
            AngleExpr::Div(a, b) => write!(f, "({a} / {b})"),
            AngleExpr::Call(fun, e) => write!(f, "{}({e})", fun.name()),
        }
    }
}

impl From<f64> for AngleExpr {
    fn from(value: f64) -> Self {
        AngleExpr::Constant(value)
    }
}

impl std::ops::Add for AngleExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        AngleExpr::Add(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Sub for AngleExpr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        AngleExpr::Sub(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Mul for AngleExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        AngleExpr::Mul(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Div for AngleExpr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        AngleExpr::Div(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Neg for AngleExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        AngleExpr::Neg(Box::new(self))
    }
}
