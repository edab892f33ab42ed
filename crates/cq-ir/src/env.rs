//! Classical environment consumed by specialization.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A classical l-value: a scalar variable or one element of an array.
///
/// Guards on conditional gate updates are l-values, as are the variable
/// references inside angle expressions. The rendered form (`name` or
/// `name[i]`) is also the key the environment is indexed by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lval {
    /// Variable name.
    pub name: String,
    /// Array element index, if any.
    pub index: Option<u32>,
}

impl Lval {
    /// Create a scalar l-value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
        }
    }

    /// Create an array-element l-value.
    pub fn indexed(name: impl Into<String>, index: u32) -> Self {
        Self {
            name: name.into(),
            index: Some(index),
        }
    }

    /// The environment key for this l-value.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Lval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}[{}]", self.name, i),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A statically-known classical value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClassicalValue {
    /// A classical bit.
    Bit(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
}

impl ClassicalValue {
    /// Truthiness of the value (nonzero is true).
    pub fn as_bool(&self) -> bool {
        match self {
            ClassicalValue::Bit(b) => *b,
            ClassicalValue::Int(i) => *i != 0,
            ClassicalValue::Float(v) => *v != 0.0,
        }
    }

    /// Numeric view of the value.
    ///
    /// i64 → f64 is lossy above 2^53; classical scalars in CQ programs
    /// stay far below that.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ClassicalValue::Bit(b) => Some(if *b { 1.0 } else { 0.0 }),
            ClassicalValue::Int(i) => Some(*i as f64),
            ClassicalValue::Float(v) => Some(*v),
        }
    }
}

/// An ordered stack of classical variable scopes.
///
/// Scopes are searched innermost-first, so a binding in a nested block
/// shadows an outer one. The synthesis backend never mutates an
/// environment it is handed; it performs lookups only. The mutating
/// helpers exist for the owning partial evaluator and for tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassicalEnv {
    scopes: Vec<FxHashMap<String, ClassicalValue>>,
}

impl ClassicalEnv {
    /// Create an environment with one empty scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![FxHashMap::default()],
        }
    }

    /// Push a fresh innermost scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Pop the innermost scope. The outermost scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Bind a name in the innermost scope.
    pub fn bind(&mut self, name: impl Into<String>, value: ClassicalValue) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), value);
        }
    }

    /// Look up an l-value through the scope stack, innermost first.
    pub fn lookup(&self, lval: &Lval) -> Option<&ClassicalValue> {
        self.lookup_name(&lval.key())
    }

    /// Look up a raw key through the scope stack, innermost first.
    pub fn lookup_name(&self, name: &str) -> Option<&ClassicalValue> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Check whether an l-value is statically known.
    pub fn is_static(&self, lval: &Lval) -> bool {
        self.lookup(lval).is_some()
    }

    /// Number of scopes currently on the stack.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lval_key() {
        assert_eq!(Lval::new("c").key(), "c");
        assert_eq!(Lval::indexed("c", 2).key(), "c[2]");
    }

    #[test]
    fn test_truthiness() {
        assert!(ClassicalValue::Bit(true).as_bool());
        assert!(!ClassicalValue::Int(0).as_bool());
        assert!(ClassicalValue::Float(0.5).as_bool());
    }

    #[test]
    fn test_reverse_scope_lookup() {
        let mut env = ClassicalEnv::new();
        env.bind("c", ClassicalValue::Int(1));
        env.push_scope();
        env.bind("c", ClassicalValue::Int(0));

        let c = Lval::new("c");
        assert_eq!(env.lookup(&c), Some(&ClassicalValue::Int(0)));

        env.pop_scope();
        assert_eq!(env.lookup(&c), Some(&ClassicalValue::Int(1)));
        assert!(!env.is_static(&Lval::new("missing")));
    }

    #[test]
    fn test_outermost_scope_survives() {
        let mut env = ClassicalEnv::new();
        env.pop_scope();
        assert_eq!(env.depth(), 1);
    }
}
