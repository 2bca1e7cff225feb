use std::fmt::{self, Debug, Display, Formatter};

/// A value on the interpreter's data stack.
///
/// The stack is not uniformly numeric.  Variable references and unrecognized
/// tokens are pushed as symbolic names, and only the store and fetch words
/// care about the difference.  The compiler backend has no equivalent, its
/// stack cells are always numeric dwords at runtime.
#[derive(Clone, PartialEq, Eq)]
pub enum Value {
    /// A 32-bit integer, matching the dword cells of the compiled program.
    Int(i32),

    /// A symbolic name, either a declared variable or an unknown token that
    /// was pushed as-is.
    Name(String),
}

impl Value {
    /// Get the integer value, or None for a symbolic name.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(value) => Some(*value),
            Value::Name(_) => None,
        }
    }

    /// Get the symbolic name, or None for an integer.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Value::Int(_) => None,
            Value::Name(name) => Some(name),
        }
    }
}

/// Print the value the way the output words render it.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Include the variant for debugging purposes.
impl Debug for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{} i", value),
            Value::Name(name) => write!(f, "{} n", name),
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Value {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(name: &str) -> Value {
        Value::Name(name.to_string())
    }
}
