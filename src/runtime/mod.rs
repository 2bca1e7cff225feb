/// The error type shared by both backends.
pub mod error;

/// The values that can live on the interpreter's data stack.
pub mod value;

/// The interpreter backend.  Executes tokens immediately against an in-memory
/// stack and variable table.
pub mod interpreter;
