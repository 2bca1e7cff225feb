/// Module for managing source code: tokenizing, the word set, and the
/// generation of x86 assembly text.
pub mod lang;

/// Module for the runtime: the error type, the value type, and the direct
/// interpreter.
pub mod runtime;
