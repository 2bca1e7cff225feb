/// Keep track of where in the source code tokens are found.
pub mod source_buffer;

/// Split raw source text into a flat list of tokens.
pub mod tokenizing;

/// The fixed set of words understood by both backends.
pub mod words;

/// The compiler backend.  Translates a token stream into 32-bit x86 assembly
/// text in NASM syntax.
pub mod codegen;
