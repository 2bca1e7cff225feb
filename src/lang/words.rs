use lazy_static::lazy_static;
use std::collections::HashMap;

/// The closed set of words understood by the language.  Both backends
/// dispatch on this enumeration with an exhaustive match, so adding a word
/// here forces both backends to handle it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Word {
    /// Add the top two values.  `a b -- a+b`
    Add,

    /// Subtract the top value from the second.  `a b -- a-b`
    Sub,

    /// Multiply the top two values.  `a b -- a*b`
    Mul,

    /// Remainder of the second value divided by the top.  `a b -- a%b`
    Mod,

    /// Negate the top value.  `a -- -a`
    Neg,

    /// Duplicate the top value.  `a -- a a`
    Dup,

    /// Swap the top two values.  `a b -- b a`
    Swap,

    /// Discard the top value.  `a -- `
    Drop,

    /// Copy the second value over the top.  `a b -- a b a`
    Over,

    /// Discard the second value.  `a b -- b`
    Nip,

    /// Copy the top value under the second.  `a b -- b a b`
    Tuck,

    /// Declare a new variable.  Consumes the following token as the name.
    Variable,

    /// Store a value into a variable.  `value name -- `
    Store,

    /// Fetch a variable's value.  `name -- value`
    Fetch,

    /// Print and consume the top value.  `a -- `
    Dot,

    /// Print the entire stack without modifying it.  ` -- `
    DotS,
}

lazy_static! {
    /// The fixed mapping from token spelling to word.  Lookup only, the
    /// actual dispatch is a match on the Word enumeration.
    static ref WORD_TABLE: HashMap<&'static str, Word> = {
        let mut table = HashMap::new();

        table.insert("+", Word::Add);
        table.insert("-", Word::Sub);
        table.insert("*", Word::Mul);
        table.insert("mod", Word::Mod);
        table.insert("neg", Word::Neg);
        table.insert("dup", Word::Dup);
        table.insert("swap", Word::Swap);
        table.insert("drop", Word::Drop);
        table.insert("over", Word::Over);
        table.insert("nip", Word::Nip);
        table.insert("tuck", Word::Tuck);
        table.insert("variable", Word::Variable);
        table.insert("!", Word::Store);
        table.insert("@", Word::Fetch);
        table.insert(".", Word::Dot);
        table.insert(".s", Word::DotS);

        table
    };
}

impl Word {
    /// Look a word up by its spelling in the source code.  Returns None for
    /// anything that isn't one of the fixed primitives.
    pub fn from_name(name: &str) -> Option<Word> {
        WORD_TABLE.get(name).copied()
    }

    /// The word's spelling in the source code.
    pub fn name(&self) -> &'static str {
        match self {
            Word::Add => "+",
            Word::Sub => "-",
            Word::Mul => "*",
            Word::Mod => "mod",
            Word::Neg => "neg",
            Word::Dup => "dup",
            Word::Swap => "swap",
            Word::Drop => "drop",
            Word::Over => "over",
            Word::Nip => "nip",
            Word::Tuck => "tuck",
            Word::Variable => "variable",
            Word::Store => "!",
            Word::Fetch => "@",
            Word::Dot => ".",
            Word::DotS => ".s",
        }
    }

    /// The minimum stack depth the word needs before it can execute.  The
    /// interpreter checks this before every operation, the compiler does not
    /// and leaves underflow as undefined behavior of the generated program.
    pub fn min_depth(&self) -> usize {
        match self {
            Word::Add | Word::Sub | Word::Mul | Word::Mod => 2,
            Word::Swap | Word::Over | Word::Nip | Word::Tuck => 2,
            Word::Store => 2,

            Word::Neg | Word::Dup | Word::Drop | Word::Fetch | Word::Dot => 1,

            Word::Variable | Word::DotS => 0,
        }
    }
}

/// Attempt to read the token's spelling as a signed 32-bit integer literal.
/// Values are 32-bit in both backends because the compiled program runs with
/// dword stack cells.
pub fn parse_literal(text: &str) -> Option<i32> {
    text.parse::<i32>().ok()
}
