use crate::{
    lang::{
        source_buffer::SourceLocation,
        tokenizing::{self, Token, TokenList},
        words::{self, Word},
    },
    runtime::{error, value::Value},
};
use std::collections::HashMap;

/// The data stack of values managed by the interpreter.
pub type ValueStack = Vec<Value>;

/// The interpreter backend.  Executes each token's stack effect immediately
/// against a mutable runtime stack and variable store, printing output as a
/// side effect of the `.` and `.s` words.
///
/// Each instance owns its own stack and variable table, so repeated runs in
/// the same process cannot leak state into each other.
///
/// Errors here are recoverable.  A bad operation is reported to stderr, left
/// as a no-op, and execution continues with the next token.  Operations whose
/// minimum stack depth is not met are skipped silently.
pub struct ForthInterpreter {
    /// The data stack.  Grown and shrunk only by the words' stack effects.
    stack: ValueStack,

    /// The declared variables and their current values.  New variables start
    /// at zero.
    variables: HashMap<String, i32>,
}

impl Default for ForthInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl ForthInterpreter {
    /// Create a new interpreter with an empty stack and no variables.
    pub fn new() -> ForthInterpreter {
        ForthInterpreter {
            stack: ValueStack::new(),
            variables: HashMap::new(),
        }
    }

    /// Use to examine the full data stack, for example after a run has
    /// completed.
    pub fn stack(&self) -> &ValueStack {
        &self.stack
    }

    /// Push a value onto the data stack.  Useful for seeding a stack before
    /// processing source code.
    pub fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    /// Pop the top value from the data stack, if there is one.
    pub fn pop(&mut self) -> Option<Value> {
        self.stack.pop()
    }

    /// Look up a declared variable's current value.
    pub fn variable(&self, name: &str) -> Option<i32> {
        self.variables.get(name).copied()
    }

    /// Tokenize the given source code and execute it.
    pub fn process_source(&mut self, path: &str, source: &str) {
        let tokens = tokenizing::tokenize_from_source(path, source);
        self.run(&tokens);
    }

    /// Load a script from a file and execute it.  Reading the file is the
    /// only thing that can fail, everything else is reported and recovered.
    pub fn process_source_file(&mut self, path: &str) -> error::Result<()> {
        let tokens = tokenizing::tokenize_from_file(path)?;
        self.run(&tokens);

        Ok(())
    }

    /// Execute a token list from start to end.  The stream is consumed left
    /// to right exactly once, there is no backtracking.
    pub fn run(&mut self, tokens: &TokenList) {
        let mut index = 0;

        while index < tokens.len() {
            let token = &tokens[index];

            if let Some(word) = Word::from_name(token.text()) {
                if word == Word::Variable {
                    // The declaration consumes the following token as the new
                    // variable's name.
                    match tokens.get(index + 1) {
                        Some(name) => {
                            self.declare_variable(name);
                            index += 2;
                        }

                        None => {
                            self.report(
                                token.location(),
                                "Missing variable name after 'variable'",
                            );
                            index += 1;
                        }
                    }
                } else {
                    self.execute_word(token, word);
                    index += 1;
                }
            } else if let Some(number) = words::parse_literal(token.text()) {
                self.stack.push(Value::Int(number));
                index += 1;
            } else {
                // Not a word and not a number.  Declared or not, the token is
                // pushed as a symbolic name.  Store and fetch are the only
                // words that will check whether it names a real variable.
                self.stack.push(Value::Name(token.text().to_string()));
                index += 1;
            }
        }
    }

    /// Print the current stack contents without modifying them.  This is the
    /// same rendering the compiled program's stack dump produces, top of
    /// stack first.
    pub fn print_stack(&self) {
        print!("Stack: ");

        for value in self.stack.iter().rev() {
            print!("{} ", value);
        }

        println!();
    }

    /// Declare a new variable with an initial value of zero.  Redeclaring a
    /// name is reported but the first binding and its value are kept.
    fn declare_variable(&mut self, name: &Token) {
        if self.variables.contains_key(name.text()) {
            self.report(
                name.location(),
                &format!("Variable '{}' already exists", name.text()),
            );
            return;
        }

        self.variables.insert(name.text().to_string(), 0);
    }

    /// Apply a single word's stack effect.  If the stack is shallower than
    /// the word requires the operation is skipped silently and execution
    /// continues with the next token.
    fn execute_word(&mut self, token: &Token, word: Word) {
        if self.stack.len() < word.min_depth() {
            return;
        }

        match word {
            Word::Add => self.binary_op(token, |a, b| a.wrapping_add(b)),
            Word::Sub => self.binary_op(token, |a, b| a.wrapping_sub(b)),
            Word::Mul => self.binary_op(token, |a, b| a.wrapping_mul(b)),

            // Unlike the compiled code, the interpreter guards the zero
            // divisor and pushes 0 instead of trapping.
            Word::Mod => self.binary_op(token, |a, b| if b == 0 { 0 } else { a.wrapping_rem(b) }),

            Word::Neg => {
                if let Some(value) = self.top_int(token) {
                    let top = self.stack.len() - 1;
                    self.stack[top] = Value::Int(value.wrapping_neg());
                }
            }

            Word::Dup => {
                let top = self.stack.last().unwrap().clone();
                self.stack.push(top);
            }

            Word::Swap => {
                let len = self.stack.len();
                self.stack.swap(len - 1, len - 2);
            }

            Word::Drop => {
                let _ = self.stack.pop();
            }

            Word::Over => {
                let second = self.stack[self.stack.len() - 2].clone();
                self.stack.push(second);
            }

            Word::Nip => {
                let top = self.stack.pop().unwrap();
                let _ = self.stack.pop();
                self.stack.push(top);
            }

            Word::Tuck => {
                let top = self.stack.last().unwrap().clone();
                self.stack.insert(self.stack.len() - 2, top);
            }

            Word::Store => self.store(token),
            Word::Fetch => self.fetch(token),

            Word::Dot => {
                let value = self.stack.pop().unwrap();
                println!("{}", value);
            }

            Word::DotS => self.print_stack(),

            // Handled by the driver loop, it consumes the following token.
            Word::Variable => unreachable!("variable declarations are handled by run"),
        }
    }

    /// Apply a binary arithmetic word.  Consumes b then a off the top and
    /// pushes the result.  Both operands must be integers, a symbolic name is
    /// reported and the stack is left untouched.
    fn binary_op(&mut self, token: &Token, op: fn(i32, i32) -> i32) {
        let len = self.stack.len();

        let (a, b) = match (self.stack[len - 2].as_int(), self.stack[len - 1].as_int()) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                self.report(
                    token.location(),
                    &format!("'{}' expects integer operands", token.text()),
                );
                return;
            }
        };

        self.stack.truncate(len - 2);
        self.stack.push(Value::Int(op(a, b)));
    }

    /// Get the top of the stack as an integer, reporting a diagnostic if it
    /// is a symbolic name instead.
    fn top_int(&mut self, token: &Token) -> Option<i32> {
        match self.stack.last().and_then(|value| value.as_int()) {
            Some(value) => Some(value),
            None => {
                self.report(
                    token.location(),
                    &format!("'{}' expects an integer operand", token.text()),
                );
                None
            }
        }
    }

    /// The store word.  Consumes a variable name and a value and writes the
    /// value into the variable.  On any error nothing is consumed and nothing
    /// is written.
    fn store(&mut self, token: &Token) {
        let len = self.stack.len();

        let name = match self.stack[len - 1].as_name() {
            Some(name) => name.to_string(),
            None => {
                self.report(token.location(), "'!' expects a variable name on top");
                return;
            }
        };

        if !self.variables.contains_key(&name) {
            self.report(token.location(), &format!("Unknown variable '{}'", name));
            return;
        }

        let value = match self.stack[len - 2].as_int() {
            Some(value) => value,
            None => {
                self.report(token.location(), "'!' expects an integer value");
                return;
            }
        };

        self.stack.truncate(len - 2);
        self.variables.insert(name, value);
    }

    /// The fetch word.  Consumes a variable name and pushes the variable's
    /// current value.  On any error nothing is consumed and nothing is
    /// pushed.
    fn fetch(&mut self, token: &Token) {
        let name = match self.stack.last().unwrap().as_name() {
            Some(name) => name.to_string(),
            None => {
                self.report(token.location(), "'@' expects a variable name on top");
                return;
            }
        };

        let value = match self.variables.get(&name) {
            Some(value) => *value,
            None => {
                self.report(token.location(), &format!("Unknown variable '{}'", name));
                return;
            }
        };

        let _ = self.stack.pop();
        self.stack.push(Value::Int(value));
    }

    /// Report a recoverable error to the error stream and carry on.
    fn report(&self, location: &SourceLocation, message: &str) {
        eprintln!("{}: {}", location, message);
    }
}
