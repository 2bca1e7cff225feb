use std::fmt::{self, Display, Formatter};

/// The location in the source code where a token was found.  This is carried
/// by every token and is used by the compiler backend for error reporting and
/// by the interpreter backend for its diagnostics.
///
/// This is a read-only structure.  Use the field accessor methods to get the
/// values.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// Either the path to the file or a description of the source code.  For
    /// example code handed to the library directly may use a tag like
    /// "\<test\>".
    path: String,

    /// The 1 based line number in the source code.
    line: usize,

    /// The 1 based column number in the source code.
    column: usize,
}

/// Used for error reporting to show where in the source code an error
/// originated.
impl Display for SourceLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.path, self.line, self.column)
    }
}

impl fmt::Debug for SourceLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl SourceLocation {
    /// Create a new SourceLocation at the start of the given source path.
    pub fn new_from_path(path: &str) -> Self {
        SourceLocation {
            path: path.to_owned(),
            line: 1,
            column: 1,
        }
    }

    /// Create a new SourceLocation with all of the needed information.
    pub fn new_from_info(path: &str, line: usize, column: usize) -> Self {
        SourceLocation {
            path: path.to_owned(),
            line,
            column,
        }
    }

    /// The path to the source code or a meaningful description of the source
    /// code.
    pub fn path(&self) -> &String {
        &self.path
    }

    /// The 1 based line number in the source code.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The 1 based column number in the source code.
    pub fn column(&self) -> usize {
        self.column
    }
}

/// A buffer for processing source code.  This is used by the tokenizer to
/// extract tokens from the source text.  The buffer acts as a forward only
/// iterator over the code.  As characters are consumed the location of the
/// cursor in that source is maintained, allowing the tokenizer to record
/// where each token began.
///
/// The SourceBuffer only holds a reference to the source code, the text is
/// not copied and is expected to outlive the buffer.
pub struct SourceBuffer<'a> {
    /// An iterator over the source code being processed.
    chars: std::str::Chars<'a>,

    /// The logical location of the cursor in the source code.
    location: SourceLocation,

    /// A one character lookahead, filled by peek_next and drained by
    /// next_char.
    current: Option<char>,
}

impl<'a> SourceBuffer<'a> {
    /// Create a new SourceBuffer with the path to, or meaningful tag for, the
    /// source code and the source code itself.
    pub fn new(path: &str, source: &'a str) -> Self {
        SourceBuffer {
            chars: source.chars(),
            location: SourceLocation::new_from_path(path),
            current: None,
        }
    }

    /// The location the cursor is at in the source code being processed.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// Take a peek at the next character in the source code without consuming
    /// it.
    pub fn peek_next(&mut self) -> Option<char> {
        match self.current {
            Some(_) => self.current,
            None => {
                let next = self.chars.next();

                self.current = next;
                next
            }
        }
    }

    /// Get and consume the next character in the source code.
    pub fn next_char(&mut self) -> Option<char> {
        let next = match self.current.take() {
            Some(current) => Some(current),
            None => self.chars.next(),
        };

        if let Some(next_char) = next {
            self.increment_location(next_char);
        }

        next
    }

    /// Advance the cursor location based on the consumed character.  Advance
    /// one column for regular characters.  Reset the column to 1 and
    /// increment the line for new line characters.
    fn increment_location(&mut self, next: char) {
        if next == '\n' {
            self.location.line += 1;
            self.location.column = 1;
        } else {
            self.location.column += 1;
        }
    }
}
