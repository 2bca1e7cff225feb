use crate::{
    lang::source_buffer::{SourceBuffer, SourceLocation},
    runtime::error::{self, ScriptError},
};
use std::{
    fmt::{self, Debug, Display, Formatter},
    fs::read_to_string,
};

/// A token is a single unit of the language.  The language is flat and purely
/// postfix so a token is simply the spelling as it was found in the source
/// code along with the location where it began.
///
/// Classification of the spelling, as a word, a literal, or a variable name,
/// happens later at dispatch time.  No numeric parsing happens in the
/// tokenizer.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    /// Where in the source code the token was found.
    location: SourceLocation,

    /// The token's spelling, exactly as written.
    text: String,
}

/// A list of tokens found in the source code.
pub type TokenList = Vec<Token>;

impl Token {
    /// Create a new token from its location and spelling.
    pub fn new(location: SourceLocation, text: String) -> Token {
        Token { location, text }
    }

    /// Get the token's location in the original source text.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The token's spelling.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Make sure that the tokens are nicely printable for diagnostics.
impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Include the source location for debugging purposes.
impl Debug for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.text)
    }
}

/// The marker that introduces a line comment.  The comment runs from the
/// marker to the end of the line.
pub const COMMENT_MARKER: char = '\\';

/// Check if the given character is considered whitespace.
fn is_whitespace(next: &char) -> bool {
    *next == ' ' || *next == '\t' || *next == '\r' || *next == '\n'
}

/// Skip over whitespace in the text.  Stopping only at either the end of the
/// buffer or the next non-whitespace character.
fn skip_whitespace(buffer: &mut SourceBuffer) {
    while let Some(next) = buffer.peek_next() {
        if !is_whitespace(&next) {
            break;
        }

        let _ = buffer.next_char();
    }
}

/// Skip the rest of the current line.  Used to discard a line comment.  The
/// terminating new line is left in the buffer for the whitespace skipper.
fn skip_line(buffer: &mut SourceBuffer) {
    while let Some(next) = buffer.peek_next() {
        if next == '\n' {
            break;
        }

        let _ = buffer.next_char();
    }
}

/// Pull text out of the buffer until we hit either a whitespace character or
/// the start of a line comment.  Tokens can otherwise contain any character.
fn process_until_whitespace(buffer: &mut SourceBuffer) -> (SourceLocation, String) {
    let location = buffer.location().clone();
    let mut text = String::new();

    while let Some(next) = buffer.peek_next() {
        if is_whitespace(&next) || next == COMMENT_MARKER {
            break;
        }

        text.push(buffer.next_char().unwrap());
    }

    (location, text)
}

/// Tokenize source code from a string.  Line comments are stripped and the
/// remaining text is split into whitespace delimited tokens.
///
/// This is a pure function of the input text and it cannot fail.
pub fn tokenize_from_source(path: &str, source: &str) -> TokenList {
    let mut buffer = SourceBuffer::new(path, source);
    let mut token_list = TokenList::new();

    while let Some(next) = buffer.peek_next() {
        if is_whitespace(&next) {
            skip_whitespace(&mut buffer);
            continue;
        }

        if next == COMMENT_MARKER {
            skip_line(&mut buffer);
            continue;
        }

        let (location, text) = process_until_whitespace(&mut buffer);

        token_list.push(Token::new(location, text));
    }

    token_list
}

/// Load the code from a file and then tokenize it.  Reading the file is the
/// only thing that can fail here.
pub fn tokenize_from_file(path: &str) -> error::Result<TokenList> {
    match read_to_string(path) {
        Ok(source) => Ok(tokenize_from_source(path, &source)),
        Err(error) => ScriptError::new_as_result(
            None,
            format!("Could not read file {}: {}", path, error),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<String> {
        tokenize_from_source("<test>", source)
            .iter()
            .map(|token| token.text().to_string())
            .collect()
    }

    #[test]
    fn splits_on_any_whitespace() {
        assert_eq!(texts("1  2\t3\r\n4"), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn strips_line_comments() {
        let source = "1 2 \\ this is a comment\n+ \\ another\n.";
        assert_eq!(texts(source), vec!["1", "2", "+", "."]);
    }

    #[test]
    fn comment_ends_a_token() {
        // The marker does not need to be whitespace delimited.
        assert_eq!(texts("dup\\ trailing\nswap"), vec!["dup", "swap"]);
    }

    #[test]
    fn empty_source_yields_no_tokens() {
        assert!(texts("").is_empty());
        assert!(texts("   \n \\ only a comment\n").is_empty());
    }

    #[test]
    fn tokens_record_their_locations() {
        let tokens = tokenize_from_source("<test>", "1\n  dup");

        assert_eq!(tokens[0].location().line(), 1);
        assert_eq!(tokens[0].location().column(), 1);
        assert_eq!(tokens[1].location().line(), 2);
        assert_eq!(tokens[1].location().column(), 3);
    }
}
