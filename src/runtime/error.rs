use crate::lang::source_buffer::SourceLocation;
use std::{
    error::Error,
    fmt::{self, Debug, Display, Formatter},
};

pub type Result<T> = std::result::Result<T, ScriptError>;

/// Any error that occurs while processing a script.  In the compiler backend
/// these are fatal, the whole run is aborted and no partial output is
/// written.  The interpreter backend never raises these for language level
/// problems, it reports and carries on.
#[derive(Clone)]
pub struct ScriptError {
    /// The location in the source code the error occurred, if available.
    location: Option<SourceLocation>,

    /// The description of the error.
    error: String,
}

impl Error for ScriptError {}

/// Pretty print the ScriptError including the source location when one was
/// recorded.
impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}", location, self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

impl Debug for ScriptError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl ScriptError {
    /// Create a new ScriptError.
    pub fn new(location: Option<SourceLocation>, error: String) -> ScriptError {
        ScriptError { location, error }
    }

    /// Create a new ScriptError and wrap it in a Result::Err.
    pub fn new_as_result<T>(location: Option<SourceLocation>, error: String) -> Result<T> {
        Err(ScriptError::new(location, error))
    }

    /// If available, the location in the source code the error occurred.
    pub fn location(&self) -> &Option<SourceLocation> {
        &self.location
    }

    /// The description of the error.
    pub fn error(&self) -> &String {
        &self.error
    }
}

/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<std::io::Error> for ScriptError {
    fn from(error: std::io::Error) -> ScriptError {
        ScriptError::new(None, format!("I/O error: {}", error))
    }
}

/// A convenience function for creating a ScriptError at a known source
/// location and wrapping it in a Result::Err.
pub fn script_error<T>(location: &SourceLocation, message: String) -> Result<T> {
    ScriptError::new_as_result(Some(location.clone()), message)
}
