//! Error types for OBO parsing operations

use std::fmt;
use std::io;
use std::path::PathBuf;

/// A grammar violation found while parsing OBO text.
///
/// Carries the absolute 1-based line of the offending text and, when the
/// fault lies inside an entity frame, the index of that frame within the
/// source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    message: String,
    line: usize,
    frame: Option<usize>,
}

impl SyntaxError {
    /// Create a syntax error with no position attached yet.
    ///
    /// Positions are filled in by the frame parser, which is the only
    /// layer that knows the absolute line a sub-parser was working on.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: 0,
            frame: None,
        }
    }

    /// Attach a 1-based line number, unless one is already set.
    pub fn at_line(mut self, line: usize) -> Self {
        if self.line == 0 {
            self.line = line;
        }
        self
    }

    /// Attach the index of the entity frame the error occurred in.
    pub fn in_frame(mut self, frame: usize) -> Self {
        if self.frame.is_none() {
            self.frame = Some(frame);
        }
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The 1-based source line of the fault, or 0 when unknown.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The index of the entity frame containing the fault, if any.
    pub fn frame(&self) -> Option<usize> {
        self.frame
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "syntax error at line {}: {}", self.line, self.message)?;
        } else {
            write!(f, "syntax error: {}", self.message)?;
        }
        if let Some(frame) = self.frame {
            write!(f, " (in frame {})", frame)?;
        }
        Ok(())
    }
}

impl std::error::Error for SyntaxError {}

/// Errors reported by the `load` / `loads` / `iter` entry points.
#[derive(Debug)]
pub enum Error {
    /// The requested thread count is negative; rejected before any I/O.
    InvalidThreadCount(i32),
    /// A path source does not exist, distinct from other I/O failures.
    NotFound(PathBuf),
    /// An I/O failure raised by the underlying source, passed through
    /// unwrapped so the caller's failure semantics are preserved.
    Io(io::Error),
    /// A grammar violation; fatal to the enclosing operation.
    Syntax(SyntaxError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidThreadCount(n) => {
                write!(f, "invalid thread count {}: must not be negative", n)
            }
            Error::NotFound(path) => write!(f, "source not found: {}", path.display()),
            Error::Io(e) => e.fmt(f),
            Error::Syntax(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Syntax(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SyntaxError> for Error {
    fn from(e: SyntaxError) -> Self {
        Error::Syntax(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

/// Result alias for fallible parser operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = SyntaxError::new("unexpected token").at_line(12).in_frame(3);
        assert_eq!(
            err.to_string(),
            "syntax error at line 12: unexpected token (in frame 3)"
        );
    }

    #[test]
    fn test_at_line_keeps_existing_position() {
        let err = SyntaxError::new("bad value").at_line(4).at_line(99);
        assert_eq!(err.line(), 4);
    }

    #[test]
    fn test_io_error_passes_through() {
        let inner = io::Error::new(io::ErrorKind::BrokenPipe, "stream gone");
        let err = Error::from(inner);
        match &err {
            Error::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::BrokenPipe);
                assert_eq!(e.to_string(), "stream gone");
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
