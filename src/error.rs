use std::fmt;

use crate::location::SourceMap;

/// Which of the three disjoint error categories an [`Error`] belongs to.
///
/// `LexError` and `ParseError` report something wrong with the input;
/// `AssertionError` reports a broken builder invariant, which means this
/// crate has a bug rather than that the input was bad.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    LexError,
    ParseError,
    AssertionError,
}

/// An `Error` produced by the lexer or the parser.
///
/// Parsing aborts at the first error: there is no recovery, so a parse
/// either returns a complete tree or a single `Error`.
///
/// `Error` does not implement `Display`; [`Error::row_col`] resolves the
/// byte offset it carries into a 1-indexed `(row, col)` against the
/// source text, for a caller to format as it sees fit.
#[derive(PartialEq, Eq, Clone)]
pub struct Error {
    pub(crate) kind: ErrorKind,
    pub(crate) message: String,
    pub(crate) data: String,
    pub(crate) index: usize,
}

impl Error {
    pub(crate) fn lex<S: Into<String>>(message: S, data: String, index: usize) -> Self {
        Self {
            kind: ErrorKind::LexError,
            message: message.into(),
            data,
            index,
        }
    }

    pub(crate) fn parse<S: Into<String>>(message: S, data: String, index: usize) -> Self {
        Self {
            kind: ErrorKind::ParseError,
            message: message.into(),
            data,
            index,
        }
    }

    pub(crate) fn assertion<S: Into<String>>(message: S) -> Self {
        Self {
            kind: ErrorKind::AssertionError,
            message: message.into(),
            data: String::new(),
            index: 0,
        }
    }

    /// Which of the three error categories this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get a reference to the error's data. This is usually the token that
    /// was found to be lexically or syntactically incorrect.
    pub fn data(&self) -> &str {
        self.data.as_ref()
    }

    /// Get the error's byte index. This is where the error begins in a
    /// given input.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get a reference to the error's message.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Resolve this error's byte index into a 1-indexed `(row, col)`
    /// against `source`, the same source text that produced the error.
    pub fn row_col(&self, source: &str) -> (usize, usize) {
        SourceMap::new(source)
            .locate(self.index)
            .unwrap_or((1, 1))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.index;
        let end = self.index + self.data.len();

        if self.data == "EOF" {
            write!(
                f,
                "{:?}@{}:{} {:?} {}",
                self.kind, start, start, self.message, self.data
            )
        } else {
            write!(
                f,
                "{:?}@{}:{} {:?} {}",
                self.kind, start, end, self.message, self.data
            )
        }
    }
}
