//! Errors raised while reading Go source.

use thiserror::Error;

use crate::token::Token;

/// A lexical or structural error in Go source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {message}")]
pub struct SyntaxError {
    /// 1-based line of the offending position.
    pub line: usize,
    /// 1-based column of the offending position.
    pub column: usize,
    /// Byte offset of the offending position.
    pub offset: usize,
    pub message: String,
}

impl SyntaxError {
    pub fn new(line: usize, column: usize, offset: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            offset,
            message: message.into(),
        }
    }

    /// Create an error located at the start of `token`.
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        Self::new(token.line, token.column, token.offset, message)
    }
}
