use thiserror::Error;

/// Errors raised while compiling a pattern. Each variant carries the
/// byte offset of the construct that failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unterminated character class at offset {0}: missing ']'")]
    UnclosedClass(usize),
    #[error("unterminated group at offset {0}: missing ')'")]
    UnclosedGroup(usize),
    #[error("unsupported escape sequence '\\{1}' at offset {0}")]
    UnsupportedEscape(usize, char),
    #[error("pattern ends with a lone '\\' at offset {0}")]
    DanglingEscape(usize),
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match *self {
            ParseError::UnclosedClass(offset) => offset,
            ParseError::UnclosedGroup(offset) => offset,
            ParseError::UnsupportedEscape(offset, _) => offset,
            ParseError::DanglingEscape(offset) => offset,
        }
    }
}
