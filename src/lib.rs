pub mod ast;
pub mod cli;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod pattern;
pub mod search;

pub use error::ParseError;
pub use pattern::Pattern;

/// Compile `pattern` (anchors included) and test it against one line.
pub fn is_match(input: &str, pattern: &str) -> Result<bool, ParseError> {
    Ok(Pattern::new(pattern)?.is_match(input))
}
