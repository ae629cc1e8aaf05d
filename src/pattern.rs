use crate::ast::{RegexNode, Sequence};
use crate::error::ParseError;
use crate::matcher::match_sequence;
use crate::parser;

/// A compiled pattern: the parsed body plus the anchors stripped from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    ast: Sequence,
    anchored_start: bool,
    anchored_end: bool,
}

impl Pattern {
    /// Strip the top-level anchors from `source` and parse what remains.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let (body, anchored_start, anchored_end) = split_anchors(source);
        let ast = parser::parse(body)?;
        Ok(Self {
            ast,
            anchored_start,
            anchored_end,
        })
    }

    pub fn ast(&self) -> &[RegexNode] {
        &self.ast
    }

    pub fn anchored_start(&self) -> bool {
        self.anchored_start
    }

    pub fn anchored_end(&self) -> bool {
        self.anchored_end
    }

    pub fn is_match(&self, line: &str) -> bool {
        is_match(line, &self.ast, self.anchored_start, self.anchored_end)
    }
}

/// Split a raw pattern into its body and its `^`/`$` anchor flags.
///
/// Only a leading `^` and a trailing `$` are anchors; anywhere else they are
/// ordinary characters.
pub fn split_anchors(pattern: &str) -> (&str, bool, bool) {
    let (body, anchored_start) = match pattern.strip_prefix('^') {
        Some(rest) => (rest, true),
        None => (pattern, false),
    };
    match body.strip_suffix('$') {
        Some(rest) => (rest, anchored_start, true),
        None => (body, anchored_start, false),
    }
}

/// Decide whether `line` matches `ast`.
///
/// Anchored at the start, the sequence is tried once from offset 0; otherwise
/// every offset is tried in order and the first hit wins. Anchored at the end,
/// a match only counts if it consumes the rest of the line.
pub fn is_match(line: &str, ast: &[RegexNode], anchored_start: bool, anchored_end: bool) -> bool {
    let chars: Vec<char> = line.chars().collect();
    let accepts = |start: usize| {
        let suffix = &chars[start..];
        match match_sequence(ast, suffix, 0) {
            Some(end) => !anchored_end || end == suffix.len(),
            None => false,
        }
    };
    if anchored_start {
        accepts(0)
    } else {
        (0..=chars.len()).any(accepts)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn splits_anchors() {
        assert_eq!(split_anchors("^abc$"), ("abc", true, true));
        assert_eq!(split_anchors("^abc"), ("abc", true, false));
        assert_eq!(split_anchors("abc$"), ("abc", false, true));
        assert_eq!(split_anchors("a^b$c"), ("a^b$c", false, false));
        assert_eq!(split_anchors("^"), ("", true, false));
        assert_eq!(split_anchors("$"), ("", false, true));
        assert_eq!(split_anchors("^$"), ("", true, true));
    }

    #[test]
    fn start_anchor_tries_offset_zero_only() {
        let pattern = Pattern::new("^log").unwrap();
        assert!(pattern.is_match("logs"));
        assert!(!pattern.is_match("slog"));
    }

    #[test]
    fn end_anchor_requires_consuming_the_suffix() {
        let pattern = Pattern::new("dog$").unwrap();
        assert!(pattern.is_match("hotdog"));
        assert!(!pattern.is_match("dogs"));
    }

    #[test]
    fn end_anchor_retries_later_offsets() {
        // The first `a` matches `a+` without reaching the end, later ones do.
        let pattern = Pattern::new("a+b$").unwrap();
        assert!(pattern.is_match("ab ab"));
        assert!(!pattern.is_match("ab abc"));
    }

    #[test]
    fn both_anchors_need_the_whole_line() {
        let pattern = Pattern::new("^abc$").unwrap();
        assert!(pattern.is_match("abc"));
        assert!(!pattern.is_match("xabc"));
        assert!(!pattern.is_match("abcx"));
    }

    #[test]
    fn empty_patterns() {
        assert!(Pattern::new("").unwrap().is_match(""));
        assert!(Pattern::new("").unwrap().is_match("anything"));
        assert!(Pattern::new("^$").unwrap().is_match(""));
        assert!(!Pattern::new("^$").unwrap().is_match("x"));
        assert!(Pattern::new("$").unwrap().is_match("x"));
    }

    #[test]
    fn anchors_inside_the_body_are_literals() {
        let pattern = Pattern::new("a$b").unwrap();
        assert!(pattern.is_match("xa$by"));
        assert!(!pattern.is_match("ab"));
    }

    #[test]
    fn malformed_pattern_is_rejected() {
        assert_eq!(Pattern::new("^(ab$"), Err(ParseError::UnclosedGroup(0)));
    }

    #[test]
    fn exposes_parts() {
        let pattern = Pattern::new("^a").unwrap();
        assert!(pattern.anchored_start());
        assert!(!pattern.anchored_end());
        assert_eq!(pattern.ast().len(), 1);
    }
}
