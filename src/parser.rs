use crate::ast::{Atom, EscapeClass, RegexNode, RepeatKind, Sequence};
use crate::error::ParseError;

/// Parse a pattern (already stripped of its `^`/`$` anchors) into a sequence.
pub fn parse(pattern: &str) -> Result<Sequence, ParseError> {
    Parser::new(pattern).parse()
}

/// Parser for regular expressions.
///
/// The `Parser` struct holds the pattern and the current byte position.
/// Error offsets are byte offsets into the pattern.
pub struct Parser<'a> {
    pub pattern: &'a str,
    pub pos: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given pattern.
    pub fn new(pattern: &'a str) -> Self {
        Self { pattern, pos: 0 }
    }

    /// Peek at the next character in the pattern without advancing.
    fn peek(&self) -> Option<char> {
        self.pattern[self.pos..].chars().next()
    }

    /// Advance the parser by one character and return it.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Expect a specific character and advance if it matches.
    fn expect(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Entry point for parsing a whole pattern.
    ///
    /// Outside a group `|` and `)` have no special meaning.
    ///
    /// Example:
    /// - Pattern: `ab`  → [Literal('a'), Literal('b')]
    /// - Pattern: `a|b` → [Literal('a'), Literal('|'), Literal('b')]
    pub fn parse(&mut self) -> Result<Sequence, ParseError> {
        self.parse_seq(false)
    }

    /// Parse nodes until the end of the pattern or, inside a group, until
    /// a `|` or a `)`.
    ///
    /// Example:
    /// - Pattern: `a(b|c)d` → [Literal('a'), Group, Literal('d')]
    fn parse_seq(&mut self, in_group: bool) -> Result<Sequence, ParseError> {
        let mut nodes = Vec::new();
        while let Some(ch) = self.peek() {
            if in_group && (ch == ')' || ch == '|') {
                break;
            }
            nodes.push(self.parse_repeat(ch)?);
        }
        Ok(nodes)
    }

    /// Parse one atom and the `?` or `+` that may follow it.
    ///
    /// Example:
    /// - Pattern: `a?` → RegexNode { atom: Literal('a'), repeat: ZeroOrOne }
    /// - Pattern: `b+` → RegexNode { atom: Literal('b'), repeat: OneOrMore }
    /// - Pattern: `c`  → RegexNode { atom: Literal('c'), repeat: Once }
    fn parse_repeat(&mut self, ch: char) -> Result<RegexNode, ParseError> {
        let atom = self.parse_atom(ch)?;
        let repeat = if self.expect('?') {
            RepeatKind::ZeroOrOne
        } else if self.expect('+') {
            RepeatKind::OneOrMore
        } else {
            RepeatKind::Once
        };
        Ok(RegexNode::with_repeat(atom, repeat))
    }

    /// Parse the atom starting with `ch`, the character under the cursor.
    fn parse_atom(&mut self, ch: char) -> Result<Atom, ParseError> {
        let start = self.pos;
        self.pos += ch.len_utf8();
        match ch {
            '(' => self.parse_group(start),
            '[' => self.parse_char_class(start),
            '\\' => match self.advance() {
                Some('d') => Ok(Atom::Escape(EscapeClass::Digit)),
                Some('w') => Ok(Atom::Escape(EscapeClass::Word)),
                Some(c) => Err(ParseError::UnsupportedEscape(start, c)),
                None => Err(ParseError::DanglingEscape(start)),
            },
            '.' => Ok(Atom::Dot),
            c => Ok(Atom::Literal(c)),
        }
    }

    /// Parse a group body after its `(`, e.g. `(cat|dog)`.
    fn parse_group(&mut self, start: usize) -> Result<Atom, ParseError> {
        let mut alternatives = Vec::new();
        loop {
            alternatives.push(self.parse_seq(true)?);
            match self.advance() {
                Some('|') => continue,
                Some(')') => break,
                _ => return Err(ParseError::UnclosedGroup(start)),
            }
        }
        Ok(Atom::Group { alternatives })
    }

    /// Parse a character class after its `[`. The contents up to the next
    /// `]` are taken verbatim; a leading `^` negates the class.
    ///
    /// Examples:
    /// - Pattern: `[abc]`  → CharClass { chars: {'a','b','c'}, negated: false }
    /// - Pattern: `[^xyz]` → CharClass { chars: {'x','y','z'}, negated: true }
    fn parse_char_class(&mut self, start: usize) -> Result<Atom, ParseError> {
        let rest = &self.pattern[self.pos..];
        let Some(end) = rest.find(']') else {
            return Err(ParseError::UnclosedClass(start));
        };
        let body = &rest[..end];
        self.pos += end + 1;
        let (negated, members) = match body.strip_prefix('^') {
            Some(members) => (true, members),
            None => (false, body),
        };
        Ok(Atom::CharClass {
            chars: members.chars().collect(),
            negated,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn lit(c: char) -> RegexNode {
        RegexNode::new(Atom::Literal(c))
    }

    fn class(chars: &str, negated: bool) -> Atom {
        Atom::CharClass {
            chars: chars.chars().collect(),
            negated,
        }
    }

    #[test]
    fn parses_literals_dot_and_escapes() {
        assert_eq!(
            parse(r"a.\d\w").unwrap(),
            vec![
                lit('a'),
                RegexNode::new(Atom::Dot),
                RegexNode::new(Atom::Escape(EscapeClass::Digit)),
                RegexNode::new(Atom::Escape(EscapeClass::Word)),
            ]
        );
    }

    #[test]
    fn attaches_quantifiers_to_the_preceding_node() {
        assert_eq!(
            parse("ab?c+").unwrap(),
            vec![
                lit('a'),
                RegexNode::with_repeat(Atom::Literal('b'), RepeatKind::ZeroOrOne),
                RegexNode::with_repeat(Atom::Literal('c'), RepeatKind::OneOrMore),
            ]
        );
    }

    #[test]
    fn quantifier_without_a_node_is_a_literal() {
        assert_eq!(
            parse("+a+?").unwrap(),
            vec![
                lit('+'),
                RegexNode::with_repeat(Atom::Literal('a'), RepeatKind::OneOrMore),
                lit('?'),
            ]
        );
    }

    #[test]
    fn parses_character_classes() {
        assert_eq!(
            parse("[abc][^xyz]+").unwrap(),
            vec![
                RegexNode::new(class("abc", false)),
                RegexNode::with_repeat(class("xyz", true), RepeatKind::OneOrMore),
            ]
        );
    }

    #[test]
    fn class_contents_are_verbatim() {
        assert_eq!(
            parse(r"[\d(]").unwrap(),
            vec![RegexNode::new(class(r"\d(", false))]
        );
        assert_eq!(parse("[^]").unwrap(), vec![RegexNode::new(class("", true))]);
    }

    #[test]
    fn parses_groups_with_alternatives() {
        assert_eq!(
            parse("(cat|dog)s?").unwrap(),
            vec![
                RegexNode::new(Atom::Group {
                    alternatives: vec![
                        vec![lit('c'), lit('a'), lit('t')],
                        vec![lit('d'), lit('o'), lit('g')],
                    ],
                }),
                RegexNode::with_repeat(Atom::Literal('s'), RepeatKind::ZeroOrOne),
            ]
        );
    }

    #[test]
    fn parses_nested_and_empty_alternatives() {
        assert_eq!(
            parse("((a|)b)+").unwrap(),
            vec![RegexNode::with_repeat(
                Atom::Group {
                    alternatives: vec![vec![
                        RegexNode::new(Atom::Group {
                            alternatives: vec![vec![lit('a')], vec![]],
                        }),
                        lit('b'),
                    ]],
                },
                RepeatKind::OneOrMore,
            )]
        );
    }

    #[test]
    fn bar_and_paren_outside_a_group_are_literals() {
        assert_eq!(parse("a|b").unwrap(), vec![lit('a'), lit('|'), lit('b')]);
        assert_eq!(parse("a)b").unwrap(), vec![lit('a'), lit(')'), lit('b')]);
        assert_eq!(
            parse("(x)|+").unwrap(),
            vec![
                RegexNode::new(Atom::Group {
                    alternatives: vec![vec![lit('x')]],
                }),
                RegexNode::with_repeat(Atom::Literal('|'), RepeatKind::OneOrMore),
            ]
        );
    }

    #[test]
    fn empty_pattern_is_an_empty_sequence() {
        assert_eq!(parse("").unwrap(), vec![]);
    }

    #[test]
    fn reports_malformed_patterns() {
        assert_eq!(parse("ab[cd"), Err(ParseError::UnclosedClass(2)));
        assert_eq!(parse("x(a|b"), Err(ParseError::UnclosedGroup(1)));
        assert_eq!(parse("(a(b)"), Err(ParseError::UnclosedGroup(0)));
        assert_eq!(parse(r"a\q"), Err(ParseError::UnsupportedEscape(1, 'q')));
        assert_eq!(parse(r"ab\"), Err(ParseError::DanglingEscape(2)));
    }

    #[test]
    fn error_offset_matches_variant() {
        let err = parse("abc(").unwrap_err();
        assert_eq!(err.offset(), 3);
        assert_eq!(err.to_string(), "unterminated group at offset 3: missing ')'");
    }
}
