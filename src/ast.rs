use std::collections::BTreeSet;

/// An ordered list of nodes: the top-level pattern or one group alternative.
pub type Sequence = Vec<RegexNode>;

/// One pattern element together with the postfix quantifier that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexNode {
    pub atom: Atom,
    pub repeat: RepeatKind,
}

impl RegexNode {
    pub fn new(atom: Atom) -> Self {
        Self {
            atom,
            repeat: RepeatKind::Once,
        }
    }

    pub fn with_repeat(atom: Atom, repeat: RepeatKind) -> Self {
        Self { atom, repeat }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    Literal(char),
    Dot,
    Escape(EscapeClass),
    CharClass {
        chars: BTreeSet<char>,
        negated: bool,
    },
    Group {
        alternatives: Vec<Sequence>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeClass {
    /// `\d`: ASCII `0`-`9`.
    Digit,
    /// `\w`: ASCII letters, digits and `_`.
    Word,
}

impl EscapeClass {
    pub fn matches(self, c: char) -> bool {
        match self {
            EscapeClass::Digit => c.is_ascii_digit(),
            EscapeClass::Word => c.is_ascii_alphanumeric() || c == '_',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatKind {
    Once,
    ZeroOrOne,
    OneOrMore,
}
