use crate::ast::{Atom, RegexNode, RepeatKind};

/// Align `seq` against `input` starting at `pos`.
///
/// Returns the position just past the consumed input, or `None` when no
/// alignment exists. The tail of the sequence is the continuation of its head,
/// so quantifiers backtrack by retrying the tail from shorter prefixes.
pub fn match_sequence(seq: &[RegexNode], input: &[char], pos: usize) -> Option<usize> {
    let Some((head, tail)) = seq.split_first() else {
        return Some(pos);
    };
    match head.repeat {
        RepeatKind::Once => {
            let next = match_atom(&head.atom, input, pos)?;
            match_sequence(tail, input, next)
        }
        RepeatKind::ZeroOrOne => match_atom(&head.atom, input, pos)
            .and_then(|next| match_sequence(tail, input, next))
            .or_else(|| match_sequence(tail, input, pos)),
        RepeatKind::OneOrMore => {
            let ends = repetitions(&head.atom, input, pos);
            ends.iter()
                .rev()
                .find_map(|&end| match_sequence(tail, input, end))
        }
    }
}

// Every end position reached by repeating `atom` greedily from `pos`, shortest
// first. A repetition that consumes nothing ends the loop and does not count.
fn repetitions(atom: &Atom, input: &[char], pos: usize) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut current = pos;
    while let Some(next) = match_atom(atom, input, current) {
        if next == current {
            break;
        }
        ends.push(next);
        current = next;
    }
    ends
}

/// Match a single atom at `pos`, ignoring its quantifier.
pub fn match_atom(atom: &Atom, input: &[char], pos: usize) -> Option<usize> {
    match atom {
        // The first alternative that matches wins; later ones are never retried.
        Atom::Group { alternatives } => alternatives
            .iter()
            .find_map(|alt| match_sequence(alt, input, pos)),
        _ => {
            let c = *input.get(pos)?;
            matches_char(atom, c).then_some(pos + 1)
        }
    }
}

fn matches_char(atom: &Atom, c: char) -> bool {
    match atom {
        Atom::Literal(expected) => *expected == c,
        Atom::Dot => true,
        Atom::Escape(class) => class.matches(c),
        Atom::CharClass { chars, negated } => chars.contains(&c) != *negated,
        Atom::Group { .. } => false,
    }
}
