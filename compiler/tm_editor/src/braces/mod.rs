//! Paired delimiters and brace matching.
//!
//! Braces, brackets and parentheses are three independent pair kinds: a
//! closer only ever matches an opener of its own kind. Only braces are
//! structural, meaning an editor may insert the closing brace for them.

use tm_lexer_core::{Tag, Token};

/// An opening and closing tag that belong together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BracePair {
    pub open: Tag,
    pub close: Tag,
    /// Block delimiter eligible for automatic closing.
    pub structural: bool,
}

/// Every delimiter pair, braces first.
pub const PAIRS: [BracePair; 3] = [
    BracePair {
        open: Tag::LBrace,
        close: Tag::RBrace,
        structural: true,
    },
    BracePair {
        open: Tag::LBrack,
        close: Tag::RBrack,
        structural: false,
    },
    BracePair {
        open: Tag::LParen,
        close: Tag::RParen,
        structural: false,
    },
];

impl BracePair {
    /// The pair whose opener or closer is `tag`.
    pub fn for_tag(tag: Tag) -> Option<&'static BracePair> {
        PAIRS.iter().find(|pair| pair.open == tag || pair.close == tag)
    }
}

/// Whether a matching closer may be inserted after `_open` when the next
/// token is `_context`. Always allowed.
pub fn pair_allowed_before(_open: Tag, _context: Option<Tag>) -> bool {
    true
}

/// Start offset of the construct owning the brace at `opening_brace_offset`.
///
/// Without a parse tree the construct starts at the brace itself.
pub fn code_construct_start(opening_brace_offset: u32) -> u32 {
    opening_brace_offset
}

/// Result of [`match_braces`]. All values are indices into the token slice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BraceMatch {
    /// `(opener, closer)` index pairs, ordered by opener.
    pub pairs: Vec<(usize, usize)>,
    /// Openers without a closer, in source order.
    pub unmatched_open: Vec<usize>,
    /// Closers without an opener, in source order.
    pub unmatched_close: Vec<usize>,
}

impl BraceMatch {
    /// The index of the token paired with the delimiter at `index`.
    pub fn partner(&self, index: usize) -> Option<usize> {
        self.pairs.iter().find_map(|&(open, close)| {
            if open == index {
                Some(close)
            } else if close == index {
                Some(open)
            } else {
                None
            }
        })
    }

    /// `true` when every delimiter found a partner.
    pub fn is_balanced(&self) -> bool {
        self.unmatched_open.is_empty() && self.unmatched_close.is_empty()
    }
}

/// Match delimiters in a token sequence.
///
/// A closer pairs with the innermost open delimiter of its kind. Openers of
/// other kinds nested inside that pair are left unmatched; a closer with no
/// open delimiter of its kind is unmatched and leaves the stack alone.
pub fn match_braces(tokens: &[Token]) -> BraceMatch {
    let mut result = BraceMatch::default();
    let mut stack: Vec<usize> = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        let Some(pair) = BracePair::for_tag(token.tag) else {
            continue;
        };
        if token.tag == pair.open {
            stack.push(index);
            continue;
        }
        let opener = stack
            .iter()
            .rposition(|&open| tokens[open].tag == pair.open);
        match opener {
            Some(depth) => {
                result.unmatched_open.extend(stack.drain(depth + 1..));
                if let Some(open) = stack.pop() {
                    result.pairs.push((open, index));
                }
            }
            None => result.unmatched_close.push(index),
        }
    }

    result.unmatched_open.extend(stack);
    result.pairs.sort_unstable();
    result.unmatched_open.sort_unstable();
    result
}
