//! Fold regions for brace blocks.
//!
//! A matched `{ ... }` pair folds when its interior spans at least one
//! line break. Brackets and parentheses never fold.

use std::ops::Range;

use tm_lexer_core::{KeywordSet, Scanner, Tag, Token};

use crate::braces::match_braces;

/// Text shown in place of a folded block.
pub const PLACEHOLDER: &str = "{...}";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoldRegion {
    /// From the opening brace to just past the closing brace.
    pub span: Range<u32>,
    pub placeholder: &'static str,
    pub collapsed_by_default: bool,
}

/// Fold regions of `source`, ordered by start offset.
///
/// Nested blocks produce nested regions.
pub fn fold_regions(source: &str, keywords: &KeywordSet) -> Vec<FoldRegion> {
    let tokens: Vec<Token> = Scanner::new(source, keywords).collect();
    match_braces(&tokens)
        .pairs
        .into_iter()
        .filter_map(|(open, close)| {
            let (open, close) = (tokens[open], tokens[close]);
            if open.tag != Tag::LBrace {
                return None;
            }
            let interior = source.get(open.end as usize..close.start as usize)?;
            interior.contains('\n').then(|| FoldRegion {
                span: open.start..close.end,
                placeholder: PLACEHOLDER,
                collapsed_by_default: false,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests;
