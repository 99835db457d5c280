//! Syntax highlighting keys.
//!
//! Each highlighted tag maps to one [`HighlightKey`]. A key has a stable
//! external name (`TERRAMATE_KEYWORD`, ...) that color schemes refer to, and
//! a fallback class it inherits from when a scheme does not define it.
//! Whitespace, identifiers and the end sentinel have no key.

use std::fmt;
use std::ops::Range;

use tm_lexer_core::{KeywordSet, Scanner, Tag};

/// Highlighting category of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HighlightKey {
    Comment,
    String,
    Number,
    Keyword,
    Operator,
    Braces,
    Brackets,
    Parens,
    BadCharacter,
}

impl HighlightKey {
    pub const ALL: [HighlightKey; 9] = [
        HighlightKey::Comment,
        HighlightKey::String,
        HighlightKey::Number,
        HighlightKey::Keyword,
        HighlightKey::Operator,
        HighlightKey::Braces,
        HighlightKey::Brackets,
        HighlightKey::Parens,
        HighlightKey::BadCharacter,
    ];

    /// Key for a token tag, or `None` for tags rendered in the default style.
    ///
    /// Both comment tags share [`HighlightKey::Comment`].
    pub const fn for_tag(tag: Tag) -> Option<HighlightKey> {
        match tag {
            Tag::LineComment | Tag::BlockComment => Some(HighlightKey::Comment),
            Tag::String => Some(HighlightKey::String),
            Tag::Number => Some(HighlightKey::Number),
            Tag::Keyword => Some(HighlightKey::Keyword),
            Tag::Operator => Some(HighlightKey::Operator),
            Tag::LBrace | Tag::RBrace => Some(HighlightKey::Braces),
            Tag::LBrack | Tag::RBrack => Some(HighlightKey::Brackets),
            Tag::LParen | Tag::RParen => Some(HighlightKey::Parens),
            Tag::BadCharacter => Some(HighlightKey::BadCharacter),
            Tag::Identifier | Tag::Whitespace | Tag::Eof => None,
        }
    }

    /// Name color schemes use to style this key.
    pub const fn external_name(self) -> &'static str {
        match self {
            HighlightKey::Comment => "TERRAMATE_COMMENT",
            HighlightKey::String => "TERRAMATE_STRING",
            HighlightKey::Number => "TERRAMATE_NUMBER",
            HighlightKey::Keyword => "TERRAMATE_KEYWORD",
            HighlightKey::Operator => "TERRAMATE_OPERATOR",
            HighlightKey::Braces => "TERRAMATE_BRACES",
            HighlightKey::Brackets => "TERRAMATE_BRACKETS",
            HighlightKey::Parens => "TERRAMATE_PARENS",
            HighlightKey::BadCharacter => "TERRAMATE_BAD_CHARACTER",
        }
    }

    /// Generic class this key falls back to.
    pub const fn fallback(self) -> &'static str {
        match self {
            HighlightKey::Comment => "LINE_COMMENT",
            HighlightKey::String => "STRING",
            HighlightKey::Number => "NUMBER",
            HighlightKey::Keyword => "KEYWORD",
            HighlightKey::Operator => "OPERATION_SIGN",
            HighlightKey::Braces => "BRACES",
            HighlightKey::Brackets => "BRACKETS",
            HighlightKey::Parens => "PARENTHESES",
            HighlightKey::BadCharacter => "BAD_CHARACTER",
        }
    }
}

impl fmt::Display for HighlightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.external_name())
    }
}

/// A highlighted span of source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightRun {
    pub key: HighlightKey,
    pub span: Range<u32>,
}

/// Highlight runs for the whole of `source`, in source order.
///
/// One run per highlighted token; unstyled tokens produce no run, so runs
/// may leave gaps but never overlap.
pub fn highlight(source: &str, keywords: &KeywordSet) -> Vec<HighlightRun> {
    Scanner::new(source, keywords)
        .filter_map(|tok| {
            HighlightKey::for_tag(tok.tag).map(|key| HighlightRun {
                key,
                span: tok.start..tok.end,
            })
        })
        .collect()
}
