//! Token categories and the token value type.
//!
//! [`Tag`] is a closed, `#[repr(u8)]` enumeration: every byte of a scan
//! window belongs to exactly one token, and every token has exactly one tag.
//! Discriminants are grouped by kind and kept below 32 so that tag sets fit
//! in a `u32` bitset.

use std::fmt;
use std::ops::Range;

/// Token category.
///
/// Discriminant ranges:
/// - `0..=7`: names and literals
/// - `8..=15`: operators
/// - `16..=23`: delimiters
/// - `24..=29`: trivia
/// - `30`: error
/// - `31`: end-of-input sentinel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Tag {
    // === Names & Literals ===
    /// Identifier not found in the keyword set (`foo`, `x-y`).
    Identifier = 0,
    /// Identifier found in the keyword set (`stack`, `true`).
    Keyword = 1,
    /// Double-quoted string, possibly unterminated.
    String = 2,
    /// Numeric literal, accepted loosely (`1.2.3`, `1e`).
    Number = 3,

    // === Operators ===
    /// Any operator: one character, a merged pair (`==`), or `...`.
    Operator = 8,

    // === Delimiters ===
    /// `{`
    LBrace = 16,
    /// `}`
    RBrace = 17,
    /// `[`
    LBrack = 18,
    /// `]`
    RBrack = 19,
    /// `(`
    LParen = 20,
    /// `)`
    RParen = 21,

    // === Trivia ===
    /// Run of whitespace characters, newlines included.
    Whitespace = 24,
    /// `# ...` or `// ...` up to (not including) the newline.
    LineComment = 25,
    /// `/* ... */`, possibly unterminated.
    BlockComment = 26,

    // === Errors ===
    /// A single character that starts no token.
    BadCharacter = 30,

    // === Control ===
    /// End of the scan window. Always zero-width.
    Eof = 31,
}

impl Tag {
    /// Every tag, in discriminant order.
    pub const ALL: [Tag; 16] = [
        Tag::Identifier,
        Tag::Keyword,
        Tag::String,
        Tag::Number,
        Tag::Operator,
        Tag::LBrace,
        Tag::RBrace,
        Tag::LBrack,
        Tag::RBrack,
        Tag::LParen,
        Tag::RParen,
        Tag::Whitespace,
        Tag::LineComment,
        Tag::BlockComment,
        Tag::BadCharacter,
        Tag::Eof,
    ];

    /// Stable, upper-case name consumed by highlighting and tooling output.
    pub const fn name(self) -> &'static str {
        match self {
            Tag::Identifier => "IDENTIFIER",
            Tag::Keyword => "KEYWORD",
            Tag::String => "STRING",
            Tag::Number => "NUMBER",
            Tag::Operator => "OPERATOR",
            Tag::LBrace => "LBRACE",
            Tag::RBrace => "RBRACE",
            Tag::LBrack => "LBRACK",
            Tag::RBrack => "RBRACK",
            Tag::LParen => "LPAREN",
            Tag::RParen => "RPAREN",
            Tag::Whitespace => "WHITESPACE",
            Tag::LineComment => "LINE_COMMENT",
            Tag::BlockComment => "BLOCK_COMMENT",
            Tag::BadCharacter => "BAD_CHARACTER",
            Tag::Eof => "EOF",
        }
    }

    /// Fixed source text for tags that always have the same lexeme.
    pub const fn lexeme(self) -> Option<&'static str> {
        match self {
            Tag::LBrace => Some("{"),
            Tag::RBrace => Some("}"),
            Tag::LBrack => Some("["),
            Tag::RBrack => Some("]"),
            Tag::LParen => Some("("),
            Tag::RParen => Some(")"),
            _ => None,
        }
    }

    /// Whitespace and comments.
    pub const fn is_trivia(self) -> bool {
        matches!(self, Tag::Whitespace | Tag::LineComment | Tag::BlockComment)
    }

    pub const fn is_comment(self) -> bool {
        matches!(self, Tag::LineComment | Tag::BlockComment)
    }

    /// Opening delimiter: `{`, `[` or `(`.
    pub const fn is_open_delimiter(self) -> bool {
        matches!(self, Tag::LBrace | Tag::LBrack | Tag::LParen)
    }

    /// Closing delimiter: `}`, `]` or `)`.
    pub const fn is_close_delimiter(self) -> bool {
        matches!(self, Tag::RBrace | Tag::RBrack | Tag::RParen)
    }

    /// Bit index for bitset membership (`0..32`).
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A categorised span `[start, end)` of byte offsets into the source buffer.
///
/// Tokens are plain values: the scanner recomputes them on every step and
/// never holds on to one after it has been surfaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub tag: Tag,
    pub start: u32,
    pub end: u32,
}

/// Size assertion: 1-byte tag + two u32 offsets, padded to 12 bytes.
const _: () = assert!(std::mem::size_of::<Token>() == 12);

impl Token {
    #[inline]
    pub const fn new(tag: Tag, start: u32, end: u32) -> Self {
        Self { tag, start, end }
    }

    /// Span length in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Only the [`Tag::Eof`] sentinel is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Span as a `usize` range, ready for slicing.
    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Source text covered by this token.
    ///
    /// Returns `""` if the token does not belong to `source`.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.range()).unwrap_or_default()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}..{})", self.tag, self.start, self.end)
    }
}
