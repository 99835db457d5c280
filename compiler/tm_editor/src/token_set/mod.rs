//! Sets of token tags for editor queries.
//!
//! Uses bitset-based O(1) membership testing. Every [`Tag`] discriminant is
//! below 32, so a `u32` covers the whole enum.

use tm_lexer_core::Tag;

// TokenSet uses a u32 bitset, so every tag index must fit in 0..32.
const _: () = assert!(
    Tag::Eof.index() < 32,
    "TokenSet uses u32 bitset; all tag indices must be < 32"
);

/// A set of tags using bitset representation.
///
/// # Example
/// ```
/// use tm_editor::TokenSet;
/// use tm_lexer_core::Tag;
///
/// const DELIMS: TokenSet = TokenSet::new().with(Tag::LBrace).with(Tag::RBrace);
/// assert!(DELIMS.contains(Tag::LBrace));
/// assert!(!DELIMS.contains(Tag::Operator));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenSet(u32);

impl TokenSet {
    /// Line and block comments.
    pub const COMMENTS: TokenSet = TokenSet::new()
        .with(Tag::LineComment)
        .with(Tag::BlockComment);

    pub const STRINGS: TokenSet = TokenSet::single(Tag::String);

    pub const WHITESPACE: TokenSet = TokenSet::single(Tag::Whitespace);

    /// All six delimiter tags.
    pub const BRACKETS: TokenSet = TokenSet::new()
        .with(Tag::LBrace)
        .with(Tag::RBrace)
        .with(Tag::LBrack)
        .with(Tag::RBrack)
        .with(Tag::LParen)
        .with(Tag::RParen);

    /// Create an empty token set.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Create a token set containing a single tag.
    #[inline]
    pub const fn single(tag: Tag) -> Self {
        Self(1u32 << tag.index())
    }

    /// Add a tag to this set (builder pattern for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, tag: Tag) -> Self {
        Self(self.0 | (1u32 << tag.index()))
    }

    /// Union of two token sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Intersection of two token sets.
    #[inline]
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    pub const fn contains(self, tag: Tag) -> bool {
        (self.0 & (1u32 << tag.index())) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Count the number of tags in this set.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate over the member tags in discriminant order.
    pub fn iter(self) -> impl Iterator<Item = Tag> {
        Tag::ALL.into_iter().filter(move |&tag| self.contains(tag))
    }
}

impl FromIterator<Tag> for TokenSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        iter.into_iter().fold(TokenSet::new(), TokenSet::with)
    }
}
