//! Hand-written scanner producing one [`Token`] per step.
//!
//! A scan session covers a window `[start, end)` of a caller-owned buffer.
//! [`Scanner::reset`] positions the session and scans the first token;
//! [`Scanner::advance`] steps to the next one. The scanner never fails on
//! malformed input: unterminated strings and comments run to the window end,
//! loose numeric shapes are accepted whole, and anything unrecognised becomes
//! a one-character [`Tag::BadCharacter`] token.
//!
//! # Design
//!
//! Main dispatch switches on the current byte. ASCII bytes are classified
//! directly; non-ASCII lead bytes decode one `char` and are classified by
//! Unicode general category: letters (`L*`) start identifiers, decimal
//! digits (`Nd`) start numbers, anything else that is not whitespace is a
//! bad character. Each arm calls a focused
//! method that advances the cursor and returns the tag; the span comes from
//! the cursor positions before and after.
//!
//! The scanner has no mode: the only state carried between steps is the end
//! offset of the previous token. Starting a new session at any token
//! boundary therefore reproduces the tokens of a full scan from that point.

use std::iter::FusedIterator;
use std::ops::Range;

use thiserror::Error;
use tracing::{debug, trace};
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::cursor::Cursor;
use crate::keywords::KeywordSet;
use crate::tag::{Tag, Token};

/// Invalid scan window passed to [`Scanner::reset`] or [`scan_at`].
///
/// This signals a caller bug, never a problem with the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("scan window start {start} is past its end {end}")]
    Inverted { start: u32, end: u32 },

    #[error("scan window end {end} exceeds buffer length {len}")]
    OutOfBounds { end: u32, len: usize },

    #[error("scan offset {offset} splits a UTF-8 character")]
    NotCharBoundary { offset: u32 },
}

/// Check `start <= end <= source.len()` and that both are char boundaries.
fn validate(source: &str, start: u32, end: u32) -> Result<(), RangeError> {
    if start > end {
        return Err(RangeError::Inverted { start, end });
    }
    if end as usize > source.len() {
        return Err(RangeError::OutOfBounds {
            end,
            len: source.len(),
        });
    }
    for offset in [start, end] {
        if !source.is_char_boundary(offset as usize) {
            return Err(RangeError::NotCharBoundary { offset });
        }
    }
    Ok(())
}

/// [`validate`], logging the rejected window.
fn check_window(source: &str, start: u32, end: u32) -> Result<(), RangeError> {
    validate(source, start, end).inspect_err(|err| {
        debug!(start, end, len = source.len(), %err, "rejected scan window");
    })
}

/// Length of `source` as a `u32` window end.
///
/// Sources beyond `u32::MAX` bytes are truncated to the last character
/// boundary that fits.
fn full_len(source: &str) -> u32 {
    let mut len = u32::try_from(source.len()).unwrap_or(u32::MAX);
    while !source.is_char_boundary(len as usize) {
        len -= 1;
    }
    len
}

/// Incremental scanner over a window of a source buffer.
///
/// Accessors read the last computed token in O(1). The scanner is also an
/// [`Iterator`] over every token before [`Tag::Eof`].
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    keywords: &'a KeywordSet,
    token: Token,
}

impl<'a> Scanner<'a> {
    /// Scan the whole of `source`. The first token is ready immediately.
    pub fn new(source: &'a str, keywords: &'a KeywordSet) -> Self {
        let end = full_len(source);
        let mut scanner = Self {
            cursor: Cursor::new(source, 0, end),
            keywords,
            token: Token::new(Tag::Eof, 0, 0),
        };
        scanner.advance();
        scanner
    }

    /// Scan `source[range]`. The first token is ready immediately.
    pub fn with_range(
        source: &'a str,
        range: Range<u32>,
        keywords: &'a KeywordSet,
    ) -> Result<Self, RangeError> {
        check_window(source, range.start, range.end)?;
        let mut scanner = Self {
            cursor: Cursor::new(source, range.start, range.end),
            keywords,
            token: Token::new(Tag::Eof, range.start, range.start),
        };
        scanner.advance();
        Ok(scanner)
    }

    /// Restart the session over `source[start..end]` and scan the first token.
    ///
    /// On error the previous session is left untouched.
    pub fn reset(&mut self, source: &'a str, start: u32, end: u32) -> Result<(), RangeError> {
        check_window(source, start, end)?;
        trace!(start, end, "scanner reset");
        self.cursor = Cursor::new(source, start, end);
        self.token = Token::new(Tag::Eof, start, start);
        self.advance();
        Ok(())
    }

    /// The last computed token.
    #[inline]
    pub fn token(&self) -> Token {
        self.token
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.token.tag
    }

    #[inline]
    pub fn start(&self) -> u32 {
        self.token.start
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.token.end
    }

    /// Lexer state for incremental re-lexing hosts. Always `0`: no token
    /// depends on anything before its own start offset.
    #[inline]
    #[allow(
        clippy::unused_self,
        reason = "host lexer interfaces query state per session"
    )]
    pub fn state(&self) -> u32 {
        0
    }

    /// Exclusive end of the scan window.
    #[inline]
    pub fn window_end(&self) -> u32 {
        self.cursor.end()
    }

    /// Compute the next token.
    ///
    /// At the window end the token becomes [`Tag::Eof`] with both offsets
    /// collapsed to the end; further calls are no-ops. Every other call
    /// consumes at least one character.
    pub fn advance(&mut self) {
        let start = self.cursor.pos();
        if self.cursor.is_eof() {
            let end = self.cursor.end();
            self.token = Token::new(Tag::Eof, end, end);
            return;
        }
        let tag = match self.cursor.current() {
            b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r' => self.whitespace(),
            b'#' => self.hash_comment(),
            b'/' => self.slash_or_comment(),
            b'"' => self.string(),
            b'0'..=b'9' => self.number(),
            b'{' => self.single(Tag::LBrace),
            b'}' => self.single(Tag::RBrace),
            b'[' => self.single(Tag::LBrack),
            b']' => self.single(Tag::RBrack),
            b'(' => self.single(Tag::LParen),
            b')' => self.single(Tag::RParen),
            b'=' | b'!' | b'<' | b'>' => self.operator_then(b'='),
            b'&' => self.operator_then(b'&'),
            b'|' => self.operator_then(b'|'),
            b'.' => self.dot(),
            b'+' | b'-' | b'*' | b'%' | b':' | b'?' => self.single(Tag::Operator),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(start),
            0x80..=0xFF => self.non_ascii(start),
            // Control characters, NUL, and punctuation with no meaning here
            _ => self.single(Tag::BadCharacter),
        };
        debug_assert!(self.cursor.pos() > start, "scanner made no progress");
        self.token = Token::new(tag, start, self.cursor.pos());
    }

    // ─── Whitespace & Comments ─────────────────────────────────────

    fn whitespace(&mut self) -> Tag {
        self.cursor.eat_whitespace();
        Tag::Whitespace
    }

    fn hash_comment(&mut self) -> Tag {
        self.cursor.advance(); // consume '#'
        self.cursor.eat_until_newline_or_eof();
        Tag::LineComment
    }

    fn slash_or_comment(&mut self) -> Tag {
        self.cursor.advance(); // consume '/'
        match self.cursor.current() {
            b'/' => {
                self.cursor.advance();
                self.cursor.eat_until_newline_or_eof();
                Tag::LineComment
            }
            b'*' => {
                self.cursor.advance();
                self.cursor.eat_past_block_comment_end();
                Tag::BlockComment
            }
            // Division, including a lone `/` as the window's last character
            _ => Tag::Operator,
        }
    }

    // ─── Literals ──────────────────────────────────────────────────

    fn string(&mut self) -> Tag {
        self.cursor.advance(); // consume opening '"'
        loop {
            match self.cursor.skip_to_string_delim() {
                b'"' => {
                    self.cursor.advance(); // consume closing '"'
                    return Tag::String;
                }
                b'\\' => {
                    self.cursor.advance(); // consume '\'
                    if !self.cursor.is_eof() {
                        // Escaped character, whatever it is
                        self.cursor.advance_char();
                    }
                }
                // Unterminated: runs to the window end
                _ => return Tag::String,
            }
        }
    }

    /// Digits and dots greedily, then an optional exponent.
    ///
    /// No shape validation: `1.2.3` is one token, and a bare `e` (or `e+`)
    /// after the mantissa is consumed even without exponent digits. Any
    /// Unicode decimal digit counts, so `١٢` is a number too.
    fn number(&mut self) -> Tag {
        self.eat_digits(true);
        if matches!(self.cursor.current(), b'e' | b'E') {
            self.cursor.advance();
            if matches!(self.cursor.current(), b'+' | b'-') {
                self.cursor.advance();
            }
            self.eat_digits(false);
        }
        Tag::Number
    }

    /// Advance over decimal digits, and `.` too when `dots` is set.
    fn eat_digits(&mut self, dots: bool) {
        loop {
            self.cursor.eat_while(|b| b.is_ascii_digit() || (dots && b == b'.'));
            if self.cursor.current() >= 0x80 && is_decimal_digit(self.cursor.current_char()) {
                self.cursor.advance_char();
            } else {
                break;
            }
        }
    }

    // ─── Operators & Delimiters ────────────────────────────────────

    /// Single-character token: advance one byte and emit the given tag.
    fn single(&mut self, tag: Tag) -> Tag {
        self.cursor.advance();
        tag
    }

    /// Operator character that merges with `second` into a two-character
    /// operator (`==`, `!=`, `<=`, `>=`, `&&`, `||`).
    fn operator_then(&mut self, second: u8) -> Tag {
        self.cursor.advance();
        if self.cursor.current() == second {
            self.cursor.advance();
        }
        Tag::Operator
    }

    /// `.`, `..` or `...`.
    fn dot(&mut self) -> Tag {
        self.cursor.advance(); // consume '.'
        if self.cursor.current() == b'.' {
            self.cursor.advance();
            if self.cursor.current() == b'.' {
                self.cursor.advance();
            }
        }
        Tag::Operator
    }

    // ─── Identifiers ───────────────────────────────────────────────

    fn identifier(&mut self, start: u32) -> Tag {
        self.cursor.advance_char(); // first char already classified
        self.eat_ident_continue();
        if self.keywords.contains(self.cursor.slice_from(start)) {
            Tag::Keyword
        } else {
            Tag::Identifier
        }
    }

    fn eat_ident_continue(&mut self) {
        loop {
            let b = self.cursor.current();
            if is_ident_continue(b) {
                self.cursor.advance();
            } else if b >= 0x80 && is_letter_or_digit(self.cursor.current_char()) {
                self.cursor.advance_char();
            } else {
                break;
            }
        }
    }

    // ─── Non-ASCII ─────────────────────────────────────────────────

    fn non_ascii(&mut self, start: u32) -> Tag {
        let c = self.cursor.current_char();
        if c.is_whitespace() {
            self.whitespace()
        } else if is_decimal_digit(c) {
            self.number()
        } else if is_letter(c) {
            self.identifier(start)
        } else {
            self.cursor.advance_char();
            Tag::BadCharacter
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    /// Yield the current token and step past it; `None` once at [`Tag::Eof`].
    fn next(&mut self) -> Option<Token> {
        let tok = self.token;
        if tok.tag == Tag::Eof {
            return None;
        }
        self.advance();
        Some(tok)
    }
}

impl FusedIterator for Scanner<'_> {}

/// 256-byte lookup table for ASCII identifier continuation bytes.
/// `true` for a-z, A-Z, 0-9, underscore, and hyphen.
/// The end-of-window byte (0x00) maps to `false`, terminating loops.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..=255, always fits in u8"
)]
static IS_IDENT_CONTINUE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = matches!(
            i as u8,
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'-'
        );
        i += 1;
    }
    table
};

/// Returns `true` if `b` is an ASCII identifier continuation byte.
#[inline]
fn is_ident_continue(b: u8) -> bool {
    IS_IDENT_CONTINUE_TABLE[b as usize]
}

/// Letter in any script: general category `Lu`, `Ll`, `Lt`, `Lm` or `Lo`.
///
/// Narrower than [`char::is_alphabetic`], which also admits letter numbers
/// such as `Ⅻ` and some combining marks.
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Decimal digit in any script (`Nd`). Superscripts and fractions are `No`
/// and do not count.
fn is_decimal_digit(c: char) -> bool {
    matches!(get_general_category(c), GeneralCategory::DecimalNumber)
}

fn is_letter_or_digit(c: char) -> bool {
    is_letter(c) || is_decimal_digit(c)
}

/// Scan the single token starting at `pos` in the window `source[..end]`.
///
/// This is the scanner's step as a pure function: the next cursor is the
/// returned token's `end`. At `pos == end` the result is [`Tag::Eof`].
pub fn scan_at(
    source: &str,
    end: u32,
    pos: u32,
    keywords: &KeywordSet,
) -> Result<Token, RangeError> {
    Scanner::with_range(source, pos..end, keywords).map(|scanner| scanner.token())
}

/// Convenience function: tokenize a whole string with the built-in keywords.
///
/// Returns every token except the final `Eof`. For incremental access use
/// [`Scanner`] directly.
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::new(source, KeywordSet::terramate()).collect()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
