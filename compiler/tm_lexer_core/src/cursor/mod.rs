//! Bounded cursor over the scan window of a source buffer.
//!
//! The cursor advances through the source byte-by-byte and never reads at or
//! past the window end. Reads beyond the end return `0x00`, which acts as a
//! virtual sentinel: every classification predicate rejects it, so scanning
//! loops terminate at the window end without explicit bounds checks.
//!
//! # Interior Null Bytes
//!
//! A real `U+0000` inside the window also reads as `0x00`. The cursor
//! distinguishes it from the end by comparing `pos` against `end`, see
//! [`is_eof()`](Cursor::is_eof).

/// Cursor over `source[..end]`, positioned somewhere in `[start, end]`.
///
/// # Invariant
///
/// `pos <= end` after every operation performed by the scanner, and `pos`
/// always sits on a UTF-8 character boundary between tokens.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Source truncated to the window end. Bytes past `end` are unreachable.
    src: &'a str,
    /// Current read position (byte index into `src`).
    pos: u32,
    /// Exclusive end of the scan window.
    end: u32,
}

// A borrowed window plus two offsets: three words at most on 64-bit targets.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a cursor at `pos` over `source[..end]`.
    ///
    /// # Contract
    ///
    /// `pos <= end <= source.len()` and both lie on character boundaries.
    /// [`Scanner`](crate::Scanner) validates this before building a cursor.
    pub(crate) fn new(source: &'a str, pos: u32, end: u32) -> Self {
        debug_assert!(pos <= end, "cursor start {pos} exceeds end {end}");
        debug_assert!(
            source.is_char_boundary(end as usize),
            "cursor end {end} is not a character boundary"
        );
        Self {
            src: source.get(..end as usize).unwrap_or(source),
            pos,
            end,
        }
    }

    /// Returns the byte at the current position, or `0x00` at the window end.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    #[inline]
    fn byte_at(&self, index: u32) -> u8 {
        self.src.as_bytes().get(index as usize).copied().unwrap_or(0)
    }

    /// Decode the full character at the current position.
    ///
    /// Returns `'\0'` at the window end. Only needed for non-ASCII lead
    /// bytes; ASCII is classified straight from [`current()`](Self::current).
    pub fn current_char(&self) -> char {
        self.src
            .get(self.pos as usize..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or('\0')
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Returns `true` once the cursor has reached the window end.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.end
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Exclusive end of the scan window.
    #[inline]
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Extract a source substring as `&str`.
    ///
    /// Returns `""` if `start..end` is out of range or splits a character,
    /// which cannot happen for offsets produced by the scanner.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        self.src.get(start as usize..end as usize).unwrap_or_default()
    }

    /// Extract a source substring from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// # Contract
    ///
    /// `pred(0)` must return `false`, otherwise the loop would not stop at
    /// the window end. This holds for all byte classifiers used here.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Returns the number of bytes in the UTF-8 character starting with `byte`.
    ///
    /// - `0xC0..=0xDF`: 2 bytes
    /// - `0xE0..=0xEF`: 3 bytes
    /// - `0xF0..=0xF7`: 4 bytes
    /// - Everything else (ASCII, continuation, invalid): 1 byte
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance the cursor past one full UTF-8 character.
    ///
    /// Clamped to the window end so a truncated window can never leave the
    /// cursor past `end`.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.pos = (self.pos + width).min(self.end);
    }

    /// Advance past a run of whitespace characters.
    ///
    /// ASCII whitespace (`' '`, `\t`, `\n`, `\x0B`, `\x0C`, `\r`) is handled
    /// byte-at-a-time; non-ASCII characters are decoded and tested with
    /// [`char::is_whitespace`].
    pub fn eat_whitespace(&mut self) {
        loop {
            match self.current() {
                b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r' => self.pos += 1,
                0x80..=0xFF if self.current_char().is_whitespace() => self.advance_char(),
                _ => break,
            }
        }
    }

    /// Advance to the next `\n` byte or the window end.
    ///
    /// Used by the line comment scanners. The newline itself is not consumed.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= end which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        let remaining = self.remaining();
        if let Some(offset) = memchr::memchr(b'\n', remaining) {
            self.pos += offset as u32;
        } else {
            self.pos = self.end;
        }
    }

    /// Advance past the first `*/`, or to the window end if there is none.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= end which fits in u32"
    )]
    pub fn eat_past_block_comment_end(&mut self) {
        let remaining = self.remaining();
        if let Some(offset) = memchr::memmem::find(remaining, b"*/") {
            self.pos += offset as u32 + 2;
        } else {
            self.pos = self.end;
        }
    }

    /// Advance past ordinary string content to the next `"` or `\`.
    ///
    /// Returns the byte found, or `0` at the window end. Newlines are
    /// ordinary string content.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= end which fits in u32"
    )]
    pub fn skip_to_string_delim(&mut self) -> u8 {
        let remaining = self.remaining();
        if let Some(offset) = memchr::memchr2(b'"', b'\\', remaining) {
            self.pos += offset as u32;
            self.current()
        } else {
            self.pos = self.end;
            0
        }
    }

    /// Bytes from the current position to the window end.
    fn remaining(&self) -> &'a [u8] {
        self.src
            .as_bytes()
            .get(self.pos as usize..)
            .unwrap_or_default()
    }
}
