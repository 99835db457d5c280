//! Standalone tokenizer for Terramate configuration files.
//!
//! Built for editor hosts: it classifies every byte of a buffer window into
//! a coarse token category for highlighting, brace matching and folding,
//! and never rejects input. There is no parser behind it and no token ever
//! carries a value; the text of a token is always `source[start..end]`.
//!
//! # Usage
//!
//! ```
//! use tm_lexer_core::{KeywordSet, Scanner, Tag};
//!
//! let source = "stack { name = \"app\" }";
//! let mut scanner = Scanner::new(source, KeywordSet::terramate());
//! assert_eq!(scanner.tag(), Tag::Keyword);
//! scanner.advance();
//! assert_eq!(scanner.tag(), Tag::Whitespace);
//! ```
//!
//! Offsets are UTF-8 byte offsets stored as `u32`.

mod cursor;
mod keywords;
mod scanner;
mod tag;

pub use keywords::{KeywordSet, TERRAMATE_KEYWORDS};
pub use scanner::{scan_at, tokenize, RangeError, Scanner};
pub use tag::{Tag, Token};
