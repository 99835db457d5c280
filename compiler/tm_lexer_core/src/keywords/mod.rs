//! Reserved words of the Terramate configuration language.
//!
//! The keyword set is an immutable value. The built-in set is constructed
//! once per process ([`KeywordSet::terramate`]) and shared by every scan
//! session; callers that need a different vocabulary build their own set and
//! hand it to the scanner by reference. Lookup is exact and case-sensitive.
//!
//! # Lookup
//!
//! Identifiers whose byte length falls outside the set's length range are
//! rejected before hashing, so most ordinary identifiers never touch the
//! hash table.

use std::sync::OnceLock;

use rustc_hash::FxHashSet;

/// Block names, function-like blocks and literals of Terramate files.
pub const TERRAMATE_KEYWORDS: &[&str] = &[
    // Blocks
    "terramate",
    "config",
    "git",
    "cloud",
    "stack",
    "globals",
    "lets",
    "map",
    "import",
    "generate_hcl",
    "generate_file",
    "content",
    "tm_dynamic",
    "assert",
    "output",
    "script",
    "sharing_backend",
    "vendor",
    "define",
    "bundle",
    "metadata",
    "scaffolding",
    "input",
    "export",
    "component",
    "scaffold",
    // Literals
    "true",
    "false",
    "null",
    // Template directives and for expressions
    "if",
    "else",
    "endif",
    "for",
    "in",
    "endfor",
];

/// Immutable, case-sensitive set of reserved words.
#[derive(Clone, Debug)]
pub struct KeywordSet {
    words: FxHashSet<Box<str>>,
    /// Shortest and longest keyword, in bytes. `(usize::MAX, 0)` when empty.
    min_len: usize,
    max_len: usize,
}

impl KeywordSet {
    /// Build a set from any list of words. Duplicates and empty strings are
    /// ignored.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self {
            words: FxHashSet::default(),
            min_len: usize::MAX,
            max_len: 0,
        };
        set.extend(words);
        set
    }

    /// The built-in Terramate keyword set, shared process-wide.
    pub fn terramate() -> &'static KeywordSet {
        static TERRAMATE: OnceLock<KeywordSet> = OnceLock::new();
        TERRAMATE.get_or_init(|| KeywordSet::new(TERRAMATE_KEYWORDS))
    }

    /// A copy of this set with `extra` words added.
    #[must_use]
    pub fn with_extra<I, S>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = self.clone();
        set.extend(extra);
        set
    }

    fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            self.min_len = self.min_len.min(word.len());
            self.max_len = self.max_len.max(word.len());
            self.words.insert(word.into());
        }
    }

    /// Returns `true` if `text` is exactly one of the reserved words.
    #[inline]
    pub fn contains(&self, text: &str) -> bool {
        let len = text.len();
        if len < self.min_len || len > self.max_len {
            return false;
        }
        self.words.contains(text)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the words in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|word| &**word)
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        KeywordSet::terramate().clone()
    }
}
