//! Editor adapters for Terramate configuration files.
//!
//! Everything here is a thin layer over the token stream of
//! [`tm_lexer_core`]: highlighting keys, tag sets, brace pairs and
//! matching, fold regions, comment toggling, and the settings that select
//! the keyword set and the external language server.

pub mod braces;
pub mod commenter;
pub mod folding;
pub mod highlight;
pub mod settings;
pub mod token_set;

pub use braces::{match_braces, BraceMatch, BracePair, PAIRS};
pub use folding::{fold_regions, FoldRegion};
pub use highlight::{highlight, HighlightKey, HighlightRun};
pub use settings::{LanguageServerSettings, ServerCommand, Settings, SettingsError, TraceLevel};
pub use token_set::TokenSet;
