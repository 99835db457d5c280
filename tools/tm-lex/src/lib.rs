//! Library half of the `tm-lex` command-line tool.
//!
//! Command handlers render their output to strings so they can be tested
//! without spawning the binary; `main.rs` only parses arguments and prints.

use std::io;
use std::path::PathBuf;
use std::sync::Once;

use thiserror::Error;
use tm_editor::SettingsError;
use tm_lexer_core::RangeError;

pub mod commands;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("invalid range '{0}': expected START..END byte offsets")]
    BadRange(String),

    #[error("unknown option '{0}'")]
    UnknownOption(String),
}

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber, once per process.
///
/// Nothing is installed unless `RUST_LOG` is set, so the tool stays silent
/// by default.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
