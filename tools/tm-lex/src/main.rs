//! Terramate tokenizer CLI.
//!
//! Inspects how editor tooling sees a Terramate file: tokens, highlight
//! runs, brace pairs and fold regions.

use std::path::{Path, PathBuf};

use tm_lex::commands::{
    lex_files, load_settings, parse_lex_args, read_source, render_braces, render_folds,
    render_highlight, render_server,
};
use tm_lex::{init_tracing, ToolError};
use tm_lexer_core::KeywordSet;

fn main() {
    init_tracing();

    // `--config=` is global; pull it out before dispatching.
    let mut config: Option<PathBuf> = None;
    let args: Vec<String> = std::env::args()
        .filter(|arg| match arg.strip_prefix("--config=") {
            Some(path) => {
                config = Some(PathBuf::from(path));
                false
            }
            None => true,
        })
        .collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    let result = match command {
        "lex" => run_lex(&args[2..], config.as_deref()),
        "highlight" | "braces" | "folds" => {
            if args.len() < 3 {
                eprintln!("Usage: tm-lex {command} <file.tm>");
                std::process::exit(1);
            }
            let render: fn(&str, &KeywordSet) -> String = match command {
                "highlight" => render_highlight,
                "braces" => render_braces,
                _ => render_folds,
            };
            run_single(render, Path::new(&args[2]), config.as_deref())
        }
        "server" => load_settings(config.as_deref()).and_then(|settings| {
            render_server(&settings, std::env::var_os("PATH").as_deref())
        }),
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        "version" | "--version" | "-V" => {
            println!("tm-lex {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    match result {
        Ok(output) => print!("{output}"),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn keywords(config: Option<&Path>) -> Result<KeywordSet, ToolError> {
    Ok(load_settings(config)?.keyword_set())
}

const LEX_USAGE: &str = "Usage: tm-lex lex [--range=START..END] <files...>";

fn run_lex(args: &[String], config: Option<&Path>) -> Result<String, ToolError> {
    let (range, files) = match parse_lex_args(args) {
        Ok(parsed) if !parsed.files.is_empty() => (parsed.range, parsed.files),
        Ok(_) => {
            eprintln!("{LEX_USAGE}");
            std::process::exit(1);
        }
        Err(err @ ToolError::UnknownOption(_)) => {
            eprintln!("error: {err}");
            eprintln!("{LEX_USAGE}");
            std::process::exit(1);
        }
        Err(err) => return Err(err),
    };

    let keywords = keywords(config)?;
    let reports = lex_files(&files, range, &keywords)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(reports.concat())
}

fn run_single(
    render: fn(&str, &KeywordSet) -> String,
    path: &Path,
    config: Option<&Path>,
) -> Result<String, ToolError> {
    let keywords = keywords(config)?;
    let source = read_source(path)?;
    Ok(render(&source, &keywords))
}

fn print_usage() {
    println!("Terramate tokenizer for editor tooling");
    println!();
    println!("Usage: tm-lex <command> [options]");
    println!();
    println!("Commands:");
    println!("  lex <files...>       Tokenize files and display tokens");
    println!("  highlight <file.tm>  Display highlight runs");
    println!("  braces <file.tm>     Display matched and unmatched delimiters");
    println!("  folds <file.tm>      Display fold regions");
    println!("  server               Display the resolved language server command");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --config=<path>      Settings file (JSON) for keywords and server");
    println!("  --range=<S..E>       Lex only bytes S..E of each file");
    println!();
    println!("Examples:");
    println!("  tm-lex lex stack.tm");
    println!("  tm-lex lex --range=10..42 stack.tm");
    println!("  tm-lex highlight terramate.tm.hcl");
    println!("  tm-lex server --config=settings.json");
    println!();
    println!("Set RUST_LOG=debug to trace settings and server discovery.");
}
