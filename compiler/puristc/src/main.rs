//! Purist front-end CLI.

use puristc::commands::{explain_error, layout_file, lex_file, parse_files};
use puristc::{init_tracing, DriverConfig, DriverError};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    let outcome = match command {
        "lex" | "layout" | "parse" | "tree" => run_file_command(command, &args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(0)
        }
        "version" | "--version" | "-V" => {
            println!("purist {}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
        "explain" | "--explain" => match args.get(2) {
            Some(code) => explain_error(code).map(|()| 0),
            None => Err(DriverError::MissingArgument("error code (e.g. E1002)")),
        },
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    match outcome {
        Ok(0) => {}
        Ok(_) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

/// Run a command that takes files. Returns the number of errors reported.
fn run_file_command(command: &str, args: &[String]) -> Result<usize, DriverError> {
    let (config, files) = DriverConfig::from_args(args)?;
    if files.is_empty() {
        return Err(DriverError::MissingArgument("file path"));
    }

    match command {
        "lex" | "layout" => {
            let mut errors = 0;
            for path in &files {
                errors += if command == "lex" {
                    lex_file(path, &config)?
                } else {
                    layout_file(path, &config)?
                };
            }
            Ok(errors)
        }
        _ => {
            let summary = parse_files(&files, &config, command == "tree")?;
            if summary.files > 1 && summary.has_errors() {
                eprintln!(
                    "{} error{} in {} files",
                    summary.errors,
                    if summary.errors == 1 { "" } else { "s" },
                    summary.files
                );
            }
            Ok(summary.errors)
        }
    }
}

fn print_usage() {
    println!("Purist front end (lexer, layout, parser)");
    println!();
    println!("Usage: purist <command> [options] <files...>");
    println!();
    println!("Commands:");
    println!("  lex <file>           Tokenize and display tokens");
    println!("  layout <file>        Display tokens with virtual layout tokens");
    println!("  parse <files...>     Parse and summarize each file");
    println!("  tree <files...>      Parse and print each syntax tree");
    println!("  explain <code>       Explain a diagnostic code (e.g., E1002)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --entry=<name>       Entry parser for parse/tree (default: module)");
    println!(
        "                       one of: {}",
        purist_grammar::ENTRY_NAMES.join(", ")
    );
    println!("  --color=<mode>       Diagnostics color: auto, always, never");
    println!("  --stacks             layout: show the layout stack after each token");
    println!("  --trivia             Include whitespace and comments in dumps");
    println!("  --no-parallel        Parse files sequentially");
    println!();
    println!("A file path of `-` reads standard input.");
    println!("Set RUST_LOG (e.g. RUST_LOG=purist_layout=trace) for engine tracing.");
    println!();
    println!("Examples:");
    println!("  purist parse src/Main.purs src/Data/List.purs");
    println!("  purist tree --entry=expr expr.txt");
    println!("  purist layout --stacks src/Main.purs");
    println!("  purist explain E1003");
}
