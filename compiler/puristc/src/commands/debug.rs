//! Debug commands: `lex` and `layout` for inspecting the token streams.

use std::fmt::Write;

use purist_grammar::layout_rules;
use purist_layout::{layout, LayoutToken};
use purist_lexer::lex;

use super::{emit_diagnostics, read_file};
use crate::{DriverConfig, DriverError};

/// The raw token stream of `source`, one token per line.
pub fn lex_report(path: &str, source: &str, trivia: bool) -> String {
    let lexed = lex(source);
    let shown: Vec<_> = lexed
        .tokens
        .iter()
        .filter(|t| trivia || !t.kind.is_trivia())
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "Tokens for '{path}' ({} tokens):", shown.len());
    for token in shown {
        let _ = writeln!(
            out,
            "  {:?} @ {} {:?}",
            token.kind,
            token.start,
            token.text(source)
        );
    }
    out
}

/// The layout-annotated stream of `source`. With `stacks`, each token is
/// followed by the layout stack in effect after it, innermost frame first.
pub fn layout_report(path: &str, source: &str, config: &DriverConfig) -> String {
    let lexed = lex(source);
    let output = layout(&lexed.tokens, lexed.eof, &layout_rules());
    let blocks = output
        .tokens
        .iter()
        .filter(|t| matches!(t, LayoutToken::Start(_)))
        .count();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Layout for '{path}' ({} tokens, {blocks} blocks):",
        output.significant().count()
    );
    for (token, stack) in output.tokens.iter().zip(&output.stacks) {
        if token.is_trivia() && !config.trivia {
            continue;
        }
        match token {
            LayoutToken::Start(pos) => {
                let _ = writeln!(out, "  {{ @ {pos}");
            }
            LayoutToken::Sep(pos) => {
                let _ = writeln!(out, "  ; @ {pos}");
            }
            LayoutToken::End(pos) => {
                let _ = writeln!(out, "  }} @ {pos}");
            }
            LayoutToken::Raw(raw) => {
                let _ = writeln!(out, "  {:?} @ {} {:?}", raw.kind, raw.start, raw.text(source));
            }
        }
        if config.stacks {
            let _ = writeln!(out, "      {stack:?}");
        }
    }
    out
}

/// `purist lex <file>`: print tokens, report lexical errors.
pub fn lex_file(path: &str, config: &DriverConfig) -> Result<usize, DriverError> {
    let source = read_file(path)?;
    print!("{}", lex_report(path, &source, config.trivia));
    let diagnostics = lex(&source).diagnostics;
    Ok(emit_diagnostics(path, &source, &diagnostics, config.color))
}

/// `purist layout <file>`: print the layout-annotated stream.
pub fn layout_file(path: &str, config: &DriverConfig) -> Result<usize, DriverError> {
    let source = read_file(path)?;
    print!("{}", layout_report(path, &source, config));
    let diagnostics = lex(&source).diagnostics;
    Ok(emit_diagnostics(path, &source, &diagnostics, config.color))
}
