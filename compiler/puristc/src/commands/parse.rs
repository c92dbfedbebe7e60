//! `parse` and `tree`: run an entry parser over one or more files.
//!
//! Files are parsed in parallel on a dedicated rayon pool sharing the one
//! process-wide grammar; results come back in input order, so output does
//! not depend on scheduling.

use std::fmt::Write;

use purist_grammar::grammar;
use purist_ir::SyntaxKind;
use purist_parse::Parse;
use rayon::prelude::*;

use super::{emit_diagnostics, read_file};
use crate::{DriverConfig, DriverError};

/// Worker stack size. Deeply nested input recurses through the combinators;
/// `purist_stack` grows the stack on demand, a larger start just makes that rarer.
const WORKER_STACK_SIZE: usize = 16 * 1024 * 1024;

/// One parsed file.
pub struct FileParse {
    pub path: String,
    pub source: String,
    pub parse: Parse,
}

/// Totals over a `parse` run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseSummary {
    pub files: usize,
    pub errors: usize,
}

impl ParseSummary {
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Parse every `(path, source)` pair with the configured entry parser.
pub fn parse_sources(
    inputs: Vec<(String, String)>,
    config: &DriverConfig,
) -> Result<Vec<FileParse>, DriverError> {
    let grammar = grammar();
    let Some(entry) = grammar.entry(&config.entry) else {
        return Err(DriverError::UnknownEntry(config.entry.clone()));
    };
    let run = |(path, source): (String, String)| {
        let parse = grammar.parse(entry, &source);
        FileParse {
            path,
            source,
            parse,
        }
    };

    if !config.parallel || inputs.len() < 2 {
        return Ok(inputs.into_iter().map(run).collect());
    }

    let (results, inputs) = parallel(inputs, &config.entry, &run);
    match results {
        Some(results) => Ok(results),
        None => Ok(inputs.into_iter().map(run).collect()),
    }
}

/// Run `run` over `inputs` on a dedicated pool. When no pool can be built the
/// inputs are handed back for a sequential run.
fn parallel<F>(
    inputs: Vec<(String, String)>,
    entry: &str,
    run: &F,
) -> (Option<Vec<FileParse>>, Vec<(String, String)>)
where
    F: Fn((String, String)) -> FileParse + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .stack_size(WORKER_STACK_SIZE)
        .build();
    match pool {
        Ok(pool) => {
            tracing::debug!(
                files = inputs.len(),
                threads = pool.current_num_threads(),
                entry,
                "parsing in parallel"
            );
            let results = pool.install(|| inputs.into_par_iter().map(run).collect());
            (Some(results), Vec::new())
        }
        Err(e) => {
            tracing::warn!("failed to create thread pool ({e}), parsing sequentially");
            (None, inputs)
        }
    }
}

/// A one-paragraph summary of a parse: node counts and diagnostics.
pub fn summary_report(file: &FileParse) -> String {
    let nodes = file.parse.tree.root().descendants();
    let declarations = nodes
        .iter()
        .filter(|n| {
            matches!(
                n.kind,
                SyntaxKind::ValueDecl
                    | SyntaxKind::Signature
                    | SyntaxKind::DataDecl
                    | SyntaxKind::NewtypeDecl
                    | SyntaxKind::TypeSynonymDecl
                    | SyntaxKind::ClassDecl
                    | SyntaxKind::InstanceDecl
                    | SyntaxKind::DeriveDecl
                    | SyntaxKind::ForeignImportDecl
                    | SyntaxKind::FixityDecl
            )
        })
        .count();
    let imports = nodes
        .iter()
        .filter(|n| n.kind == SyntaxKind::ImportDecl)
        .count();
    let recovered = nodes
        .iter()
        .filter(|n| n.kind == SyntaxKind::Error)
        .count();

    let mut out = String::new();
    let _ = writeln!(out, "Parse result for '{}':", file.path);
    let _ = writeln!(out, "  Nodes: {}", nodes.len());
    let _ = writeln!(out, "  Imports: {imports}");
    let _ = writeln!(out, "  Declarations: {declarations}");
    let _ = writeln!(out, "  Skipped regions: {recovered}");
    let _ = writeln!(out, "  Diagnostics: {}", file.parse.diagnostics.len());
    out
}

/// The syntax tree of a parse, one node or token per line.
pub fn tree_report(file: &FileParse, trivia: bool) -> String {
    file.parse.tree.debug_dump(trivia)
}

/// `purist parse <files...>` and `purist tree <files...>`.
///
/// With `dump_tree`, prints each tree instead of a summary. Diagnostics go
/// to stderr in input order.
pub fn parse_files(
    paths: &[String],
    config: &DriverConfig,
    dump_tree: bool,
) -> Result<ParseSummary, DriverError> {
    let inputs = paths
        .iter()
        .map(|path| Ok((path.clone(), read_file(path)?)))
        .collect::<Result<Vec<_>, DriverError>>()?;

    let files = parse_sources(inputs, config)?;
    let mut summary = ParseSummary {
        files: files.len(),
        errors: 0,
    };
    for file in &files {
        if dump_tree {
            print!("{}", tree_report(file, config.trivia));
        } else {
            print!("{}", summary_report(file));
        }
        summary.errors += emit_diagnostics(
            &file.path,
            &file.source,
            &file.parse.diagnostics,
            config.color,
        );
    }
    Ok(summary)
}
