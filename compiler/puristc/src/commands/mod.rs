//! Command handlers for the `purist` CLI.
//!
//! Each submodule implements one command. Handlers that print return the
//! text they would print from a `*_report` function, so output is
//! testable; the `*_file(s)` wrappers do the I/O.

mod debug;
mod explain;
mod parse;

pub use debug::{layout_file, layout_report, lex_file, lex_report};
pub use explain::{explain_error, explain_report};
pub use parse::{
    parse_files, parse_sources, summary_report, tree_report, FileParse, ParseSummary,
};

use std::io::{IsTerminal, Read};

use purist_diagnostic::emitter::{ColorMode, DiagnosticEmitter, SourceFile, TerminalEmitter};
use purist_diagnostic::Diagnostic;

use crate::DriverError;

/// Read a source file; `-` reads standard input.
pub fn read_file(path: &str) -> Result<String, DriverError> {
    if path == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| DriverError::from_io(path, e))?;
        return Ok(content);
    }
    std::fs::read_to_string(path).map_err(|e| DriverError::from_io(path, e))
}

/// Render `diagnostics` for `path` to stderr. Returns the error count.
pub(crate) fn emit_diagnostics(
    path: &str,
    source: &str,
    diagnostics: &[Diagnostic],
    color: ColorMode,
) -> usize {
    if diagnostics.is_empty() {
        return 0;
    }
    let is_tty = std::io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::stderr(color, is_tty).with_source(SourceFile::new(path, source));
    emitter.emit_all(diagnostics);
    emitter.flush();
    diagnostics.iter().filter(|d| d.is_error()).count()
}
