//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.
//! When the emitter knows the source file, labels are rendered as
//! `path:line:column` with the offending line and a caret underline;
//! otherwise it falls back to raw byte spans.

use std::io::{self, Write};

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label, Severity};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse a `--color=` value.
    pub fn parse(value: &str) -> Option<ColorMode> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// A source file the emitter can quote from.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub path: String,
    pub text: String,
    lines: LineOffsetTable,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = LineOffsetTable::build(&text);
        SourceFile {
            path: path.into(),
            text,
            lines,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<SourceFile>,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Quote snippets from `source` when rendering labels.
    #[must_use]
    pub fn with_source(mut self, source: SourceFile) -> Self {
        self.source = Some(source);
        self
    }

    /// Swap the quoted source file, e.g. between files of one run.
    pub fn set_source(&mut self, source: Option<SourceFile>) {
        self.source = source;
    }

    /// Recover the writer, e.g. to inspect buffered output.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn write_code(&mut self, code: &str) {
        self.write_colored(&format!("[{code}]"), colors::BOLD);
    }

    fn write_label(&mut self, label: &Label) {
        let color = if label.is_primary {
            colors::ERROR
        } else {
            colors::SECONDARY
        };
        let marker = if label.is_primary { "-->" } else { ":::" };

        let Some(source) = self.source.take() else {
            let _ = write!(self.writer, "  {marker} {:?}: ", label.span);
            self.write_colored(&label.message, color);
            let _ = writeln!(self.writer);
            return;
        };

        let (line, col) = source.lines.offset_to_line_col(&source.text, label.span.start);
        let line_text = source.lines.line_text(&source.text, line).unwrap_or("");
        let gutter = line.to_string();
        let pad = " ".repeat(gutter.len());

        let _ = writeln!(self.writer, "{pad}{marker} {}:{line}:{col}", source.path);
        let _ = writeln!(self.writer, "{pad} |");
        let _ = writeln!(self.writer, "{gutter} | {line_text}");

        // Underline to the end of the span or the end of the line, whichever comes first.
        let lead: String = line_text
            .chars()
            .take((col - 1) as usize)
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        let span_text = source
            .text
            .get(label.span.to_range())
            .unwrap_or("")
            .lines()
            .next()
            .unwrap_or("");
        let width = span_text.chars().count().max(1);
        let underline = if label.is_primary { "^" } else { "-" }.repeat(width);

        let _ = write!(self.writer, "{pad} | {lead}");
        self.write_colored(&format!("{underline} {}", label.message), color);
        let _ = writeln!(self.writer);

        self.source = Some(source);
    }
}

impl TerminalEmitter<io::Stderr> {
    /// Create a terminal emitter for stderr with explicit color mode.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.write_severity(diagnostic.severity);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            self.write_label(label);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count == 0 && warning_count == 0 {
            return;
        }

        if error_count > 0 {
            self.write_colored("error", colors::ERROR);
            let error_part = if error_count == 1 {
                "1 error".to_string()
            } else {
                format!("{error_count} errors")
            };

            if warning_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": found {error_part}; {warning_count} warning{} emitted",
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(self.writer, ": found {error_part}");
            }
        } else {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use pretty_assertions::assert_eq;
    use purist_ir::Span;

    fn sample_diagnostic() -> Diagnostic {
        Diagnostic::error(ErrorCode::E1001)
            .with_message("unexpected `of`, expected expression")
            .with_label(Span::new(6, 8), "expected expression")
            .with_note("blocks must be indented")
    }

    fn render(emitter: TerminalEmitter<Vec<u8>>) -> String {
        String::from_utf8(emitter.into_inner()).unwrap()
    }

    #[test]
    fn test_no_source_falls_back_to_spans() {
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
        emitter.emit(&sample_diagnostic());
        emitter.flush();

        let text = render(emitter);
        assert!(text.contains("error[E1001]: unexpected `of`"));
        assert!(text.contains("--> 6..8: expected expression"));
        assert!(text.contains("= note: blocks must be indented"));
    }

    #[test]
    fn test_snippet_with_source() {
        let source = SourceFile::new("Main.purs", "x = 1\nfoo = of\n");
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
            .with_source(source);
        let diag = Diagnostic::error(ErrorCode::E1001)
            .with_message("unexpected `of`")
            .with_label(Span::new(12, 14), "expected expression");
        emitter.emit(&diag);

        let expected = concat!(
            "error[E1001]: unexpected `of`\n",
            " --> Main.purs:2:7\n",
            "  |\n",
            "2 | foo = of\n",
            "  |       ^^ expected expression\n",
            "\n",
        );
        assert_eq!(render(emitter), expected);
    }

    #[test]
    fn test_zero_width_label_gets_one_caret() {
        let source = SourceFile::new("Main.purs", "f =\n");
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
            .with_source(source);
        let diag = Diagnostic::error(ErrorCode::E1002)
            .with_message("missing body")
            .with_label(Span::point(3), "missing body");
        emitter.emit(&diag);

        let text = render(emitter);
        assert!(text.contains("Main.purs:1:4"), "{text}");
        assert!(text.contains("|    ^ missing body"), "{text}");
    }

    #[test]
    fn test_colors() {
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
        emitter.emit(&sample_diagnostic());
        assert!(render(emitter).contains("\x1b["));

        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Auto, false);
        emitter.emit(&sample_diagnostic());
        assert!(!render(emitter).contains("\x1b["));
    }

    #[test]
    fn test_emit_summary() {
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
        emitter.emit_summary(2, 1);
        assert_eq!(render(emitter), "error: found 2 errors; 1 warning emitted\n");

        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
        emitter.emit_summary(0, 3);
        assert_eq!(render(emitter), "warning: 3 warnings emitted\n");

        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
        emitter.emit_summary(0, 0);
        assert_eq!(render(emitter), "");
    }

    #[test]
    fn test_color_mode_parse() {
        assert_eq!(ColorMode::parse("always"), Some(ColorMode::Always));
        assert_eq!(ColorMode::parse("never"), Some(ColorMode::Never));
        assert_eq!(ColorMode::parse("auto"), Some(ColorMode::Auto));
        assert_eq!(ColorMode::parse("sometimes"), None);
        assert!(ColorMode::Always.should_use_colors(false));
        assert!(!ColorMode::Never.should_use_colors(true));
    }
}
