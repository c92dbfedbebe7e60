//! The Purist grammar.
//!
//! Built only from `purist_parse` combinators. One entry parser per
//! syntactic category, plus the layout table that decides which tokens open
//! and close blocks. [`parse_module`] runs the whole front end (lex, layout,
//! parse) with a process-wide [`Grammar`].
//!
//! # Organization
//!
//! - `names`: names, literals and the layout block helpers
//! - `types`: type expressions
//! - `binder`: patterns
//! - `expr`: expressions, `do` statements and guards
//! - `decl`: declarations, imports and the module
//!
//! Rules that recurse into each other (expressions into types, binders and
//! local declarations, and back) are lazy [`reference`]s. Each one builds
//! its body on first use from a shared set of non-owning handles, so the
//! graph has no strong cycles and is immutable once built.

mod binder;
mod decl;
mod expr;
mod layout_rules;
mod names;
mod types;

pub use layout_rules::layout_rules;

use std::sync::{Arc, OnceLock};

use purist_layout::{layout, LayoutRules};
use purist_lexer::lex;
use purist_parse::{reference, Parse, Parser};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Names accepted by [`Grammar::entry`], in the order `help` lists them.
pub const ENTRY_NAMES: [&str; 7] = [
    "module",
    "declaration",
    "import",
    "binding",
    "expr",
    "type",
    "binder",
];

/// Non-owning handles to the recursive rules.
#[derive(Clone)]
pub(crate) struct Rules {
    pub(crate) expr: Parser,
    pub(crate) ty: Parser,
    pub(crate) binder: Parser,
    /// A `let`, `where` or instance binding: signature or value.
    pub(crate) local: Parser,
}

/// The compiled grammar: entry parsers and the layout table.
///
/// Cheap to share; parsing only reads it.
pub struct Grammar {
    module: Parser,
    entries: FxHashMap<&'static str, Parser>,
    layout_rules: LayoutRules,
}

impl Grammar {
    pub fn new() -> Self {
        let slot: Arc<OnceLock<Rules>> = Arc::new(OnceLock::new());
        let expr = recursive(&slot, "expression", expr::expression);
        let ty = recursive(&slot, "type", types::ty);
        let binder = recursive(&slot, "binder", binder::binder);
        let local = recursive(&slot, "local declaration", decl::local_declaration);
        let rules = slot.get_or_init(|| Rules {
            expr: expr.downgrade("expression"),
            ty: ty.downgrade("type"),
            binder: binder.downgrade("binder"),
            local: local.downgrade("local declaration"),
        });

        let declaration = decl::declaration(rules);
        let import = decl::import_declaration();
        let module = decl::module(&declaration, &import);

        // The map owns every recursive rule, which keeps the handles live.
        let mut entries = FxHashMap::default();
        entries.insert("module", module.clone());
        entries.insert("declaration", declaration);
        entries.insert("import", import);
        entries.insert("binding", local);
        entries.insert("expr", expr);
        entries.insert("type", ty);
        entries.insert("binder", binder);
        debug!(entries = entries.len(), "grammar built");

        Grammar {
            module,
            entries,
            layout_rules: layout_rules(),
        }
    }

    /// The entry parser registered under `name`.
    pub fn entry(&self, name: &str) -> Option<&Parser> {
        self.entries.get(name)
    }

    pub fn module(&self) -> &Parser {
        &self.module
    }

    pub fn layout_rules(&self) -> &LayoutRules {
        &self.layout_rules
    }

    /// Lex, lay out and parse `source` with `entry`.
    ///
    /// Lexical diagnostics come first, followed by the parser's.
    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
    pub fn parse(&self, entry: &Parser, source: &str) -> Parse {
        let lexed = lex(source);
        let output = layout(&lexed.tokens, lexed.eof, &self.layout_rules);
        let mut result = purist_parse::parse(entry, source, &output.tokens);
        if !lexed.diagnostics.is_empty() {
            let mut diagnostics = lexed.diagnostics;
            diagnostics.append(&mut result.diagnostics);
            result.diagnostics = diagnostics;
        }
        result
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Grammar::new()
    }
}

/// A lazy rule whose body is built from the shared handles in `slot`.
fn recursive(
    slot: &Arc<OnceLock<Rules>>,
    name: &'static str,
    build: fn(&Rules) -> Parser,
) -> Parser {
    let slot = Arc::clone(slot);
    reference(name, move |_| match slot.get() {
        Some(rules) => build(rules),
        None => unbound(name),
    })
}

/// A handle to a rule that no longer exists. Using it reports a grammar
/// error instead of parsing.
fn unbound(name: &str) -> Parser {
    let rule = reference(name, |_| purist_parse::succeed());
    rule.downgrade(name)
}

static GRAMMAR: OnceLock<Grammar> = OnceLock::new();

/// The process-wide grammar, built on first use.
pub fn grammar() -> &'static Grammar {
    GRAMMAR.get_or_init(Grammar::new)
}

/// Parse a whole module.
pub fn parse_module(source: &str) -> Parse {
    let grammar = grammar();
    grammar.parse(grammar.module(), source)
}

/// Parse `source` as the syntactic category `entry` (see [`ENTRY_NAMES`]).
pub fn parse_entry(entry: &str, source: &str) -> Option<Parse> {
    let grammar = grammar();
    grammar
        .entry(entry)
        .map(|parser| grammar.parse(parser, source))
}
