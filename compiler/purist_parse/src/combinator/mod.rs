//! Grammar values.
//!
//! A [`Parser`] is an immutable, cheaply cloned handle to one node of a
//! grammar graph. Nodes form a closed set of kinds ([`Kind`]) evaluated by a
//! single `match` (see `eval.rs`). Everything the engine needs to decide
//! without running a parser is computed once, when the node is built:
//!
//! - the FIRST set (which token kinds can start a match)
//! - whether the node can succeed without consuming
//! - the "expected ..." descriptions it contributes to diagnostics
//! - for wide choices, a dispatch table indexed by token kind
//!
//! Recursive grammars go through [`reference`]: the builder runs on first
//! use and receives a weak handle to the rule itself, so the graph never
//! owns a cycle of strong references.

mod eval;

use std::fmt;
use std::ops::{Add, BitOr};
use std::sync::{Arc, OnceLock, Weak};

use purist_ir::{SyntaxKind, TokenKind, TokenSet};
use smallvec::SmallVec;

use crate::context::ParseContext;

/// Choices with at least this many alternatives get a dispatch table.
pub const DISPATCH_THRESHOLD: usize = 4;

/// Tokens a parser can start with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FirstSet {
    Tokens(TokenSet),
    /// Not statically known, e.g. a literal-text match or a lazy rule.
    Any,
}

impl FirstSet {
    pub const EMPTY: FirstSet = FirstSet::Tokens(TokenSet::new());

    #[must_use]
    pub fn union(self, other: FirstSet) -> FirstSet {
        match (self, other) {
            (FirstSet::Tokens(a), FirstSet::Tokens(b)) => FirstSet::Tokens(a.union(b)),
            _ => FirstSet::Any,
        }
    }

    /// Whether a parser with this FIRST set may start at `kind`.
    #[inline]
    pub fn admits(self, kind: TokenKind) -> bool {
        match self {
            FirstSet::Tokens(set) => set.contains(kind),
            FirstSet::Any => true,
        }
    }
}

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;
type Filter = Box<dyn Fn(&ParseContext<'_>) -> bool + Send + Sync>;
type Builder = Box<dyn Fn(Parser) -> Parser + Send + Sync>;
type Capturer = Box<dyn Fn(&str) -> Parser + Send + Sync>;

/// Candidate alternatives per token kind, in declaration order.
type DispatchTable = Box<[SmallVec<[u16; 4]>]>;

pub(crate) enum Kind {
    Token(TokenKind),
    Literal(Box<str>),
    Seq(Box<[Parser]>),
    Choice {
        alternatives: Box<[Parser]>,
        dispatch: Option<DispatchTable>,
    },
    Many {
        child: Parser,
        min: usize,
    },
    Optional(Parser),
    Attempt(Parser),
    Heal(Parser),
    Guard {
        child: Parser,
        message: Box<str>,
        predicate: Predicate,
    },
    Node {
        child: Parser,
        kind: SyntaxKind,
    },
    Labeled {
        child: Parser,
        label: Box<str>,
    },
    Relax {
        child: Parser,
        message: Box<str>,
    },
    RelaxTo {
        child: Parser,
        sync: Parser,
        message: Box<str>,
    },
    Fold {
        kind: SyntaxKind,
        start: Parser,
        next: Parser,
    },
    Continuation {
        kind: SyntaxKind,
        init: Parser,
        cont: Parser,
    },
    Reference {
        name: Box<str>,
        builder: Builder,
        cell: OnceLock<Parser>,
    },
    Rule {
        target: Weak<ParserNode>,
        name: Box<str>,
    },
    Succeed,
    Lookahead {
        child: Parser,
        filter: Filter,
    },
    Capture {
        name: Box<str>,
        build: Capturer,
    },
}

pub(crate) struct ParserNode {
    kind: Kind,
    first: FirstSet,
    nullable: bool,
    expected: Box<[Arc<str>]>,
    name: OnceLock<Box<str>>,
}

/// Handle to an immutable grammar node.
#[derive(Clone)]
pub struct Parser(Arc<ParserNode>);

impl Parser {
    fn build(kind: Kind) -> Parser {
        let (first, nullable) = derive_first(&kind);
        let expected = derive_expected(&kind);
        Parser(Arc::new(ParserNode {
            kind,
            first,
            nullable,
            expected,
            name: OnceLock::new(),
        }))
    }

    pub(crate) fn kind(&self) -> &Kind {
        &self.0.kind
    }

    pub fn first_set(&self) -> FirstSet {
        self.0.first
    }

    /// Whether this parser can succeed without consuming a token.
    pub fn is_nullable(&self) -> bool {
        self.0.nullable
    }

    /// What this parser reports as expected when it fails at its start.
    pub fn expected_descriptions(&self) -> &[Arc<str>] {
        &self.0.expected
    }

    /// Short debug label.
    pub fn name(&self) -> &str {
        self.0.name.get_or_init(|| derive_name(&self.0.kind))
    }

    pub fn has_dispatch_table(&self) -> bool {
        matches!(
            self.0.kind,
            Kind::Choice {
                dispatch: Some(_),
                ..
            }
        )
    }

    pub fn ptr_eq(&self, other: &Parser) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// A non-owning handle to this node, for rules that refer to
    /// themselves or to each other.
    pub fn downgrade(&self, name: &str) -> Parser {
        Parser::build(Kind::Rule {
            target: Arc::downgrade(&self.0),
            name: name.into(),
        })
    }

    /// Whether the current token can start this parser.
    #[inline]
    pub(crate) fn can_start(&self, kind: TokenKind) -> bool {
        self.0.nullable || self.0.first.admits(kind)
    }

    // --- Postfix builders ---

    #[must_use]
    pub fn many(self) -> Parser {
        Parser::build(Kind::Many {
            child: self,
            min: 0,
        })
    }

    #[must_use]
    pub fn many1(self) -> Parser {
        Parser::build(Kind::Many {
            child: self,
            min: 1,
        })
    }

    #[must_use]
    pub fn optional(self) -> Parser {
        Parser::build(Kind::Optional(self))
    }

    /// Roll back completely on failure, even after consuming.
    #[must_use]
    pub fn attempt(self) -> Parser {
        Parser::build(Kind::Attempt(self))
    }

    /// Like [`attempt`](Self::attempt), but recovery inside the child stays
    /// enabled.
    #[must_use]
    pub fn heal(self) -> Parser {
        if matches!(self.0.kind, Kind::Heal(_) | Kind::Token(_)) {
            return self;
        }
        Parser::build(Kind::Heal(self))
    }

    /// Reject a match whose consumed text fails `predicate`.
    #[must_use]
    pub fn guard(
        self,
        message: &str,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Parser {
        Parser::build(Kind::Guard {
            child: self,
            message: message.into(),
            predicate: Box::new(predicate),
        })
    }

    /// Wrap a successful match in a node of the given kind.
    #[must_use]
    pub fn node(self, kind: SyntaxKind) -> Parser {
        Parser::build(Kind::Node { child: self, kind })
    }

    /// Report `label` instead of the child's own expectations.
    #[must_use]
    pub fn labeled(self, label: &str) -> Parser {
        Parser::build(Kind::Labeled {
            child: self,
            label: label.into(),
        })
    }

    /// Succeed even if the child fails, recording `message`.
    #[must_use]
    pub fn relax(self, message: &str) -> Parser {
        Parser::build(Kind::Relax {
            child: self,
            message: message.into(),
        })
    }

    /// Succeed even if the child fails, skipping input up to `sync`.
    #[must_use]
    pub fn relax_to(self, sync: Parser, message: &str) -> Parser {
        Parser::build(Kind::RelaxTo {
            child: self,
            sync,
            message: message.into(),
        })
    }

    /// `self (sep self)*`. A trailing separator is left unconsumed.
    #[must_use]
    pub fn sep_by1(self, sep: Parser) -> Parser {
        let rest = seq(sep, self.clone()).heal().many();
        seq(self, rest)
    }

    #[must_use]
    pub fn sep_by(self, sep: Parser) -> Parser {
        self.sep_by1(sep).optional()
    }

    #[must_use]
    pub fn comma_sep(self) -> Parser {
        self.sep_by(token(TokenKind::Comma))
    }

    #[must_use]
    pub fn comma_sep1(self) -> Parser {
        self.sep_by1(token(TokenKind::Comma))
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Add for Parser {
    type Output = Parser;

    fn add(self, rhs: Parser) -> Parser {
        seq(self, rhs)
    }
}

impl BitOr for Parser {
    type Output = Parser;

    fn bitor(self, rhs: Parser) -> Parser {
        choice([self, rhs])
    }
}

// --- Constructors ---

/// Match one token of the given kind.
pub fn token(kind: TokenKind) -> Parser {
    Parser::build(Kind::Token(kind))
}

/// Match a token by its exact text.
pub fn literal(text: &str) -> Parser {
    Parser::build(Kind::Literal(text.into()))
}

pub fn seq(first: Parser, second: Parser) -> Parser {
    sequence([first, second])
}

/// Match every parser in order. Nested sequences are flattened.
pub fn sequence(parsers: impl IntoIterator<Item = Parser>) -> Parser {
    let mut flat = Vec::new();
    for p in parsers {
        match &p.0.kind {
            Kind::Seq(children) => flat.extend(children.iter().cloned()),
            _ => flat.push(p),
        }
    }
    if flat.len() == 1 {
        if let Some(only) = flat.pop() {
            return only;
        }
    }
    Parser::build(Kind::Seq(flat.into_boxed_slice()))
}

/// Committed choice. Nested choices are flattened; wide choices get a
/// dispatch table.
pub fn choice(alternatives: impl IntoIterator<Item = Parser>) -> Parser {
    let mut flat: Vec<Parser> = Vec::new();
    for p in alternatives {
        match &p.0.kind {
            Kind::Choice { alternatives, .. } => flat.extend(alternatives.iter().cloned()),
            _ => flat.push(p),
        }
    }
    if flat.len() == 1 {
        if let Some(only) = flat.pop() {
            return only;
        }
    }
    let dispatch = (flat.len() >= DISPATCH_THRESHOLD).then(|| build_dispatch(&flat));
    Parser::build(Kind::Choice {
        alternatives: flat.into_boxed_slice(),
        dispatch,
    })
}

fn build_dispatch(alternatives: &[Parser]) -> DispatchTable {
    let mut table = vec![SmallVec::new(); TokenKind::COUNT];
    for (index, alt) in alternatives.iter().enumerate() {
        let Ok(index) = u16::try_from(index) else {
            break;
        };
        for (slot, kind) in table.iter_mut().zip(TokenKind::ALL) {
            if alt.can_start(kind) {
                slot.push(index);
            }
        }
    }
    table.into_boxed_slice()
}

/// Always succeeds without consuming.
pub fn succeed() -> Parser {
    Parser::build(Kind::Succeed)
}

/// A lazily built rule. `builder` runs once, on first use, and receives a
/// weak handle to the rule for recursion.
pub fn reference(
    name: &str,
    builder: impl Fn(Parser) -> Parser + Send + Sync + 'static,
) -> Parser {
    Parser::build(Kind::Reference {
        name: name.into(),
        builder: Box::new(builder),
        cell: OnceLock::new(),
    })
}

/// `start next*`, each `next` wrapping everything before it in `kind`.
pub fn fold(kind: SyntaxKind, start: Parser, next: Parser) -> Parser {
    Parser::build(Kind::Fold { kind, start, next })
}

/// `init cont?`, wrapped in `kind` only when `cont` matched.
pub fn continuation(kind: SyntaxKind, init: Parser, cont: Parser) -> Parser {
    Parser::build(Kind::Continuation { kind, init, cont })
}

/// Run `child` only when `filter` holds at the current position.
pub fn lookahead(
    child: Parser,
    filter: impl Fn(&ParseContext<'_>) -> bool + Send + Sync + 'static,
) -> Parser {
    Parser::build(Kind::Lookahead {
        child,
        filter: Box::new(filter),
    })
}

/// Choose the parser to run from the current token's text.
pub fn capture(name: &str, build: impl Fn(&str) -> Parser + Send + Sync + 'static) -> Parser {
    Parser::build(Kind::Capture {
        name: name.into(),
        build: Box::new(build),
    })
}

pub fn parens(inner: Parser) -> Parser {
    sequence([token(TokenKind::LeftParen), inner, token(TokenKind::RightParen)])
}

pub fn squares(inner: Parser) -> Parser {
    sequence([token(TokenKind::LeftSquare), inner, token(TokenKind::RightSquare)])
}

pub fn braces(inner: Parser) -> Parser {
    sequence([token(TokenKind::LeftBrace), inner, token(TokenKind::RightBrace)])
}

// --- Derived properties ---

fn derive_first(kind: &Kind) -> (FirstSet, bool) {
    match kind {
        Kind::Token(kind) => (FirstSet::Tokens(TokenSet::single(*kind)), false),
        Kind::Literal(_) | Kind::Reference { .. } | Kind::Rule { .. } | Kind::Capture { .. } => {
            (FirstSet::Any, false)
        }
        Kind::Seq(children) => {
            let mut first = FirstSet::EMPTY;
            for child in children.iter() {
                first = first.union(child.first_set());
                if !child.is_nullable() {
                    return (first, false);
                }
            }
            (first, true)
        }
        Kind::Choice { alternatives, .. } => alternatives.iter().fold(
            (FirstSet::EMPTY, false),
            |(first, nullable), alt| (first.union(alt.first_set()), nullable || alt.is_nullable()),
        ),
        Kind::Many { child, min } => (child.first_set(), *min == 0 || child.is_nullable()),
        Kind::Optional(child) => (child.first_set(), true),
        Kind::Relax { child, .. } => (child.first_set(), true),
        Kind::RelaxTo { .. } => (FirstSet::Any, true),
        Kind::Attempt(child)
        | Kind::Heal(child)
        | Kind::Guard { child, .. }
        | Kind::Node { child, .. }
        | Kind::Labeled { child, .. }
        | Kind::Lookahead { child, .. }
        | Kind::Fold { start: child, .. }
        | Kind::Continuation { init: child, .. } => (child.first_set(), child.is_nullable()),
        Kind::Succeed => (FirstSet::EMPTY, true),
    }
}

fn derive_expected(kind: &Kind) -> Box<[Arc<str>]> {
    let mut expected: Vec<Arc<str>> = match kind {
        Kind::Token(kind) => vec![Arc::from(kind.display_name())],
        Kind::Literal(text) => vec![Arc::from(&**text)],
        Kind::Labeled { label, .. } => vec![Arc::from(&**label)],
        Kind::Reference { name, .. } | Kind::Rule { name, .. } | Kind::Capture { name, .. } => {
            vec![Arc::from(&**name)]
        }
        Kind::Seq(children) => {
            let mut expected = Vec::new();
            for child in children.iter() {
                expected.extend(child.expected_descriptions().iter().cloned());
                if !child.is_nullable() {
                    break;
                }
            }
            expected
        }
        Kind::Choice { alternatives, .. } => alternatives
            .iter()
            .flat_map(|alt| alt.expected_descriptions().iter().cloned())
            .collect(),
        Kind::Many { child, .. }
        | Kind::Optional(child)
        | Kind::Attempt(child)
        | Kind::Heal(child)
        | Kind::Guard { child, .. }
        | Kind::Node { child, .. }
        | Kind::Relax { child, .. }
        | Kind::RelaxTo { child, .. }
        | Kind::Lookahead { child, .. }
        | Kind::Fold { start: child, .. }
        | Kind::Continuation { init: child, .. } => child.expected_descriptions().to_vec(),
        Kind::Succeed => Vec::new(),
    };
    expected.sort_unstable();
    expected.dedup();
    expected.into_boxed_slice()
}

fn derive_name(kind: &Kind) -> Box<str> {
    let joined = |parts: &[Parser], sep: &str| {
        parts
            .iter()
            .map(Parser::name)
            .collect::<Vec<_>>()
            .join(sep)
    };
    let name = match kind {
        Kind::Token(kind) => format!("{kind:?}"),
        Kind::Literal(text) => format!("{text:?}"),
        Kind::Seq(children) => format!("({})", joined(children, " + ")),
        Kind::Choice { alternatives, .. } => format!("({})", joined(alternatives, " | ")),
        Kind::Many { child, min: 0 } => format!("many({})", child.name()),
        Kind::Many { child, .. } => format!("many1({})", child.name()),
        Kind::Optional(child) => format!("optional({})", child.name()),
        Kind::Attempt(child) => format!("attempt({})", child.name()),
        Kind::Heal(child) => format!("heal({})", child.name()),
        Kind::Guard { child, .. } => format!("guard({})", child.name()),
        Kind::Node { kind, .. } => format!("{kind:?}"),
        Kind::Labeled { label, .. } => label.to_string(),
        Kind::Relax { child, .. } => format!("relax({})", child.name()),
        Kind::RelaxTo { child, sync, .. } => {
            format!("relax_to({}, {})", child.name(), sync.name())
        }
        Kind::Fold { kind, .. } => format!("fold({kind:?})"),
        Kind::Continuation { kind, .. } => format!("continuation({kind:?})"),
        Kind::Reference { name, .. } | Kind::Rule { name, .. } | Kind::Capture { name, .. } => {
            name.to_string()
        }
        Kind::Succeed => "succeed".to_string(),
        Kind::Lookahead { child, .. } => format!("lookahead({})", child.name()),
    };
    name.into_boxed_str()
}

#[cfg(test)]
mod tests;
