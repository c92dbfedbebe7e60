//! The layout pass: one table lookup and one fold step per token.

use purist_ir::{RawToken, SourcePos, TokenKind};
use tracing::debug;

use crate::state::{indented, offside, offside_end};
use crate::{LayoutAction, LayoutDelimiter, LayoutRules, LayoutStack, LayoutState, LayoutToken};

/// The layout-annotated token stream.
///
/// `tokens[i]` was emitted while `stacks[i]` was the layout stack.
#[derive(Clone, Debug, Default)]
pub struct LayoutOutput {
    pub tokens: Vec<LayoutToken>,
    pub stacks: Vec<LayoutStack>,
}

impl LayoutOutput {
    /// Tokens the parser consumes: everything but trivia.
    pub fn significant(&self) -> impl Iterator<Item = &LayoutToken> {
        self.tokens.iter().filter(|t| !t.is_trivia())
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.significant().map(LayoutToken::kind).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Run the layout pass over a lexed token stream.
///
/// `tokens` must be in source order; trivia is passed through in place.
/// `eof` is the position just past the input, where the blocks still open
/// at the end are closed.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn layout(tokens: &[RawToken], eof: SourcePos, rules: &LayoutRules) -> LayoutOutput {
    let mut state = LayoutState::new();
    let mut following = tokens
        .iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| t.start)
        .skip(1);

    for &token in tokens {
        if token.kind.is_trivia() {
            state.insert_trivia(token);
            continue;
        }
        let next_pos = following.next().unwrap_or(eof);
        state.insert_layout(token, next_pos, rules.action(token.kind));
    }
    state.unwind(eof);

    let (tokens, stacks): (Vec<_>, Vec<_>) = state.into_output().into_iter().unzip();
    debug!(
        emitted = tokens.len(),
        blocks = tokens
            .iter()
            .filter(|t| matches!(t, LayoutToken::Start(_)))
            .count(),
        "layout done"
    );
    LayoutOutput { tokens, stacks }
}

impl LayoutState {
    /// Fold one significant token into the state.
    ///
    /// `next_pos` is the position of the following significant token (or
    /// end of input); blocks opened by `token` start there.
    pub fn insert_layout(&mut self, token: RawToken, next_pos: SourcePos, action: LayoutAction) {
        use LayoutDelimiter as D;

        let pos = token.start;
        let raw = LayoutToken::Raw(token);
        match action {
            LayoutAction::Default => {
                self.insert_default(token);
                if self.stack().is_top_decl(pos) {
                    self.push_stack(pos, D::TopDecl);
                }
            }
            LayoutAction::Label => {
                self.insert_default(token);
                if self.stack().is_top_decl(pos) {
                    self.push_stack(pos, D::TopDecl);
                } else {
                    self.pop_stack(|d| d == D::Property);
                }
            }
            LayoutAction::DeclHead => {
                self.insert_default(token);
                if self.stack().is_top_decl(pos) {
                    self.push_stack(pos, D::TopDeclHead);
                } else {
                    self.pop_stack(|d| d == D::Property);
                }
            }
            LayoutAction::Where => match self.stack().delimiter() {
                D::TopDeclHead => {
                    self.pop_stack(|_| true);
                    self.insert_token(raw);
                    self.insert_start(next_pos, D::Where);
                }
                D::Property => {
                    self.pop_stack(|_| true);
                    self.insert_token(raw);
                }
                _ => {
                    // `where` closes `do` blocks outright and any block it
                    // does not sit strictly inside of.
                    self.collapse(pos, |tok, frame, d| {
                        d == D::Do || offside_end(tok, frame, d)
                    });
                    self.insert_token(raw);
                    self.insert_start(next_pos, D::Where);
                }
            },
            LayoutAction::In => {
                let in_closes = |_: SourcePos, _: SourcePos, d: D| {
                    d.is_indent() && !matches!(d, D::Let | D::LetStmt | D::Ado)
                };
                let closed = self.collapsed(pos, in_closes);
                let below = closed.tail().map(LayoutStack::delimiter);
                match (closed.delimiter(), below) {
                    // `in` always ends an `ado`, along with its trailing `let`.
                    (D::LetStmt, Some(D::Ado)) => {
                        self.collapse(pos, in_closes);
                        self.pop_stack(|_| true);
                        self.pop_stack(|_| true);
                        self.insert_end(pos);
                        self.insert_end(pos);
                        self.insert_token(raw);
                    }
                    (d, _) if d.is_indent() => {
                        self.collapse(pos, in_closes);
                        self.pop_stack(|_| true);
                        self.insert_end(pos);
                        self.insert_token(raw);
                    }
                    _ => {
                        self.insert_default(token);
                        self.pop_stack(|d| d == D::Property);
                    }
                }
            }
            LayoutAction::Let => self.insert_kw_property(token, |state| {
                let top = state.stack();
                let in_statement = matches!(top.delimiter(), D::Do | D::Ado)
                    && top.pos().column == pos.column;
                let block = if in_statement { D::LetStmt } else { D::Let };
                state.insert_start(next_pos, block);
            }),
            LayoutAction::Do => {
                self.insert_kw_property(token, |state| state.insert_start(next_pos, D::Do));
            }
            LayoutAction::Ado => {
                self.insert_kw_property(token, |state| state.insert_start(next_pos, D::Ado));
            }
            LayoutAction::Case => {
                self.insert_kw_property(token, |state| state.push_stack(pos, D::Case));
            }
            LayoutAction::Of => {
                self.collapse(pos, indented);
                if self.stack().delimiter() == D::Case {
                    self.pop_stack(|_| true);
                    self.insert_token(raw);
                    self.insert_start(next_pos, D::Of);
                    self.push_stack(next_pos, D::CaseBinders);
                } else {
                    self.insert_default(token);
                    self.pop_stack(|d| d == D::Property);
                }
            }
            LayoutAction::If => {
                self.insert_kw_property(token, |state| state.push_stack(pos, D::If));
            }
            LayoutAction::Then => {
                if self.collapsed(pos, indented).delimiter() == D::If {
                    self.collapse(pos, indented);
                    self.pop_stack(|_| true);
                    self.insert_token(raw);
                    self.push_stack(pos, D::Then);
                } else {
                    self.insert_default(token);
                    self.pop_stack(|d| d == D::Property);
                }
            }
            LayoutAction::Else => {
                if self.collapsed(pos, indented).delimiter() == D::Then {
                    self.collapse(pos, indented);
                    self.pop_stack(|_| true);
                    self.insert_token(raw);
                } else {
                    self.collapse(pos, offside);
                    if self.at_instance_chain(pos) {
                        self.insert_token(raw);
                    } else {
                        self.insert_sep(pos);
                        self.insert_token(raw);
                        self.pop_stack(|d| d == D::Property);
                    }
                }
            }
            LayoutAction::Forall => {
                self.insert_kw_property(token, |state| state.push_stack(pos, D::Forall));
            }
            LayoutAction::Backslash => {
                self.insert_default(token);
                self.push_stack(pos, D::LambdaBinders);
            }
            LayoutAction::Arrow => {
                self.collapse(pos, |tok, frame, d| match d {
                    D::Do => true,
                    D::Of => false,
                    _ => offside_end(tok, frame, d),
                });
                self.pop_stack(|d| matches!(d, D::CaseBinders | D::CaseGuard | D::LambdaBinders));
                self.insert_token(raw);
            }
            LayoutAction::Equals => {
                let equals_closes =
                    |_: SourcePos, _: SourcePos, d: D| matches!(d, D::Where | D::Let | D::LetStmt);
                if self.collapsed(pos, equals_closes).delimiter() == D::DeclGuard {
                    self.collapse(pos, equals_closes);
                    self.pop_stack(|_| true);
                    self.insert_token(raw);
                } else {
                    self.insert_default(token);
                }
            }
            LayoutAction::Pipe => match self.collapsed(pos, offside_end).delimiter() {
                D::Of => {
                    self.collapse(pos, offside_end);
                    self.push_stack(pos, D::CaseGuard);
                    self.insert_token(raw);
                }
                D::Let | D::LetStmt | D::Where => {
                    self.collapse(pos, offside_end);
                    self.push_stack(pos, D::DeclGuard);
                    self.insert_token(raw);
                }
                _ => self.insert_default(token),
            },
            LayoutAction::Tick => {
                if self.collapsed(pos, indented).delimiter() == D::Tick {
                    self.collapse(pos, indented);
                    self.pop_stack(|_| true);
                    self.insert_token(raw);
                } else {
                    self.collapse(pos, offside_end);
                    self.insert_sep(pos);
                    self.insert_token(raw);
                    self.push_stack(pos, D::Tick);
                }
            }
            LayoutAction::Comma => {
                self.collapse(pos, indented);
                self.insert_token(raw);
                // Record fields: the next token is a label.
                if self.stack().delimiter() == D::Brace {
                    self.push_stack(pos, D::Property);
                }
            }
            LayoutAction::Dot => {
                self.insert_default(token);
                if self.stack().delimiter() == D::Forall {
                    self.pop_stack(|_| true);
                } else {
                    self.push_stack(pos, D::Property);
                }
            }
            LayoutAction::OpenParen => {
                self.insert_default(token);
                self.push_stack(pos, D::Paren);
            }
            LayoutAction::OpenBrace => {
                self.insert_default(token);
                self.push_stack(pos, D::Brace);
                self.push_stack(pos, D::Property);
            }
            LayoutAction::OpenSquare => {
                self.insert_default(token);
                self.push_stack(pos, D::Square);
            }
            LayoutAction::CloseParen => {
                self.collapse(pos, indented);
                self.pop_stack(|d| d == D::Paren);
                self.insert_token(raw);
            }
            LayoutAction::CloseBrace => {
                self.collapse(pos, indented);
                self.pop_stack(|d| d == D::Property);
                self.pop_stack(|d| d == D::Brace);
                self.insert_token(raw);
            }
            LayoutAction::CloseSquare => {
                self.collapse(pos, indented);
                self.pop_stack(|d| d == D::Square);
                self.insert_token(raw);
            }
            LayoutAction::Operator => {
                self.collapse(pos, offside_end);
                self.insert_sep(pos);
                self.insert_token(raw);
            }
        }
    }

    /// An `else` between top-level instances, with or without the previous
    /// instance's declaration frame still open.
    fn at_instance_chain(&self, pos: SourcePos) -> bool {
        let stack = self.stack();
        stack.is_top_decl(pos)
            || (matches!(
                stack.delimiter(),
                LayoutDelimiter::TopDecl | LayoutDelimiter::TopDeclHead
            ) && stack.pop().is_top_decl(pos))
    }
}
