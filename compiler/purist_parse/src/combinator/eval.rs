//! Evaluation: one arm per parser kind.
//!
//! Every arm returns a [`ParseOutcome`]; nothing unwinds. The rules that
//! keep parsing linear:
//!
//! - a failure that consumed nothing leaves no trace (no tokens, nodes or
//!   diagnostics) and lets the caller try something else
//! - a failure that consumed something commits: it propagates until an
//!   `attempt`, `heal` or recovery combinator absorbs it

use purist_diagnostic::ErrorCode;
use purist_stack::ensure_sufficient_stack;

use super::{Kind, Parser};
use crate::context::{CompletedMarker, ParseContext};
use crate::outcome::ParseOutcome;
use crate::progress::Progress;
use crate::recovery;

impl Parser {
    /// Run this parser at the context's current position.
    pub fn parse(&self, ctx: &mut ParseContext<'_>) -> ParseOutcome {
        ensure_sufficient_stack(|| self.eval(ctx))
    }

    fn eval(&self, ctx: &mut ParseContext<'_>) -> ParseOutcome {
        let start = ctx.position();
        match self.kind() {
            Kind::Token(kind) => {
                if !ctx.eof() && ctx.at(*kind) {
                    ctx.advance();
                    ParseOutcome::success(ctx.position())
                } else {
                    ParseOutcome::failure(start, self)
                }
            }

            Kind::Literal(text) => {
                if !ctx.eof() && ctx.text() == &**text {
                    ctx.advance();
                    ParseOutcome::success(ctx.position())
                } else {
                    ParseOutcome::failure(start, self)
                }
            }

            Kind::Seq(children) => {
                let mut outcome = ParseOutcome::success(start);
                for child in children.iter() {
                    outcome = outcome.merge(child.parse(ctx));
                    if outcome.is_failure() {
                        break;
                    }
                }
                outcome
            }

            Kind::Choice {
                alternatives,
                dispatch,
            } => {
                let Some(table) = dispatch else {
                    return choose(ctx, alternatives.iter(), start);
                };
                let index = usize::from(ctx.current_kind().discriminant_index());
                match table.get(index) {
                    Some(slot) if !slot.is_empty() => choose(
                        ctx,
                        slot.iter().filter_map(|&i| alternatives.get(usize::from(i))),
                        start,
                    ),
                    _ => ParseOutcome::failure(start, self),
                }
            }

            Kind::Many { child, min } => repeat(self, child, *min, ctx),

            Kind::Optional(child) => {
                let tx = ctx.start();
                let outcome = child.parse(ctx);
                if outcome.is_success() || Progress::between(start, ctx.position()).made() {
                    tx.commit(ctx);
                    outcome
                } else {
                    tx.rollback(ctx);
                    outcome.with_success(true)
                }
            }

            Kind::Attempt(child) => {
                if !child.can_start(ctx.current_kind()) {
                    return ParseOutcome::failure(start, self);
                }
                let was_in_attempt = ctx.set_in_attempt(true);
                let outcome = transaction(self, child, ctx);
                ctx.set_in_attempt(was_in_attempt);
                outcome
            }

            Kind::Heal(child) => {
                if !child.can_start(ctx.current_kind()) {
                    return ParseOutcome::failure(start, self);
                }
                transaction(self, child, ctx)
            }

            Kind::Guard {
                child,
                message,
                predicate,
            } => {
                let tx = ctx.start();
                let outcome = child.parse(ctx);
                if outcome.is_failure() {
                    if Progress::between(start, ctx.position()).made() {
                        tx.commit(ctx);
                    } else {
                        tx.rollback(ctx);
                    }
                    return outcome;
                }
                if predicate(ctx.text_between(start, ctx.position())) {
                    tx.commit(ctx);
                    outcome
                } else {
                    tx.rollback(ctx);
                    ParseOutcome::failure_with_message(
                        start,
                        Some(self),
                        ErrorCode::E1004,
                        &**message,
                    )
                }
            }

            Kind::Node { child, kind } => {
                if !child.can_start(ctx.current_kind()) {
                    return ParseOutcome::failure(start, child);
                }
                let marker = ctx.mark();
                let outcome = child.parse(ctx);
                if outcome.is_success() {
                    marker.complete(ctx, *kind);
                } else {
                    marker.abandon(ctx);
                }
                outcome
            }

            Kind::Labeled { child, .. } => {
                let outcome = child.parse(ctx);
                if outcome.is_failure() && outcome.position == start {
                    let relabeled = ParseOutcome::failure(start, self);
                    return match outcome.message {
                        Some(message) => ParseOutcome {
                            message: Some(message),
                            ..relabeled
                        },
                        None => relabeled,
                    };
                }
                outcome
            }

            Kind::Relax { child, message } => recovery::relax(child, message, ctx),

            Kind::RelaxTo {
                child,
                sync,
                message,
            } => recovery::relax_to(child, sync, message, ctx),

            Kind::Fold { kind, start: first, next } => fold(*kind, first, next, ctx),

            Kind::Continuation { kind, init, cont } => {
                let marker = ctx.mark();
                let outcome = init.parse(ctx);
                if outcome.is_failure() {
                    marker.abandon(ctx);
                    return outcome;
                }
                let before = ctx.position();
                let tx = ctx.start();
                let extended = cont.parse(ctx);
                if extended.is_success() {
                    tx.commit(ctx);
                    marker.complete(ctx, *kind);
                    outcome.merge(extended)
                } else {
                    let progress = Progress::between(before, ctx.position());
                    tx.rollback(ctx);
                    marker.abandon(ctx);
                    absorb(outcome, extended, progress)
                }
            }

            Kind::Reference { name, builder, cell } => {
                let rule = cell.get_or_init(|| {
                    tracing::trace!(rule = &**name, "building rule");
                    builder(self.downgrade(name))
                });
                rule.parse(ctx)
            }

            Kind::Rule { target, name } => match target.upgrade() {
                Some(node) => Parser(node).parse(ctx),
                None => ParseOutcome::failure_with_message(
                    start,
                    Some(self),
                    ErrorCode::E9001,
                    format!("rule `{name}` was dropped while still referenced"),
                ),
            },

            Kind::Succeed => ParseOutcome::success(start),

            Kind::Lookahead { child, filter } => {
                if filter(ctx) {
                    child.parse(ctx)
                } else {
                    ParseOutcome::failure(start, self)
                }
            }

            Kind::Capture { build, .. } => {
                if ctx.eof() {
                    return ParseOutcome::failure(start, self);
                }
                build(ctx.text()).parse(ctx)
            }
        }
    }
}

/// Committed choice over `candidates`, in order.
fn choose<'p>(
    ctx: &mut ParseContext<'_>,
    candidates: impl Iterator<Item = &'p Parser>,
    start: usize,
) -> ParseOutcome {
    let mut outcome: Option<ParseOutcome> = None;
    for alt in candidates {
        let tx = ctx.start();
        let attempt = alt.parse(ctx);
        if attempt.is_success() || Progress::between(start, ctx.position()).made() {
            tx.commit(ctx);
            return match outcome {
                Some(previous) => previous.merge(attempt),
                None => attempt,
            };
        }
        tx.rollback(ctx);
        outcome = Some(match outcome {
            Some(previous) => previous.merge(attempt),
            None => attempt,
        });
    }
    outcome.unwrap_or_else(|| ParseOutcome::success(start).with_success(false))
}

/// Run `child` in a transaction that rolls back on any failure.
fn transaction(node: &Parser, child: &Parser, ctx: &mut ParseContext<'_>) -> ParseOutcome {
    let start = ctx.position();
    let tx = ctx.start();
    let outcome = child.parse(ctx);
    if outcome.is_success() {
        tx.commit(ctx);
        return outcome;
    }
    let progress = Progress::between(start, ctx.position());
    tx.rollback(ctx);
    if progress.made() {
        ParseOutcome::failure(start, node)
    } else {
        outcome
    }
}

fn repeat(node: &Parser, child: &Parser, min: usize, ctx: &mut ParseContext<'_>) -> ParseOutcome {
    let mut outcome = ParseOutcome::success(ctx.position());
    let mut count = 0usize;
    loop {
        let before = ctx.position();
        if ctx.eof() {
            if count < min {
                return outcome.merge(ParseOutcome::failure(before, child));
            }
            return outcome;
        }
        let tx = ctx.start();
        let step = child.parse(ctx);
        let progress = Progress::between(before, ctx.position());
        match (step.is_success(), progress) {
            (true, Progress::Made) => {
                tx.commit(ctx);
                outcome = outcome.merge(step);
                count += 1;
            }
            (true, Progress::None) => {
                tx.rollback(ctx);
                tracing::warn!(parser = node.name(), "repetition made no progress");
                return outcome.merge(ParseOutcome::failure_with_message(
                    before,
                    Some(node),
                    ErrorCode::E9001,
                    format!(
                        "grammar error: `{}` repeats a parser that consumed nothing",
                        node.name()
                    ),
                ));
            }
            (false, Progress::Made) => {
                tx.commit(ctx);
                return outcome.merge(step);
            }
            (false, Progress::None) => {
                tx.rollback(ctx);
                let success = count >= min;
                return outcome.merge(step).with_success(success);
            }
        }
    }
}

fn fold(
    kind: purist_ir::SyntaxKind,
    first: &Parser,
    next: &Parser,
    ctx: &mut ParseContext<'_>,
) -> ParseOutcome {
    let marker = ctx.mark();
    let mut outcome = first.parse(ctx);
    if outcome.is_failure() {
        marker.abandon(ctx);
        return outcome;
    }
    let mut pending = Some(marker);
    let mut wrapped: Option<CompletedMarker> = None;
    loop {
        let before = ctx.position();
        if ctx.eof() {
            break;
        }
        let tx = ctx.start();
        let step = next.parse(ctx);
        let progress = Progress::between(before, ctx.position());
        if step.is_success() && progress.made() {
            tx.commit(ctx);
            outcome = outcome.merge(step);
            let marker = match (pending.take(), wrapped) {
                (Some(marker), _) => marker,
                (None, Some(done)) => done.precede(ctx),
                (None, None) => break,
            };
            wrapped = Some(marker.complete(ctx, kind));
        } else {
            tx.rollback(ctx);
            outcome = absorb(outcome, step, progress);
            break;
        }
    }
    if let Some(marker) = pending {
        marker.abandon(ctx);
    }
    outcome
}

/// Fold a rolled-back optional step into a successful outcome. Only
/// zero-progress failures contribute expectations; a step that got further
/// before failing is forgotten along with its tokens.
fn absorb(outcome: ParseOutcome, step: ParseOutcome, progress: Progress) -> ParseOutcome {
    if progress.none() && step.is_failure() {
        outcome.merge(step.with_success(true))
    } else {
        outcome
    }
}
