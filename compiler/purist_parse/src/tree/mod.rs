//! Lossless syntax tree.
//!
//! Every token the layout pass produced ends up as a leaf, trivia and
//! zero-width layout tokens included, so concatenating the leaf texts gives
//! back the source. Interior nodes carry a [`SyntaxKind`] and the span of
//! their children.

mod builder;

pub(crate) use builder::build;

use std::fmt::{self, Write as _};
use std::mem;

use purist_ir::{Span, SyntaxKind, TokenKind};
use purist_stack::ensure_sufficient_stack;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxTree {
    root: SyntaxNode,
    source: String,
}

impl SyntaxTree {
    pub fn new(root: SyntaxNode, source: impl Into<String>) -> Self {
        SyntaxTree {
            root,
            source: source.into(),
        }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Text of a token in this tree.
    pub fn token_text(&self, token: &SyntaxToken) -> &str {
        self.source.get(token.span.to_range()).unwrap_or("")
    }

    /// Concatenated text of every leaf, in order.
    pub fn text(&self) -> String {
        let mut text = String::with_capacity(self.source.len());
        for token in self.root.tokens() {
            text.push_str(self.token_text(token));
        }
        text
    }

    /// Indented dump: one line per node or token, trivia omitted unless
    /// `with_trivia` is set.
    pub fn debug_dump(&self, with_trivia: bool) -> String {
        let mut out = String::new();
        self.dump_node_line(&self.root, 0, &mut out);
        let mut stack: Vec<(&SyntaxElement, usize)> =
            self.root.children.iter().rev().map(|c| (c, 1)).collect();
        while let Some((element, depth)) = stack.pop() {
            match element {
                SyntaxElement::Node(node) => {
                    self.dump_node_line(node, depth, &mut out);
                    stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
                }
                SyntaxElement::Token(token) => {
                    if token.kind.is_trivia() && !with_trivia {
                        continue;
                    }
                    let _ = writeln!(
                        out,
                        "{:indent$}{:?}@{}..{} {:?}",
                        "",
                        token.kind,
                        token.span.start,
                        token.span.end,
                        self.token_text(token),
                        indent = depth * 2
                    );
                }
            }
        }
        out
    }

    fn dump_node_line(&self, node: &SyntaxNode, depth: usize, out: &mut String) {
        let _ = writeln!(
            out,
            "{:indent$}{:?}@{}..{}",
            "",
            node.kind,
            node.span.start,
            node.span.end,
            indent = depth * 2
        );
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.debug_dump(false))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(SyntaxToken),
}

impl SyntaxElement {
    pub fn span(&self) -> Span {
        match self {
            SyntaxElement::Node(node) => node.span,
            SyntaxElement::Token(token) => token.span,
        }
    }
}

/// An interior node.
///
/// Trees are as deep as the input is nested, so dropping is iterative and
/// the structural impls (`Clone`, `PartialEq`, `Debug`) grow the stack as
/// they descend.
pub struct SyntaxNode {
    pub kind: SyntaxKind,
    pub span: Span,
    pub children: Vec<SyntaxElement>,
}

impl Drop for SyntaxNode {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.children);
        while let Some(element) = pending.pop() {
            if let SyntaxElement::Node(mut node) = element {
                pending.append(&mut node.children);
            }
        }
    }
}

impl Clone for SyntaxNode {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| SyntaxNode {
            kind: self.kind,
            span: self.span,
            children: self.children.clone(),
        })
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| {
            self.kind == other.kind && self.span == other.span && self.children == other.children
        })
    }
}

impl Eq for SyntaxNode {}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| {
            f.debug_struct("SyntaxNode")
                .field("kind", &self.kind)
                .field("span", &self.span)
                .field("children", &self.children)
                .finish()
        })
    }
}

impl SyntaxNode {
    /// Direct child nodes.
    pub fn child_nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(|c| match c {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        })
    }

    /// Direct child tokens, trivia included.
    pub fn child_tokens(&self) -> impl Iterator<Item = &SyntaxToken> {
        self.children.iter().filter_map(|c| match c {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(_) => None,
        })
    }

    /// This node and every node below it, in preorder.
    pub fn descendants(&self) -> Vec<&SyntaxNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            let start = stack.len();
            stack.extend(node.child_nodes());
            stack[start..].reverse();
        }
        out
    }

    /// Every leaf below this node, in source order.
    pub fn tokens(&self) -> Vec<&SyntaxToken> {
        let mut out = Vec::new();
        let mut stack: Vec<&SyntaxElement> = self.children.iter().rev().collect();
        while let Some(element) = stack.pop() {
            match element {
                SyntaxElement::Token(token) => out.push(token),
                SyntaxElement::Node(node) => stack.extend(node.children.iter().rev()),
            }
        }
        out
    }

    /// Every leaf that is not trivia.
    pub fn significant_tokens(&self) -> Vec<&SyntaxToken> {
        let mut tokens = self.tokens();
        tokens.retain(|t| !t.kind.is_trivia());
        tokens
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyntaxToken {
    pub kind: TokenKind,
    pub span: Span,
}
