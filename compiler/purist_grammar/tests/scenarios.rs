//! Whole-module scenarios: a realistic program, and the recoveries a
//! broken one should get.

use pretty_assertions::assert_eq;
use purist_diagnostic::ErrorCode;
use purist_grammar::parse_module;
use purist_ir::{Span, SyntaxKind};
use purist_parse::{Parse, SyntaxNode};

const PROGRAM: &str = "\
module Main (main, Shape(..), class Show) where

import Prelude
import Data.Maybe (Maybe(..), fromMaybe) as M

data Shape = Circle Number | Rect Number Number

class Describe a where
  describe :: a -> String

instance describeShape :: Describe Shape where
  describe (Circle r) = \"circle\"
  describe _ = \"rect\"

main :: Effect Unit
main = do
  let n = area 2.0
  log (show n)
  where
  area r = case r of
    0.0 -> 0.0
    x -> x * x
";

fn module_node(result: &Parse) -> &SyntaxNode {
    let root = result.tree.root();
    let Some(module) = root.child_nodes().find(|n| n.kind == SyntaxKind::Module) else {
        panic!("no module in {}", result.tree.debug_dump(false));
    };
    module
}

fn module_children(result: &Parse) -> Vec<SyntaxKind> {
    module_node(result).child_nodes().map(|n| n.kind).collect()
}

fn codes(result: &Parse) -> Vec<ErrorCode> {
    result.diagnostics.iter().map(|d| d.code).collect()
}

fn count(result: &Parse, kind: SyntaxKind) -> usize {
    result
        .tree
        .root()
        .descendants()
        .iter()
        .filter(|n| n.kind == kind)
        .count()
}

#[test]
fn test_program_parses_cleanly() {
    use SyntaxKind::*;
    let result = parse_module(PROGRAM);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    assert_eq!(result.tree.text(), PROGRAM);
    assert_eq!(
        module_children(&result),
        vec![
            ModuleHeader,
            ImportDecl,
            ImportDecl,
            DataDecl,
            ClassDecl,
            InstanceDecl,
            Signature,
            ValueDecl
        ]
    );
    assert_eq!(count(&result, DataCtor), 2);
    assert_eq!(count(&result, CaseBranch), 2);
    assert_eq!(count(&result, WhereBlock), 1);
    assert_eq!(count(&result, DoLet), 1);
    assert_eq!(count(&result, DoDiscard), 1);
}

#[test]
fn test_under_indented_do_body_is_missing() {
    let result = parse_module("module M where\nf = do\ng = 1\n");
    assert_eq!(codes(&result), vec![ErrorCode::E1002]);
    assert_eq!(result.diagnostics[0].message, "missing do statement");
    assert_eq!(count(&result, SyntaxKind::ValueDecl), 2);
}

#[test]
fn test_do_at_end_of_input_is_missing() {
    let result = parse_module("module M where\nf = do");
    assert_eq!(codes(&result), vec![ErrorCode::E1002]);
    assert_eq!(result.diagnostics[0].message, "missing do statement");
}

#[test]
fn test_malformed_declaration_is_skipped() {
    use SyntaxKind::*;
    let source = "module M where\nx = = 1\ny = 2\n";
    let result = parse_module(source);
    assert_eq!(codes(&result), vec![ErrorCode::E1003]);
    assert_eq!(result.diagnostics[0].message, "malformed declaration");
    assert_eq!(result.diagnostics[0].primary_span(), Some(Span::new(15, 22)));
    assert_eq!(module_children(&result), vec![ModuleHeader, Error, ValueDecl]);
    assert_eq!(result.tree.text(), source);
}

#[test]
fn test_trailing_junk_spoils_only_its_declaration() {
    let source = "module M where\nf = 1 )\ng = 2\n";
    let result = parse_module(source);
    assert_eq!(codes(&result), vec![ErrorCode::E1003]);
    assert_eq!(count(&result, SyntaxKind::Error), 1);
    assert_eq!(count(&result, SyntaxKind::ValueDecl), 1);
    assert_eq!(result.tree.text(), source);
}

#[test]
fn test_lex_diagnostics_come_first() {
    let result = parse_module("module M where\nx = \"abc\n");
    assert_eq!(codes(&result), vec![ErrorCode::E0001]);
    assert_eq!(count(&result, SyntaxKind::ValueDecl), 1);
}

#[test]
fn test_parallel_parses_agree() {
    let sources = [
        PROGRAM,
        "module M where\nx = = 1\ny = 2\n",
        "module M where\nf = do\ng = 1\n",
        "module A.B (f) where\nimport C\nf x = x\n",
    ];
    let sequential: Vec<Parse> = sources.iter().map(|s| parse_module(s)).collect();
    let parallel: Vec<Parse> = std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|s| scope.spawn(move || parse_module(s)))
            .collect();
        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(result) => result,
                Err(_) => panic!("parser thread panicked"),
            })
            .collect()
    });
    for (left, right) in sequential.iter().zip(&parallel) {
        assert_eq!(left.tree, right.tree);
        assert_eq!(left.diagnostics, right.diagnostics);
    }
}

#[test]
fn test_deeply_nested_parens_parse_and_drop() {
    let depth = 20_000;
    let source = format!(
        "module M where\nx = {}1{}\n",
        "(".repeat(depth),
        ")".repeat(depth)
    );
    let result = parse_module(&source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    assert_eq!(count(&result, SyntaxKind::ExprParens), depth);
    assert_eq!(result.tree.text(), source);

    let copy = result.tree.clone();
    assert!(copy == result.tree);
    drop(copy);
    drop(result);
}
