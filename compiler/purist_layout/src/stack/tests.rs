use super::*;
use pretty_assertions::assert_eq;
use LayoutDelimiter::*;

fn pos(line: u32, column: u32) -> SourcePos {
    SourcePos::new(line, column, 0)
}

#[test]
fn test_root_pops_to_itself() {
    let root = LayoutStack::root();
    assert!(root.is_root());
    assert!(root.pop().ptr_eq(&root));
    assert_eq!(root.depth(), 0);
    assert_eq!(root.delimiter(), Root);
}

#[test]
fn test_push_shares_the_tail() {
    let root = LayoutStack::root();
    let where_block = root.push(pos(2, 1), Where);
    let paren = where_block.push(pos(2, 5), Paren);

    assert_eq!(paren.depth(), 2);
    assert!(paren.pop().ptr_eq(&where_block));
    assert!(where_block.pop().ptr_eq(&root));
    assert_eq!(
        paren.iter().map(|(_, d)| d).collect::<Vec<_>>(),
        vec![Paren, Where, Root]
    );
}

#[test]
fn test_find_returns_topmost_match() {
    let stack = LayoutStack::root()
        .push(pos(1, 1), Where)
        .push(pos(2, 3), Do)
        .push(pos(2, 9), Paren);
    assert_eq!(
        stack.find(LayoutDelimiter::is_indent),
        Some((pos(2, 3), Do))
    );
    assert_eq!(stack.find(|d| d == Brace), None);
}

#[test]
fn test_is_top_decl() {
    let where_block = LayoutStack::root().push(pos(2, 1), Where);
    assert!(where_block.is_top_decl(pos(5, 1)));
    assert!(!where_block.is_top_decl(pos(5, 3)));
    assert!(!where_block.push(pos(5, 1), TopDecl).is_top_decl(pos(6, 1)));
    assert!(!LayoutStack::root().is_top_decl(pos(1, 1)));

    let nested = where_block.push(pos(3, 3), Do).push(pos(4, 1), Where);
    assert!(!nested.is_top_decl(pos(4, 1)));
}

#[test]
fn test_structural_equality() {
    let a = LayoutStack::root().push(pos(1, 1), Where);
    let b = LayoutStack::root().push(pos(1, 1), Where);
    assert_eq!(a, b);
    assert!(!a.ptr_eq(&b));
    assert_ne!(a, b.push(pos(2, 1), TopDecl));
}

#[test]
fn test_deep_stack_drops_without_recursion() {
    let mut stack = LayoutStack::root();
    for column in 0..200_000 {
        stack = stack.push(pos(1, column), Paren);
    }
    assert_eq!(stack.depth(), 200_000);
    drop(stack);
}
