use super::*;
use pretty_assertions::assert_eq;
use purist_ir::TokenKind;

fn token(kind: TokenKind) -> Parser {
    crate::token(kind)
}

#[test]
fn test_furthest_position_wins() {
    let near = ParseOutcome::failure(2, &token(TokenKind::Comma));
    let far = ParseOutcome::failure(5, &token(TokenKind::Equals));

    let merged = near.clone().merge(far.clone());
    assert_eq!(merged.position, 5);
    assert_eq!(merged.expected_descriptions(), vec!["="]);

    let merged = far.merge(near);
    assert_eq!(merged.position, 5);
    assert_eq!(merged.expected_descriptions(), vec!["="]);
}

#[test]
fn test_equal_positions_union() {
    let a = ParseOutcome::failure(3, &token(TokenKind::Comma));
    let b = ParseOutcome::failure(3, &token(TokenKind::RightParen));
    let c = ParseOutcome::failure(3, &token(TokenKind::Comma));
    let merged = a.merge(b).merge(c);
    assert_eq!(merged.expected_descriptions(), vec![")", ","]);
}

#[test]
fn test_success_comes_from_right_operand() {
    let failed = ParseOutcome::failure(1, &token(TokenKind::Comma));
    let merged = failed.clone().merge(ParseOutcome::success(1));
    assert!(merged.is_success());
    assert_eq!(merged.expected_descriptions(), vec![","]);

    let merged = ParseOutcome::success(1).merge(failed);
    assert!(merged.is_failure());
}

#[test]
fn test_first_message_is_kept() {
    let first = ParseOutcome::failure_with_message(4, None, ErrorCode::E1004, "first");
    let second = ParseOutcome::failure_with_message(4, None, ErrorCode::E9001, "second");
    let merged = first.merge(second);
    assert_eq!(
        merged.message.map(|m| (m.code, m.text.to_string())),
        Some((ErrorCode::E1004, "first".to_string()))
    );
}

#[test]
fn test_message_at_nearer_position_is_dropped() {
    let near = ParseOutcome::failure_with_message(1, None, ErrorCode::E1004, "near");
    let far = ParseOutcome::failure(2, &token(TokenKind::Comma));
    assert_eq!(near.merge(far).message, None);
}
