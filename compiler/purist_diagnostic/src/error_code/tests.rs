use super::*;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    assert_eq!(ErrorCode::E9001.as_str(), "E9001");
}

#[test]
fn test_phase_ranges_are_disjoint() {
    for code in ErrorCode::ALL {
        let phases = [
            code.is_lexer_error(),
            code.is_parser_error(),
            code.is_internal_error(),
        ];
        assert_eq!(
            phases.iter().filter(|p| **p).count(),
            1,
            "{code} must belong to exactly one phase"
        );
    }
}

#[test]
fn test_from_str_round_trips() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
    }
    assert_eq!("e1002".parse::<ErrorCode>(), Ok(ErrorCode::E1002));
    assert_eq!("E4242".parse::<ErrorCode>(), Err(()));
}

#[test]
fn test_descriptions_are_present() {
    for code in ErrorCode::ALL {
        assert!(!code.description().is_empty());
    }
}
