//! The `explain` command: describe a diagnostic code.

use purist_diagnostic::ErrorCode;

use crate::DriverError;

/// What `code_str` means and which phase reports it.
pub fn explain_report(code_str: &str) -> Result<String, DriverError> {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        return Err(DriverError::UnknownErrorCode(code_str.to_string()));
    };
    let phase = if code.is_lexer_error() {
        "lexer"
    } else if code.is_parser_error() {
        "parser"
    } else {
        "internal: a bug in the grammar, not in the input"
    };
    Ok(format!("{code}: {}\n  reported by: {phase}\n", code.description()))
}

/// Print the explanation for `code_str`.
pub fn explain_error(code_str: &str) -> Result<(), DriverError> {
    print!("{}", explain_report(code_str)?);
    Ok(())
}
