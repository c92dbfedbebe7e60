//! Hand-written scanner producing one token at a time.
//!
//! Dispatch is on the first character; each arm advances the cursor over
//! exactly one token and returns its kind. Nothing is ever skipped: trivia
//! and malformed input become tokens too, so the concatenated token texts
//! always reproduce the source. Problems are reported through
//! [`LexErrorKind`] alongside the token rather than by failing.

use purist_ir::{SourcePos, TokenKind};

use crate::cursor::Cursor;
use crate::lex_error::LexErrorKind;

/// One scanned token: kind, start, and any problem found inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scanned {
    pub kind: TokenKind,
    pub start: SourcePos,
    pub error: Option<LexErrorKind>,
}

pub struct Scanner<'src> {
    cursor: Cursor<'src>,
}

/// Characters that make up operators.
fn is_symbol_char(c: char) -> bool {
    match c {
        ':' | '!' | '#' | '$' | '%' | '&' | '*' | '+' | '.' | '/' | '<' | '=' | '>' | '?'
        | '@' | '\\' | '^' | '|' | '-' | '~' => true,
        c if c.is_ascii() => false,
        c => !c.is_alphanumeric() && !c.is_whitespace() && !is_bracket(c) && c != '_',
    }
}

fn is_bracket(c: char) -> bool {
    matches!(c, '(' | ')' | '{' | '}' | '[' | ']' | ',' | '`' | '"' | '\'' | ';')
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Scanner {
            cursor: Cursor::new(source),
        }
    }

    #[inline]
    pub fn pos(&self) -> SourcePos {
        self.cursor.pos()
    }

    /// Produce the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Scanned> {
        let start = self.cursor.pos();
        let c = self.cursor.current()?;
        let (kind, error) = match c {
            ' ' | '\t' => (self.whitespace(), None),
            '\n' | '\r' => (self.newline(), None),
            '{' if self.cursor.peek_nth(1) == Some('-') => self.block_comment(),
            '(' => self.single(TokenKind::LeftParen),
            ')' => self.single(TokenKind::RightParen),
            '{' => self.single(TokenKind::LeftBrace),
            '}' => self.single(TokenKind::RightBrace),
            '[' => self.single(TokenKind::LeftSquare),
            ']' => self.single(TokenKind::RightSquare),
            ',' => self.single(TokenKind::Comma),
            '`' => self.single(TokenKind::Backtick),
            '"' => self.string(),
            '\'' => self.char_literal(),
            '0'..='9' => (self.number(), None),
            '?' if self.cursor.peek_nth(1).is_some_and(|c| c.is_lowercase() || c == '_') => {
                (self.hole(), None)
            }
            c if c.is_uppercase() => (self.proper_name(), None),
            c if is_ident_start(c) => (self.identifier(), None),
            c if is_symbol_char(c) => self.operator(),
            c if c.is_whitespace() => (self.whitespace(), None),
            _ => {
                self.cursor.bump();
                (TokenKind::Unknown, Some(LexErrorKind::InvalidCharacter(c)))
            }
        };
        Some(Scanned { kind, start, error })
    }

    fn single(&mut self, kind: TokenKind) -> (TokenKind, Option<LexErrorKind>) {
        self.cursor.bump();
        (kind, None)
    }

    fn whitespace(&mut self) -> TokenKind {
        self.cursor
            .eat_while(|c| c.is_whitespace() && c != '\n' && c != '\r');
        TokenKind::Whitespace
    }

    fn newline(&mut self) -> TokenKind {
        if self.cursor.starts_with("\r\n") {
            self.cursor.bump_str("\r\n");
        } else {
            self.cursor.bump();
        }
        TokenKind::Newline
    }

    fn line_comment(&mut self) -> TokenKind {
        self.cursor.eat_while(|c| c != '\n' && c != '\r');
        TokenKind::LineComment
    }

    fn block_comment(&mut self) -> (TokenKind, Option<LexErrorKind>) {
        self.cursor.bump_str("{-");
        loop {
            if self.cursor.starts_with("-}") {
                self.cursor.bump_str("-}");
                return (TokenKind::BlockComment, None);
            }
            if self.cursor.bump().is_none() {
                return (
                    TokenKind::BlockComment,
                    Some(LexErrorKind::UnterminatedBlockComment),
                );
            }
        }
    }

    /// `x`, `foo'`, `_bar`, keywords, and the lone `_` wildcard.
    fn identifier(&mut self) -> TokenKind {
        let start = self.cursor.pos();
        self.cursor.bump();
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice_from(start);
        if text == "_" {
            return TokenKind::Underscore;
        }
        TokenKind::keyword(text).unwrap_or(TokenKind::Lower)
    }

    /// `Foo`, or a qualified name such as `Data.Maybe.Just` or `Map.lookup`.
    ///
    /// A `.` only continues the name when it is immediately followed by a
    /// letter, so `Foo.` and `Foo . bar` stay separate tokens.
    fn proper_name(&mut self) -> TokenKind {
        self.cursor.eat_while(is_ident_continue);
        let mut kind = TokenKind::Upper;
        while self.cursor.current() == Some('.') {
            let Some(next) = self.cursor.peek_nth(1) else {
                break;
            };
            if next.is_uppercase() {
                self.cursor.bump();
                self.cursor.eat_while(is_ident_continue);
                kind = TokenKind::QualifiedUpper;
            } else if is_ident_start(next) {
                let mut probe = self.cursor;
                probe.bump();
                let name_start = probe.pos();
                probe.eat_while(is_ident_continue);
                // `M.do` is not a qualified name; stop before the dot.
                if TokenKind::keyword(probe.slice_from(name_start)).is_some() {
                    break;
                }
                self.cursor = probe;
                return TokenKind::QualifiedLower;
            } else {
                break;
            }
        }
        kind
    }

    /// `?name` typed hole.
    fn hole(&mut self) -> TokenKind {
        self.cursor.bump();
        self.cursor.eat_while(is_ident_continue);
        TokenKind::Hole
    }

    /// Integers (`42`, `1_000`, `0xFF`) and numbers (`1.5`, `2e10`, `6.02e-23`).
    fn number(&mut self) -> TokenKind {
        if self.cursor.starts_with("0x") {
            self.cursor.bump_str("0x");
            self.cursor.eat_while(|c| c.is_ascii_hexdigit());
            return TokenKind::Int;
        }
        self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');
        let mut kind = TokenKind::Int;
        if self.cursor.current() == Some('.')
            && self.cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.bump();
            self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');
            kind = TokenKind::Number;
        }
        if matches!(self.cursor.current(), Some('e' | 'E')) {
            let digits_at = match self.cursor.peek_nth(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self
                .cursor
                .peek_nth(digits_at)
                .is_some_and(|c| c.is_ascii_digit())
            {
                for _ in 0..digits_at {
                    self.cursor.bump();
                }
                self.cursor.eat_while(|c| c.is_ascii_digit());
                kind = TokenKind::Number;
            }
        }
        kind
    }

    /// `"..."` with escapes, or `"""..."""` raw strings.
    fn string(&mut self) -> (TokenKind, Option<LexErrorKind>) {
        if self.cursor.starts_with("\"\"\"") {
            self.cursor.bump_str("\"\"\"");
            loop {
                if self.cursor.starts_with("\"\"\"") {
                    self.cursor.bump_str("\"\"\"");
                    // Up to two extra quotes belong to the string body.
                    self.cursor.eat_while(|c| c == '"');
                    return (TokenKind::RawString, None);
                }
                if self.cursor.bump().is_none() {
                    return (TokenKind::RawString, Some(LexErrorKind::UnterminatedString));
                }
            }
        }

        self.cursor.bump();
        loop {
            match self.cursor.current() {
                Some('"') => {
                    self.cursor.bump();
                    return (TokenKind::String, None);
                }
                Some('\\') => {
                    self.cursor.bump();
                    // A string gap `\   \` may span lines; any other escape is one char.
                    if self.cursor.current().is_some_and(char::is_whitespace) {
                        self.cursor.eat_while(char::is_whitespace);
                        if self.cursor.current() == Some('\\') {
                            self.cursor.bump();
                        }
                    } else {
                        self.cursor.bump();
                    }
                }
                None | Some('\n' | '\r') => {
                    return (TokenKind::String, Some(LexErrorKind::UnterminatedString));
                }
                Some(_) => {
                    self.cursor.bump();
                }
            }
        }
    }

    /// `'a'`, `'\n'`, `'\x41'`.
    fn char_literal(&mut self) -> (TokenKind, Option<LexErrorKind>) {
        self.cursor.bump();
        match self.cursor.current() {
            Some('\\') => {
                self.cursor.bump();
                self.cursor.bump();
                self.cursor
                    .eat_while(|c| c != '\'' && c != '\n' && c != '\r' && !c.is_whitespace());
            }
            Some('\'' | '\n' | '\r') | None => {
                return (TokenKind::Char, Some(LexErrorKind::InvalidCharLiteral));
            }
            Some(_) => {
                self.cursor.bump();
            }
        }
        if self.cursor.current() == Some('\'') {
            self.cursor.bump();
            (TokenKind::Char, None)
        } else {
            (TokenKind::Char, Some(LexErrorKind::InvalidCharLiteral))
        }
    }

    /// A run of symbol characters: reserved symbols, operators, or a `--` comment.
    fn operator(&mut self) -> (TokenKind, Option<LexErrorKind>) {
        let start = self.cursor.pos();
        self.cursor.eat_while(is_symbol_char);
        let text = self.cursor.slice_from(start);
        if text.len() >= 2 && text.bytes().all(|b| b == b'-') {
            return (self.line_comment(), None);
        }
        let kind = TokenKind::reserved_symbol(text).unwrap_or(TokenKind::Operator);
        (kind, None)
    }
}
