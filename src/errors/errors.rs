use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

/// A parse diagnostic: what went wrong and where.
///
/// `Display` renders only the message, so collected errors read the same as
/// plain strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NoPrefixParseFn { .. } => "NoPrefixParseFn",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken {
                expected: TokenKind::CloseParen | TokenKind::CloseCurly,
                received: TokenKind::EOF,
            } => ErrorTip::Suggestion(String::from(
                "input ended early, is a closing delimiter missing?",
            )),
            ErrorImpl::UnexpectedToken { expected, .. } => {
                ErrorTip::Suggestion(format!("insert {} here", spelling(*expected)))
            }
            ErrorImpl::NoPrefixParseFn {
                kind: TokenKind::EOF, ..
            } => ErrorTip::None,
            ErrorImpl::NoPrefixParseFn {
                kind: TokenKind::Illegal,
                token,
            } => ErrorTip::Suggestion(format!("`{}` is not a valid character", token)),
            ErrorImpl::NoPrefixParseFn { token, .. } => {
                ErrorTip::Suggestion(format!("`{}` cannot start an expression", token))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::NestingTooDeep { .. } => ErrorTip::Suggestion(String::from(
                "split the expression up with `let` bindings",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("expected next token to be {expected}, got {received} instead")]
    UnexpectedToken {
        expected: TokenKind,
        received: TokenKind,
    },
    #[error("no prefix parse function for {kind} found")]
    NoPrefixParseFn { kind: TokenKind, token: String },
    #[error("could not parse {token:?} as integer")]
    NumberParseError { token: String },
    #[error("expression nested more than {limit} levels deep")]
    NestingTooDeep { limit: usize },
}

/// Source spelling of a token kind, for suggestions.
fn spelling(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::EOF => "the end of input",
        TokenKind::Illegal => "a valid character",
        TokenKind::Number => "a number",
        TokenKind::Identifier => "an identifier",
        TokenKind::OpenCurly => "`{`",
        TokenKind::CloseCurly => "`}`",
        TokenKind::OpenParen => "`(`",
        TokenKind::CloseParen => "`)`",
        TokenKind::Assignment => "`=`",
        TokenKind::Equals => "`==`",
        TokenKind::Not => "`!`",
        TokenKind::NotEquals => "`!=`",
        TokenKind::Less => "`<`",
        TokenKind::Greater => "`>`",
        TokenKind::Semicolon => "`;`",
        TokenKind::Comma => "`,`",
        TokenKind::Plus => "`+`",
        TokenKind::Dash => "`-`",
        TokenKind::Slash => "`/`",
        TokenKind::Star => "`*`",
        TokenKind::Let => "`let`",
        TokenKind::Fn => "`fn`",
        TokenKind::Return => "`return`",
        TokenKind::If => "`if`",
        TokenKind::Else => "`else`",
        TokenKind::True => "`true`",
        TokenKind::False => "`false`",
    }
}
