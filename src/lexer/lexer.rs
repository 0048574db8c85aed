use std::{rc::Rc, vec::IntoIter};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::{to_offset, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Pull-based supplier of tokens.
///
/// Implementations must always return a valid token: once the input is
/// exhausted they keep returning EOF. Malformed input surfaces as
/// `TokenKind::Illegal` rather than as an error.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// Handles one pattern match. Returns `None` for input that produces no token
/// (whitespace, comments).
pub type RegexHandler = fn(&mut Lexer, &str) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Order matters: the first pattern matching at the cursor wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^//[^\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
    ];
}

/// Lazily tokenizes a source string, one token per `next_token` call.
#[derive(Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: &str, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source: source.to_string(),
            pos: 0,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    /// True once the source is consumed, or once the cursor passes the last
    /// offset a `Position` can hold; input beyond 4 GiB is never tokenized.
    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len() || u32::try_from(self.pos).is_err()
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    /// Span covering the next `len` bytes from the cursor.
    pub fn span_ahead(&self, len: usize) -> Span {
        Span {
            start: Position(to_offset(self.pos), Rc::clone(&self.file)),
            end: Position(to_offset(self.pos + len), Rc::clone(&self.file)),
        }
    }

    fn eof_token(&self) -> Token {
        MK_TOKEN!(TokenKind::EOF, String::from("EOF"), self.span_ahead(0))
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        loop {
            if self.at_eof() {
                return self.eof_token();
            }

            let found = PATTERNS.iter().find_map(|pattern| {
                pattern
                    .regex
                    .find(self.remainder())
                    .map(|m| (pattern.handler, m.as_str().to_string()))
            });

            match found {
                Some((handler, matched)) => {
                    if let Some(token) = handler(self, &matched) {
                        trace!(kind = %token.kind, value = %token.value, "token");
                        return token;
                    }
                }
                None => {
                    let Some(ch) = self.remainder().chars().next() else {
                        return self.eof_token();
                    };

                    let token = MK_TOKEN!(TokenKind::Illegal, ch.to_string(), self.span_ahead(ch.len_utf8()));
                    self.advance_n(ch.len_utf8());
                    debug!(value = %token.value, offset = token.span.start.0, "illegal character");
                    return token;
                }
            }
        }
    }
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let token = MK_TOKEN!(TokenKind::Number, matched.to_string(), lexer.span_ahead(matched.len()));
    lexer.advance_n(matched.len());
    Some(token)
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    lexer.advance_n(matched.len());
    None
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let kind = RESERVED_LOOKUP
        .get(matched)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    let token = MK_TOKEN!(kind, matched.to_string(), lexer.span_ahead(matched.len()));
    lexer.advance_n(matched.len());
    Some(token)
}

/// A token source over tokens that were collected ahead of time.
///
/// The first EOF in the vector (or a synthesized one if the vector has none)
/// is repeated forever; anything after it is ignored.
pub struct TokenBuffer {
    tokens: IntoIter<Token>,
    eof: Token,
    exhausted: bool,
}

impl TokenBuffer {
    pub fn new(tokens: Vec<Token>, file: Rc<String>) -> Self {
        let eof = match tokens.iter().find(|token| token.kind == TokenKind::EOF) {
            Some(token) => token.clone(),
            None => {
                let end = tokens.last().map(|token| token.span.end.0).unwrap_or(0);
                MK_TOKEN!(
                    TokenKind::EOF,
                    String::from("EOF"),
                    Span {
                        start: Position(end, Rc::clone(&file)),
                        end: Position(end, file),
                    }
                )
            }
        };

        TokenBuffer {
            tokens: tokens.into_iter(),
            eof,
            exhausted: false,
        }
    }
}

impl TokenSource for TokenBuffer {
    fn next_token(&mut self) -> Token {
        if !self.exhausted {
            if let Some(token) = self.tokens.next() {
                if token.kind != TokenKind::EOF {
                    return token;
                }
            }
            self.exhausted = true;
        }

        self.eof.clone()
    }
}

/// Runs a lexer to completion. The result ends with exactly one EOF token.
pub fn tokenize(source: &str, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            break;
        }
    }

    debug!(count = tokens.len(), file = %lex.file(), "tokenized source");
    tokens
}
