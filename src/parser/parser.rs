//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct. The parser pulls tokens one at
//! a time from a [`TokenSource`] and keeps a two-token window (current and
//! peek) over them.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - Prefix handlers, for tokens that can start an expression
//! - Infix handlers, for tokens that can continue one
//! - Precedence of every infix token
//!
//! Errors never abort the pass. A failed statement is recorded, the parser
//! skips to the next statement boundary and carries on.

use std::{collections::HashMap, rc::Rc};

use tracing::{debug, trace};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::{TokenBuffer, TokenSource},
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, InfixHandler, InfixLookup, Precedence, PrecedenceLookup,
        PrefixHandler, PrefixLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// Deepest nesting of expressions and blocks the parser descends into. Past
/// it the statement fails with `NestingTooDeep` instead of exhausting the
/// stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// The main parser structure that maintains parsing state.
///
/// One parser performs one pass over one token source. The state is plain
/// owned data, so independent parsers never interfere with each other.
pub struct Parser {
    /// Where tokens come from
    source: Box<dyn TokenSource>,
    /// The token under examination
    current: Token,
    /// One token of lookahead
    peek: Token,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for prefix expression handlers
    prefix_lookup: PrefixLookup,
    /// Lookup table for infix expression handlers
    infix_lookup: InfixLookup,
    /// Lookup table for infix precedence
    precedence_lookup: PrecedenceLookup,
    /// Diagnostics in the order they were found
    errors: Vec<Error>,
    /// How many blocks enclose the statement being parsed
    block_depth: usize,
    /// Current expression and block nesting, bounded by `MAX_NESTING_DEPTH`
    depth: usize,
}

impl Parser {
    /// Creates a parser over `source` and primes the token window by reading
    /// two tokens.
    pub fn new<S: TokenSource + 'static>(source: S) -> Self {
        let mut source: Box<dyn TokenSource> = Box::new(source);
        let current = source.next_token();
        let peek = source.next_token();

        let mut parser = Parser {
            source,
            current,
            peek,
            stmt_lookup: HashMap::new(),
            prefix_lookup: HashMap::new(),
            infix_lookup: HashMap::new(),
            precedence_lookup: HashMap::new(),
            errors: vec![],
            block_depth: 0,
            depth: 0,
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Parses statements until EOF.
    ///
    /// Always returns a program. Statements that failed to parse are left out
    /// and their errors are available from [`Parser::errors`].
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::new();

        while !self.current_is(TokenKind::EOF) {
            match parse_stmt(self) {
                Ok(Some(stmt)) => program.statements.push(stmt),
                Ok(None) => {}
                Err(error) => {
                    self.record(error);
                    self.synchronize();
                }
            }
            self.advance();
        }

        debug!(
            statements = program.len(),
            errors = self.errors.len(),
            "parsed program"
        );
        program
    }

    /// Error messages recorded so far, in order.
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    /// Structured errors recorded so far, in order.
    pub fn diagnostics(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_diagnostics(self) -> Vec<Error> {
        self.errors
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the lookahead token.
    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Shifts the window by one token. EOF is sticky: the source keeps
    /// producing it, so advancing at the end of input is harmless.
    pub fn advance(&mut self) {
        let next = self.source.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advances if the peek token has the expected kind and returns the new
    /// current token; otherwise leaves the window untouched and returns the
    /// mismatch.
    pub fn expect_peek(&mut self, kind: TokenKind) -> Result<Token, Error> {
        if self.peek_is(kind) {
            self.advance();
            Ok(self.current.clone())
        } else {
            Err(self.peek_error(kind))
        }
    }

    fn peek_error(&self, expected: TokenKind) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                expected,
                received: self.peek.kind,
            },
            self.peek.span.start.clone(),
        )
    }

    /// Precedence of the peek token as an infix operator; `Lowest` for
    /// anything that cannot continue an expression.
    pub fn peek_precedence(&self) -> Precedence {
        self.precedence_of(self.peek.kind)
    }

    pub fn current_precedence(&self) -> Precedence {
        self.precedence_of(self.current.kind)
    }

    fn precedence_of(&self, kind: TokenKind) -> Precedence {
        self.precedence_lookup
            .get(&kind)
            .copied()
            .unwrap_or(Precedence::Lowest)
    }

    pub fn get_stmt_handler(&self, kind: TokenKind) -> Option<StmtHandler> {
        self.stmt_lookup.get(&kind).copied()
    }

    pub fn get_prefix_handler(&self, kind: TokenKind) -> Option<PrefixHandler> {
        self.prefix_lookup.get(&kind).copied()
    }

    pub fn get_infix_handler(&self, kind: TokenKind) -> Option<InfixHandler> {
        self.infix_lookup.get(&kind).copied()
    }

    /// Registers an infix handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `precedence` - How tightly this operator binds
    /// * `infix_fn` - The handler function for this infix operator
    pub(super) fn infix(&mut self, kind: TokenKind, precedence: Precedence, infix_fn: InfixHandler) {
        self.precedence_lookup.insert(kind, precedence);
        self.infix_lookup.insert(kind, infix_fn);
    }

    /// Registers a prefix handler for a token.
    pub(super) fn prefix(&mut self, kind: TokenKind, prefix_fn: PrefixHandler) {
        self.prefix_lookup.insert(kind, prefix_fn);
    }

    /// Registers a statement handler for a token.
    pub(super) fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    pub(super) fn enter_block(&mut self) {
        self.block_depth += 1;
    }

    pub(super) fn leave_block(&mut self) {
        self.block_depth = self.block_depth.saturating_sub(1);
    }

    pub(super) fn in_block(&self) -> bool {
        self.block_depth > 0
    }

    pub(super) fn record(&mut self, error: Error) {
        trace!(error = %error, offset = error.get_position().0, "parse error");
        self.errors.push(error);
    }

    /// Skips the rest of a failed statement.
    ///
    /// Stops with the current token on `;` or EOF, on the `}` closing the
    /// enclosing block (or just before it), or just before a `let`/`return`.
    /// Braces opened while skipping are skipped up to their matching `}`.
    /// Returns `true` when the current token is the enclosing block's `}`;
    /// otherwise the caller's loop advances onto the next statement.
    pub(super) fn synchronize(&mut self) -> bool {
        let mut open_braces = 0usize;

        loop {
            match self.current.kind {
                TokenKind::EOF => return false,
                TokenKind::OpenCurly => open_braces += 1,
                TokenKind::CloseCurly if open_braces > 0 => open_braces -= 1,
                TokenKind::CloseCurly if self.in_block() => return true,
                TokenKind::Semicolon if open_braces == 0 => return false,
                _ => {}
            }

            if open_braces == 0 {
                if self.in_block() && self.peek_is(TokenKind::CloseCurly) {
                    return false;
                }
                if self.peek_is(TokenKind::Let) || self.peek_is(TokenKind::Return) {
                    return false;
                }
            }
            self.advance();
        }
    }

    /// Enters one level of expression or block nesting.
    pub(super) fn descend(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.get_position(),
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub(super) fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Returns the start position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }
}

/// Parses a pre-collected token stream into a program.
///
/// # Returns
///
/// A tuple containing:
/// - The program (possibly partial)
/// - Every error recorded during the pass
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(TokenBuffer::new(tokens, file));
    let program = parser.parse_program();

    (program, parser.into_diagnostics())
}
