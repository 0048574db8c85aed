use tracing::trace;

use crate::{
    ast::{
        ast::Statement,
        expressions::IdentifierExpr,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::Precedence},
    Span,
};

use super::parser::Parser;

/// Parses the statement starting at the current token.
///
/// On success the current token is the last token of the statement. A lone
/// `;` is an empty statement and yields `None` without an error.
pub fn parse_stmt(parser: &mut Parser) -> Result<Option<Statement>, Error> {
    let kind = parser.current_token_kind();
    trace!(kind = %kind, offset = parser.get_position().0, "statement");

    if kind == TokenKind::Semicolon {
        return Ok(None);
    }

    if let Some(handler) = parser.get_stmt_handler(kind) {
        return handler(parser).map(Some);
    }

    parse_expression_stmt(parser).map(Some)
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start_token = parser.current_token().clone();

    let name_token = parser.expect_peek(TokenKind::Identifier)?;
    let name = IdentifierExpr {
        value: name_token.value.clone(),
        span: name_token.span.clone(),
        token: name_token,
    };

    parser.expect_peek(TokenKind::Assignment)?;
    parser.advance();

    let value = parse_expr(parser, Precedence::Lowest)?;

    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Ok(Statement::Let(LetStmt {
        span: Span {
            start: start_token.span.start.clone(),
            end: parser.current_token().span.end.clone(),
        },
        token: start_token,
        name,
        value,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start_token = parser.current_token().clone();
    parser.advance();

    let value = parse_expr(parser, Precedence::Lowest)?;

    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Ok(Statement::Return(ReturnStmt {
        span: Span {
            start: start_token.span.start.clone(),
            end: parser.current_token().span.end.clone(),
        },
        token: start_token,
        value,
    }))
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start_token = parser.current_token().clone();

    let expression = parse_expr(parser, Precedence::Lowest)?;

    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Ok(Statement::Expression(ExpressionStmt {
        span: Span {
            start: start_token.span.start.clone(),
            end: parser.current_token().span.end.clone(),
        },
        token: start_token,
        expression,
    }))
}

pub fn parse_nested_block_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    Ok(Statement::Block(parse_block_stmt(parser)?))
}

/// Parses `{ ... }` with the current token on the opening brace and leaves the
/// current token on the closing one.
///
/// Failed statements inside the block are recorded and skipped; only a
/// missing `}` fails the block itself.
pub fn parse_block_stmt(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start_token = parser.current_token().clone();
    parser.descend()?;
    parser.advance();

    parser.enter_block();
    let body = parse_block_body(parser);
    parser.leave_block();
    parser.ascend();

    let body = body?;

    Ok(BlockStmt {
        span: Span {
            start: start_token.span.start.clone(),
            end: parser.current_token().span.end.clone(),
        },
        token: start_token,
        body,
    })
}

fn parse_block_body(parser: &mut Parser) -> Result<Vec<Statement>, Error> {
    let mut statements = Vec::new();

    while !parser.current_is(TokenKind::CloseCurly) {
        if parser.current_is(TokenKind::EOF) {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: TokenKind::CloseCurly,
                    received: TokenKind::EOF,
                },
                parser.get_position(),
            ));
        }

        match parse_stmt(parser) {
            Ok(Some(stmt)) => statements.push(stmt),
            Ok(None) => {}
            Err(error) => {
                parser.record(error);
                if parser.synchronize() {
                    continue;
                }
            }
        }
        parser.advance();
    }

    Ok(statements)
}
