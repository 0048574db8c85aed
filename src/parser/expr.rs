use crate::{
    ast::{
        ast::Expression,
        expressions::{
            BooleanExpr, CallExpr, FunctionExpr, IdentifierExpr, IfExpr, InfixExpr, IntegerExpr,
            PrefixExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::Precedence, parser::Parser, stmt::parse_block_stmt};

/// Precedence climbing.
///
/// Parses a prefix expression at the current token, then keeps folding infix
/// operators into it for as long as the next operator binds tighter than
/// `precedence`. On return the current token is the last token of the
/// expression.
pub fn parse_expr(parser: &mut Parser, precedence: Precedence) -> Result<Expression, Error> {
    parser.descend()?;
    let expr = climb(parser, precedence);
    parser.ascend();

    expr
}

fn climb(parser: &mut Parser, precedence: Precedence) -> Result<Expression, Error> {
    let token_kind = parser.current_token_kind();
    let Some(prefix) = parser.get_prefix_handler(token_kind) else {
        return Err(Error::new(
            ErrorImpl::NoPrefixParseFn {
                kind: token_kind,
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        ));
    };

    let mut left = prefix(parser)?;

    while !parser.peek_is(TokenKind::Semicolon) && precedence < parser.peek_precedence() {
        let Some(infix) = parser.get_infix_handler(parser.peek_token().kind) else {
            return Ok(left);
        };

        parser.advance();
        let operator_precedence = parser.current_precedence();
        left = infix(parser, left, operator_precedence)?;
    }

    Ok(left)
}

pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.current_token().clone();

    Ok(Expression::Identifier(IdentifierExpr {
        value: token.value.clone(),
        span: token.span.clone(),
        token,
    }))
}

pub fn parse_integer_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.current_token().clone();

    match token.value.parse::<i64>() {
        Ok(value) => Ok(Expression::Integer(IntegerExpr {
            value,
            span: token.span.clone(),
            token,
        })),
        Err(_) => Err(Error::new(
            ErrorImpl::NumberParseError { token: token.value },
            token.span.start,
        )),
    }
}

pub fn parse_boolean_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.current_token().clone();

    Ok(Expression::Boolean(BooleanExpr {
        value: token.kind == TokenKind::True,
        span: token.span.clone(),
        token,
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, Precedence::Prefix)?;

    Ok(Expression::Prefix(PrefixExpr {
        span: Span {
            start: operator_token.span.start.clone(),
            end: right.get_span().end.clone(),
        },
        operator: operator_token.value.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

/// Left-associative binary operator: the right operand is parsed at the
/// operator's own precedence, so an equal-precedence operator to its right
/// is left for the enclosing loop.
pub fn parse_infix_expr(
    parser: &mut Parser,
    left: Expression,
    precedence: Precedence,
) -> Result<Expression, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, precedence)?;

    Ok(Expression::Infix(InfixExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouped_expr(parser: &mut Parser) -> Result<Expression, Error> {
    parser.advance();

    let expr = parse_expr(parser, Precedence::Lowest)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let start_token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    parser.advance();
    let condition = parse_expr(parser, Precedence::Lowest)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let consequence = parse_block_stmt(parser)?;

    let alternative = if parser.peek_is(TokenKind::Else) {
        parser.advance();
        parser.expect_peek(TokenKind::OpenCurly)?;
        Some(parse_block_stmt(parser)?)
    } else {
        None
    };

    Ok(Expression::If(IfExpr {
        span: Span {
            start: start_token.span.start.clone(),
            end: parser.current_token().span.end.clone(),
        },
        token: start_token,
        condition: Box::new(condition),
        consequence,
        alternative,
    }))
}

pub fn parse_function_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let start_token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    let parameters = parse_function_parameters(parser)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let body = parse_block_stmt(parser)?;

    Ok(Expression::Function(FunctionExpr {
        span: Span {
            start: start_token.span.start.clone(),
            end: parser.current_token().span.end.clone(),
        },
        token: start_token,
        parameters,
        body,
    }))
}

/// `(a, b, c)` with the current token on `(`; ends on `)`.
fn parse_function_parameters(parser: &mut Parser) -> Result<Vec<IdentifierExpr>, Error> {
    let mut parameters = Vec::new();

    if parser.peek_is(TokenKind::CloseParen) {
        parser.advance();
        return Ok(parameters);
    }

    loop {
        let token = parser.expect_peek(TokenKind::Identifier)?;
        parameters.push(IdentifierExpr {
            value: token.value.clone(),
            span: token.span.clone(),
            token,
        });

        if !parser.peek_is(TokenKind::Comma) {
            break;
        }
        parser.advance();
    }

    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(parameters)
}

pub fn parse_call_expr(
    parser: &mut Parser,
    function: Expression,
    _precedence: Precedence,
) -> Result<Expression, Error> {
    let paren_token = parser.current_token().clone();
    let arguments = parse_call_arguments(parser)?;

    Ok(Expression::Call(CallExpr {
        span: Span {
            start: function.get_span().start.clone(),
            end: parser.current_token().span.end.clone(),
        },
        token: paren_token,
        function: Box::new(function),
        arguments,
    }))
}

/// Comma-separated expressions with the current token on `(`; ends on `)`.
fn parse_call_arguments(parser: &mut Parser) -> Result<Vec<Expression>, Error> {
    let mut arguments = Vec::new();

    if parser.peek_is(TokenKind::CloseParen) {
        parser.advance();
        return Ok(arguments);
    }

    parser.advance();
    arguments.push(parse_expr(parser, Precedence::Lowest)?);

    while parser.peek_is(TokenKind::Comma) {
        parser.advance();
        parser.advance();
        arguments.push(parse_expr(parser, Precedence::Lowest)?);
    }

    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(arguments)
}
