use std::collections::HashMap;

use crate::{
    ast::ast::{Expression, Statement},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Binding strength of an infix operator. Declaration order is the ordering:
/// `Lowest < Equals < LessGreater < Sum < Product < Prefix < Call`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Statement, Error>;
pub type PrefixHandler = fn(&mut Parser) -> Result<Expression, Error>;
pub type InfixHandler = fn(&mut Parser, Expression, Precedence) -> Result<Expression, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Equality and comparison
    parser.infix(TokenKind::Equals, Precedence::Equals, parse_infix_expr);
    parser.infix(TokenKind::NotEquals, Precedence::Equals, parse_infix_expr);
    parser.infix(TokenKind::Less, Precedence::LessGreater, parse_infix_expr);
    parser.infix(TokenKind::Greater, Precedence::LessGreater, parse_infix_expr);

    // Additive and multiplicative
    parser.infix(TokenKind::Plus, Precedence::Sum, parse_infix_expr);
    parser.infix(TokenKind::Dash, Precedence::Sum, parse_infix_expr);
    parser.infix(TokenKind::Star, Precedence::Product, parse_infix_expr);
    parser.infix(TokenKind::Slash, Precedence::Product, parse_infix_expr);

    parser.infix(TokenKind::OpenParen, Precedence::Call, parse_call_expr);

    // Literals and symbols
    parser.prefix(TokenKind::Identifier, parse_identifier_expr);
    parser.prefix(TokenKind::Number, parse_integer_expr);
    parser.prefix(TokenKind::True, parse_boolean_expr);
    parser.prefix(TokenKind::False, parse_boolean_expr);
    parser.prefix(TokenKind::Not, parse_prefix_expr);
    parser.prefix(TokenKind::Dash, parse_prefix_expr);
    parser.prefix(TokenKind::OpenParen, parse_grouped_expr);
    parser.prefix(TokenKind::If, parse_if_expr);
    parser.prefix(TokenKind::Fn, parse_function_expr);

    // Statements
    parser.stmt(TokenKind::Let, parse_let_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::OpenCurly, parse_nested_block_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type PrefixLookup = HashMap<TokenKind, PrefixHandler>;
pub type InfixLookup = HashMap<TokenKind, InfixHandler>;
pub type PrecedenceLookup = HashMap<TokenKind, Precedence>;
