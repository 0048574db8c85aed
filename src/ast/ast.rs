use std::{fmt::Display, slice::Iter};

use crate::{lexer::tokens::Token, Span};

use super::{
    expressions::{
        BooleanExpr, CallExpr, FunctionExpr, IdentifierExpr, IfExpr, InfixExpr, IntegerExpr,
        PrefixExpr,
    },
    statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
};

/// Root of the tree: the top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new() -> Self {
        Program { statements: vec![] }
    }

    pub fn iter(&self) -> Iter<'_, Statement> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

/// Statement
///
/// Every variant owns its children; the tree never shares nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(LetStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
    Block(BlockStmt),
}

impl Statement {
    /// The token the statement started with.
    pub fn get_token(&self) -> &Token {
        match self {
            Statement::Let(stmt) => &stmt.token,
            Statement::Return(stmt) => &stmt.token,
            Statement::Expression(stmt) => &stmt.token,
            Statement::Block(stmt) => &stmt.token,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Statement::Let(stmt) => &stmt.span,
            Statement::Return(stmt) => &stmt.span,
            Statement::Expression(stmt) => &stmt.span,
            Statement::Block(stmt) => &stmt.span,
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Let(stmt) => write!(f, "{}", stmt),
            Statement::Return(stmt) => write!(f, "{}", stmt),
            Statement::Expression(stmt) => write!(f, "{}", stmt),
            Statement::Block(stmt) => write!(f, "{}", stmt),
        }
    }
}

/// Expression
///
/// Grouped expressions have no variant of their own: `(a + b)` parses straight
/// to the inner infix node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(IdentifierExpr),
    Integer(IntegerExpr),
    Boolean(BooleanExpr),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    If(IfExpr),
    Function(FunctionExpr),
    Call(CallExpr),
}

impl Expression {
    /// The token that produced this node. For infix and call nodes this is the
    /// operator or opening parenthesis, not the leftmost token.
    pub fn get_token(&self) -> &Token {
        match self {
            Expression::Identifier(expr) => &expr.token,
            Expression::Integer(expr) => &expr.token,
            Expression::Boolean(expr) => &expr.token,
            Expression::Prefix(expr) => &expr.token,
            Expression::Infix(expr) => &expr.token,
            Expression::If(expr) => &expr.token,
            Expression::Function(expr) => &expr.token,
            Expression::Call(expr) => &expr.token,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Expression::Identifier(expr) => &expr.span,
            Expression::Integer(expr) => &expr.span,
            Expression::Boolean(expr) => &expr.span,
            Expression::Prefix(expr) => &expr.span,
            Expression::Infix(expr) => &expr.span,
            Expression::If(expr) => &expr.span,
            Expression::Function(expr) => &expr.span,
            Expression::Call(expr) => &expr.span,
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Identifier(expr) => write!(f, "{}", expr),
            Expression::Integer(expr) => write!(f, "{}", expr),
            Expression::Boolean(expr) => write!(f, "{}", expr),
            Expression::Prefix(expr) => write!(f, "{}", expr),
            Expression::Infix(expr) => write!(f, "{}", expr),
            Expression::If(expr) => write!(f, "{}", expr),
            Expression::Function(expr) => write!(f, "{}", expr),
            Expression::Call(expr) => write!(f, "{}", expr),
        }
    }
}
