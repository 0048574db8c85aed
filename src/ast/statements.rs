use std::{fmt::Display, slice::Iter};

use crate::{lexer::tokens::Token, Span};

use super::{
    ast::{Expression, Statement},
    expressions::IdentifierExpr,
};

/// `let <name> = <value>;`
#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub token: Token,
    pub name: IdentifierExpr,
    pub value: Expression,
    pub span: Span,
}

impl Display for LetStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "let {} = {};", self.name, self.value)
    }
}

/// `return <value>;`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub token: Token,
    pub value: Expression,
    pub span: Span,
}

impl Display for ReturnStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "return {};", self.value)
    }
}

/// An expression in statement position. The trailing semicolon is optional in
/// source but always rendered, so that consecutive statements never fuse into
/// a call when reparsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub token: Token,
    pub expression: Expression,
    pub span: Span,
}

impl Display for ExpressionStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{};", self.expression)
    }
}

/// `{ ... }`; the token is the opening brace.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub token: Token,
    pub body: Vec<Statement>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Statement> {
        self.body.iter()
    }
}

impl Display for BlockStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for stmt in &self.body {
            write!(f, " {}", stmt)?;
        }
        write!(f, " }}")
    }
}
