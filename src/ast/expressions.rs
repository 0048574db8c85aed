use std::fmt::Display;

use crate::{lexer::tokens::Token, Span};

use super::{ast::Expression, statements::BlockStmt};

// LITERALS

/// Identifier Expression
/// A bare name. Also used for `let` targets and function parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierExpr {
    pub token: Token,
    pub value: String,
    pub span: Span,
}

impl Display for IdentifierExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Integer Expression
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerExpr {
    pub token: Token,
    pub value: i64,
    pub span: Span,
}

impl Display for IntegerExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Boolean Expression
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    pub token: Token,
    pub value: bool,
    pub span: Span,
}

impl Display for BooleanExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

// OPERATORS

/// Prefix Expression
/// `-x` or `!x`. The token is the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub token: Token,
    pub operator: String,
    pub right: Box<Expression>,
    pub span: Span,
}

impl Display for PrefixExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

/// Infix Expression
/// Binary operation. The token is the operator; the span runs from the start
/// of `left` to the end of `right`.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpr {
    pub token: Token,
    pub left: Box<Expression>,
    pub operator: String,
    pub right: Box<Expression>,
    pub span: Span,
}

impl Display for InfixExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

// COMPOUND

/// If Expression
/// `if (<condition>) { ... } else { ... }`, the else branch being optional.
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub token: Token,
    pub condition: Box<Expression>,
    pub consequence: BlockStmt,
    pub alternative: Option<BlockStmt>,
    pub span: Span,
}

impl Display for IfExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if ({}) {}", self.condition, self.consequence)?;
        if let Some(alternative) = &self.alternative {
            write!(f, " else {}", alternative)?;
        }
        Ok(())
    }
}

/// Function Expression
/// An anonymous function literal: `fn(a, b) { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpr {
    pub token: Token,
    pub parameters: Vec<IdentifierExpr>,
    pub body: BlockStmt,
    pub span: Span,
}

impl Display for FunctionExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self
            .parameters
            .iter()
            .map(|p| p.value.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        write!(f, "fn({}) {}", parameters, self.body)
    }
}

/// Call Expression
/// The token is the opening parenthesis. `function` is any expression, so
/// `fn(x) { x }(5)` and `add(1)(2)` are both calls.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub token: Token,
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

impl Display for CallExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arguments = self
            .arguments
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        write!(f, "{}({})", self.function, arguments)
    }
}
