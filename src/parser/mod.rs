//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! with operator precedence and handles:
//!
//! - Statement parsing (`let`, `return`, blocks, expression statements)
//! - Expression parsing (prefix and infix operators, grouping, conditionals,
//!   function literals, calls)
//! - Error recording and recovery at statement boundaries
//!
//! Every token kind owns an optional prefix handler and an optional infix
//! handler; infix handlers carry a precedence that drives the climbing loop
//! in [`expr::parse_expr`].

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
