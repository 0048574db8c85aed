//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that turns source text into the
//! token stream consumed by the parser. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of keywords, identifiers, integer literals, and operators
//! - Token position tracking for error reporting
//! - Comments and whitespace handling
//!
//! Tokens are produced lazily through the [`lexer::TokenSource`] trait, which
//! the parser pulls from one token at a time.

pub mod lexer;
pub mod tokens;
