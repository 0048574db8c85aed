#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    ast::ast::Program,
    errors::errors::Error,
    lexer::{lexer::Lexer, tokens::Token},
    parser::parser::Parser,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod logger;
pub mod macros;
pub mod parser;

extern crate regex;

/// Byte offset into a named source. Offsets are `u32`, so sources are
/// limited to 4 GiB; see [`to_offset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

/// Converts a byte index to a `Position` offset, saturating at `u32::MAX`.
pub fn to_offset(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(u32::MAX)
}

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Lexes and parses `source` in a single pass.
///
/// The program is always returned; callers must check that the error list is
/// empty before treating it as valid.
pub fn parse_source(source: &str, file: Option<String>) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(Lexer::new(source, file));
    let program = parser.parse_program();

    (program, parser.into_diagnostics())
}

/// Parses an already collected token stream. See [`parse_source`].
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> (Program, Vec<Error>) {
    parser::parser::parse(tokens, file)
}

/// Finds the line containing byte offset `position`.
///
/// Returns the 1-based line number, the line text and the offset of `position`
/// inside that line, or `None` when the offset lies past the end of `content`.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    // Offset at the very end of the input (EOF): point just past the last line.
    let last = content.split_inclusive('\n').last().unwrap_or("");
    if last.ends_with('\n') || content.is_empty() {
        Some((line_number, String::new(), 0))
    } else {
        Some((line_number - 1, last.to_string(), last.len()))
    }
}
