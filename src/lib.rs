#![allow(clippy::module_inception)]

//! Front end for the Ibex language: an indentation-aware lexer, a Pratt
//! parsing engine driven by a registry of prefix and infix rules, and the
//! AST those rules build.

use std::rc::Rc;

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

pub use parser::parser::{create_parser, parse};

/// A location in a source file, used for diagnostics.
///
/// `line` is 1-based, `column` is 0-based and `length` is the number of
/// characters that should be underlined (never less than one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub file: Rc<String>,
    pub line: usize,
    pub column: usize,
    pub length: usize,
}

impl Position {
    pub fn new(file: Rc<String>, line: usize, column: usize, length: usize) -> Self {
        Position {
            file,
            line,
            column,
            length: length.max(1),
        }
    }
}

/// Returns the text of the 1-based `line` of `source` without its line
/// terminator, or `None` when the source has no such line.
pub fn get_line(source: &str, line: usize) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source.lines().nth(line - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_line() {
        let source = "Hello, world!\nsecond\n\nTesting { }\n";

        assert_eq!(get_line(source, 1), Some("Hello, world!"));
        assert_eq!(get_line(source, 2), Some("second"));
        assert_eq!(get_line(source, 3), Some(""));
        assert_eq!(get_line(source, 4), Some("Testing { }"));
        assert_eq!(get_line(source, 5), None);
        assert_eq!(get_line(source, 0), None);
    }

    #[test]
    fn test_position_length_is_at_least_one() {
        let position = Position::new(Rc::new("test.ibex".to_string()), 3, 4, 0);
        assert_eq!(position.length, 1);
    }
}
