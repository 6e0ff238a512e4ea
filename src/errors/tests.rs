//! Unit tests for error handling.
//!
//! This module contains tests for error types and error rendering.

use std::rc::Rc;

use crate::errors::errors::{render_context, Error, ErrorImpl, ErrorPhase};
use crate::Position;

const SOURCE: &str = "first line\nsecond = line\nthird line\n";

fn position(line: usize, column: usize, length: usize) -> Position {
    Position::new(Rc::new("test.ibex".to_string()), line, column, length)
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        position(1, 0, 1),
        SOURCE,
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.phase(), ErrorPhase::Lex);
}

#[test]
fn test_error_position() {
    let error = Error::new(ErrorImpl::ExpectedExpression, position(2, 7, 1), SOURCE);

    assert_eq!(error.get_position().line, 2);
    assert_eq!(error.get_position().column, 7);
    assert_eq!(error.phase(), ErrorPhase::Parse);
}

#[test]
fn test_render_context_middle_line() {
    let rendered = render_context(SOURCE, &position(2, 7, 1));

    let expected = format!(
        "test.ibex#1: first line\ntest.ibex#2: second = line\n{}^\ntest.ibex#3: third line\n",
        " ".repeat(20)
    );
    assert_eq!(rendered, expected);
}

#[test]
fn test_render_context_first_line_has_no_previous() {
    let rendered = render_context(SOURCE, &position(1, 0, 5));

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "test.ibex#1: first line");
    assert_eq!(lines[1], format!("{}^~~~~", " ".repeat("test.ibex#1: ".len())));
    assert_eq!(lines[2], "test.ibex#2: second = line");
}

#[test]
fn test_render_context_last_line_has_no_next() {
    let rendered = render_context(SOURCE, &position(3, 6, 4));

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "test.ibex#2: second = line");
    assert_eq!(lines[1], "test.ibex#3: third line");
    assert_eq!(lines[2], format!("{}^~~~", " ".repeat("test.ibex#3: ".len() + 6)));
}

#[test]
fn test_render_context_past_end_of_source() {
    let rendered = render_context("only", &position(2, 0, 1));

    assert_eq!(
        rendered,
        format!("test.ibex#1: only\ntest.ibex#2: \n{}^\n", " ".repeat(13))
    );
}

#[test]
fn test_error_display_contains_message_and_context() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: " of type CONSTANT".to_string(),
        },
        position(2, 0, 6),
        SOURCE,
    );

    let displayed = error.to_string();
    assert!(displayed.starts_with("Error: Expected token of type CONSTANT here:\n"));
    assert!(displayed.contains("test.ibex#2: second = line"));
    assert!(displayed.ends_with("test.ibex#3: third line\n"));
}

#[test]
fn test_missing_function_name_message() {
    let error = Error::new(
        ErrorImpl::MissingFunctionName {
            path: "Foo::Bar".to_string(),
        },
        position(1, 0, 1),
        SOURCE,
    );

    assert_eq!(error.get_error_name(), "MissingFunctionName");
    assert_eq!(
        error.get_internal_error().to_string(),
        "Expected method name after Foo::Bar, here:"
    );
}

#[test]
fn test_error_phase_display() {
    assert_eq!(ErrorPhase::Lex.to_string(), "lex");
    assert_eq!(ErrorPhase::Parse.to_string(), "parse");
}
