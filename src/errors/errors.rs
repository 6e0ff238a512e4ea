use std::fmt::Display;

use thiserror::Error;

use crate::{get_line, Position};

/// A fatal lexing or parsing fault.
///
/// Besides the cause and the position it keeps the rendered source
/// context, so the error can be reported without access to the source.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    context: String,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position, source: &str) -> Self {
        let context = render_context(source, &position);

        Error {
            internal_error: error_impl,
            position,
            context,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_context(&self) -> &str {
        &self.context
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::InconsistentIndentation { .. } => "InconsistentIndentation",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::ExpectedExpression => "ExpectedExpression",
            ErrorImpl::MissingBody => "MissingBody",
            ErrorImpl::MissingFunctionName { .. } => "MissingFunctionName",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::TrailingInput { .. } => "TrailingInput",
        }
    }

    pub fn phase(&self) -> ErrorPhase {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } | ErrorImpl::InconsistentIndentation { .. } => {
                ErrorPhase::Lex
            }
            _ => ErrorPhase::Parse,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}\n{}", self.internal_error, self.context)
    }
}

impl std::error::Error for Error {}

/// The stage of the front end that produced an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPhase {
    Lex,
    Parse,
}

impl Display for ErrorPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorPhase::Lex => write!(f, "lex"),
            ErrorPhase::Parse => write!(f, "parse"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("Don't know what to do with {token:?}")]
    UnrecognisedToken { token: String },
    #[error("Inconsistent indentation: dedent to width {width} matches no enclosing block")]
    InconsistentIndentation { width: usize },
    #[error("Expected token{expected} here:")]
    UnexpectedToken { expected: String },
    #[error("{message}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("Expected expression here:")]
    ExpectedExpression,
    #[error("Did you forget to indent? Expected node here:")]
    MissingBody,
    #[error("Expected method name after {path}, here:")]
    MissingFunctionName { path: String },
    #[error("Invalid number {token:?}, is it above the integer limit?")]
    NumberParseError { token: String },
    #[error("Unexpected {token:?} after the last complete expression:")]
    TrailingInput { token: String },
}

/// Renders the previous, offending and following source lines, each
/// prefixed with `<file>#<line>: `, with a caret and `~` underline below the
/// offending span.
pub fn render_context(source: &str, position: &Position) -> String {
    let line = position.line;
    let header = format!("{}#{}: ", position.file, line);
    let mut rendered = String::new();

    if line > 1 {
        if let Some(previous) = get_line(source, line - 1) {
            rendered.push_str(&format!("{}#{}: {}\n", position.file, line - 1, previous));
        }
    }

    rendered.push_str(&format!(
        "{}{}\n",
        header,
        get_line(source, line).unwrap_or("")
    ));
    rendered.push_str(&" ".repeat(position.column + header.len()));
    rendered.push('^');
    rendered.push_str(&"~".repeat(position.length.max(1) - 1));
    rendered.push('\n');

    if let Some(next) = get_line(source, line + 1) {
        rendered.push_str(&format!("{}#{}: {}\n", position.file, line + 1, next));
    }

    rendered
}
