use std::{collections::VecDeque, rc::Rc};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// File name used in diagnostics when the caller does not name the source.
pub const UNKNOWN_SOURCE: &str = "unknown source";

pub struct RegexPattern {
    regex: Regex,
    kind: TokenKind,
}

macro_rules! pattern {
    ($regex:expr, $kind:expr) => {
        RegexPattern {
            regex: Regex::new(concat!("^", $regex)).unwrap(),
            kind: $kind,
        }
    };
}

lazy_static! {
    /// Lexing rules in priority order. The first rule matching at the current
    /// position wins, so longer spellings must precede their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern!(r"[+-]?[0-9]+\.[0-9][0-9]*", TokenKind::Float),
        pattern!(r"[+-]?[0-9]+L?", TokenKind::Integer),
        pattern!(r#""(?:\\.|[^"\\\n])*""#, TokenKind::String),
        pattern!(r"'(?:\\.|[^'\\\n])*'", TokenKind::String),

        pattern!(r"\(", TokenKind::LParen),
        pattern!(r"\)", TokenKind::RParen),

        pattern!("::", TokenKind::Special),
        pattern!(":", TokenKind::Special),
        pattern!("->", TokenKind::Special),
        pattern!(",", TokenKind::Special),
        pattern!(r"\[", TokenKind::Special),
        pattern!(r"\]", TokenKind::Special),
        pattern!(r"\{", TokenKind::Special),
        pattern!(r"\}", TokenKind::Special),

        pattern!(r"\+", TokenKind::Operator),
        pattern!("/", TokenKind::Operator),
        pattern!("-", TokenKind::Operator),
        pattern!(r"\*", TokenKind::Operator),
        pattern!(r"\.", TokenKind::Operator),
        pattern!("%", TokenKind::Operator),

        pattern!("&&", TokenKind::Operator),
        pattern!("&", TokenKind::Operator),
        pattern!(r"\|\|", TokenKind::Operator),
        pattern!(">=?", TokenKind::Operator),
        pattern!("<=?", TokenKind::Operator),

        pattern!("[A-Z][_0-9a-zA-Z]*", TokenKind::Constant),
        pattern!("[_a-zA-Z][_0-9a-zA-Z]*", TokenKind::Identifier),

        pattern!("==", TokenKind::Operator),
        pattern!("=", TokenKind::Special),
        pattern!("!=", TokenKind::Operator),
        pattern!(r"\|", TokenKind::Special),
    ];
}

/// Indentation-aware tokenizer.
///
/// Tokens are produced on demand by [`Lexer::next_token`]. A line break is
/// turned into one `Newline` token followed by the `Indent`/`Outdent` tokens
/// needed to move from the previous indentation width to the new one.
pub struct Lexer {
    source: String,
    file: Rc<String>,
    pos: usize,
    line: usize,
    column: usize,
    indentation_levels: Vec<usize>,
    queue: VecDeque<Token>,
    finished: bool,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = Rc::new(file.unwrap_or_else(|| String::from(UNKNOWN_SOURCE)));

        Lexer {
            source,
            file: file_name,
            pos: 0,
            line: 1,
            column: 0,
            indentation_levels: vec![0],
            queue: VecDeque::new(),
            finished: false,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Number of spaces starting at byte offset `from`.
    fn count_spaces(&self, from: usize) -> usize {
        self.source[from..].bytes().take_while(|b| *b == b' ').count()
    }

    fn error(&self, error_impl: ErrorImpl, column: usize, length: usize) -> Error {
        Error::new(
            error_impl,
            Position::new(self.file(), self.line, column, length),
            &self.source,
        )
    }

    /// Returns the next token, synthesizing structural tokens at line
    /// breaks. Once the input is exhausted every call returns `EOF`.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                trace!("Emitting {}", token);
                return Ok(token);
            }

            if self.at_eof() {
                return Ok(MK_TOKEN!(TokenKind::EOF, String::new(), self.column, self.line));
            }

            let rest = self.remainder();

            if rest.starts_with('\n') {
                // A line holding nothing but spaces is blank and leaves the
                // indentation untouched.
                let width = self.count_spaces(self.pos + 1);
                if self.source[self.pos + 1 + width..].starts_with('\n') {
                    self.pos += 1 + width;
                    self.line += 1;
                    continue;
                }

                self.pos += 1 + width;
                self.line += 1;
                self.column = width;

                // Trailing spaces at the end of input open no block.
                let level = if self.at_eof() { 0 } else { width };
                self.indent_to(level)?;
                continue;
            }

            if rest.starts_with(' ') {
                let spaces = self.count_spaces(self.pos);
                self.pos += spaces;
                self.column += spaces;
                continue;
            }

            return self.match_rule();
        }
    }

    /// Queues the `Newline` for a fresh line of `width` leading spaces and
    /// the indentation tokens leading to it.
    fn indent_to(&mut self, width: usize) -> Result<(), Error> {
        self.queue.push_back(MK_TOKEN!(TokenKind::Newline, String::from("\n"), 0, self.line));

        let top = self.current_level();
        if width > top {
            debug!(line = self.line, from = top, to = width, "Indent");
            self.queue.push_back(MK_TOKEN!(TokenKind::Indent, String::new(), 0, self.line));
            self.indentation_levels.push(width);
        }

        while width < self.current_level() {
            self.queue.push_back(MK_TOKEN!(TokenKind::Outdent, String::new(), 0, self.line));
            self.indentation_levels.pop();
            debug!(line = self.line, to = self.current_level(), "Outdent");

            if self.current_level() < width {
                return Err(self.error(ErrorImpl::InconsistentIndentation { width }, width, 1));
            }
        }

        Ok(())
    }

    fn current_level(&self) -> usize {
        self.indentation_levels.last().copied().unwrap_or(0)
    }

    fn match_rule(&mut self) -> Result<Token, Error> {
        let rest = self.remainder();

        for pattern in PATTERNS.iter() {
            if let Some(found) = pattern.regex.find(rest) {
                let value = found.as_str().to_string();
                let kind = if pattern.kind == TokenKind::Identifier
                    && RESERVED_LOOKUP.contains(value.as_str())
                {
                    TokenKind::Keyword
                } else {
                    pattern.kind
                };

                let token = MK_TOKEN!(kind, value, self.column, self.line);
                self.pos += token.value.len();
                self.column += token.value.chars().count();

                trace!("Emitting {}", token);
                return Ok(token);
            }
        }

        let window: String = rest.chars().take(6).collect();
        Err(self.error(ErrorImpl::UnrecognisedToken { token: window }, self.column, 1))
    }
}

/// Yields every token before `EOF`. Iteration stops at the end of input or
/// after the first fault.
impl Iterator for Lexer {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.next_token() {
            Ok(token) if token.is_eof() => {
                self.finished = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}

/// Lexes the whole of `source`. The returned tokens end with `EOF`.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        let done = token.is_eof();
        tokens.push(token);

        if done {
            break;
        }
    }

    Ok(tokens)
}
