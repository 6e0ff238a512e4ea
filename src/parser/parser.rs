//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the generic Pratt engine: a token cursor over the
//! lexer, ordered registries of prefix and infix rules, precedence climbing
//! in [`Parser::parse_expression`] and the `expect` family used by rules to
//! validate tokens. The Ibex grammar itself is registered by
//! [`create_token_lookups`].

use std::{fmt::Display, mem, rc::Rc};

use tracing::{debug, instrument, trace};

use crate::{
    ast::{
        expressions::{Expression, Expressions},
        types::UnresolvedType,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::{Lexer, UNKNOWN_SOURCE},
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BindingPower, InfixHandler, InfixRule, PrefixHandler, PrefixRule,
        TokenMatcher,
    },
    types::parse_type,
};

/// What an `expect` call requires of a token: a kind, an exact text, or
/// both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected<'a> {
    Kind(TokenKind),
    Value(&'a str),
    KindAndValue(TokenKind, &'a str),
}

impl Expected<'_> {
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            Expected::Kind(kind) => token.is_kind(*kind),
            Expected::Value(value) => token.is(value),
            Expected::KindAndValue(kind, value) => token.is_kind_with(*kind, value),
        }
    }
}

impl From<TokenKind> for Expected<'_> {
    fn from(kind: TokenKind) -> Self {
        Expected::Kind(kind)
    }
}

impl<'a> From<&'a str> for Expected<'a> {
    fn from(value: &'a str) -> Self {
        Expected::Value(value)
    }
}

impl<'a> From<(TokenKind, &'a str)> for Expected<'a> {
    fn from((kind, value): (TokenKind, &'a str)) -> Self {
        Expected::KindAndValue(kind, value)
    }
}

/// Renders the tail of "Expected token... here:".
impl Display for Expected<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Kind(kind) => write!(f, " of type {}", kind),
            Expected::Value(value) => write!(f, " with value of '{}'", value),
            Expected::KindAndValue(kind, value) => {
                write!(f, " of type {} with value of '{}'", kind, value)
            }
        }
    }
}

/// The main parser structure that maintains parsing state.
///
/// It pulls tokens lazily from its [`Lexer`], so only the current token is
/// held. Rules are tried in registration order.
pub struct Parser {
    lexer: Lexer,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// The token under the cursor
    current: Token,
    /// Ordered prefix (null denotation) rules
    prefix_lookup: Vec<PrefixRule>,
    /// Ordered infix (left denotation) rules
    infix_lookup: Vec<InfixRule>,
}

impl Parser {
    /// Creates a parser with empty rule registries, positioned on the first
    /// token of `source`.
    pub fn new(source: String, file: Option<String>) -> Result<Self, Error> {
        let mut lexer = Lexer::new(source, file);
        let current = lexer.next_token()?;

        Ok(Parser {
            file: lexer.file(),
            lexer,
            current,
            prefix_lookup: vec![],
            infix_lookup: vec![],
        })
    }

    pub fn source(&self) -> &str {
        self.lexer.source()
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Moves the cursor to the next token.
    pub fn advance(&mut self) -> Result<(), Error> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    /// Advances and returns the token that was current.
    pub fn consume(&mut self) -> Result<Token, Error> {
        let next = self.lexer.next_token()?;
        Ok(mem::replace(&mut self.current, next))
    }

    pub fn skip_newlines(&mut self) -> Result<(), Error> {
        while self.current.is_kind(TokenKind::Newline) {
            self.advance()?;
        }

        Ok(())
    }

    /// Registers a prefix rule after all existing ones.
    pub fn prefix(&mut self, name: &'static str, matcher: TokenMatcher, handler: PrefixHandler) {
        self.prefix_lookup.push(PrefixRule {
            name,
            matcher,
            handler,
        });
    }

    /// Registers an infix rule after all existing ones.
    pub fn infix(
        &mut self,
        name: &'static str,
        binding_power: BindingPower,
        matcher: TokenMatcher,
        handler: InfixHandler,
    ) {
        self.infix_lookup.push(InfixRule {
            name,
            binding_power,
            matcher,
            handler,
        });
    }

    fn find_prefix(&self) -> Option<PrefixRule> {
        self.prefix_lookup
            .iter()
            .find(|rule| (rule.matcher)(&self.current))
            .copied()
    }

    fn find_infix(&self) -> Option<InfixRule> {
        self.infix_lookup
            .iter()
            .find(|rule| (rule.matcher)(&self.current))
            .copied()
    }

    /// Binding power of the infix rule matching the current token, or
    /// `Default` when none does.
    pub fn current_binding_power(&self) -> BindingPower {
        self.find_infix()
            .map(|rule| rule.binding_power)
            .unwrap_or(BindingPower::Default)
    }

    /// Parses the expression at the cursor.
    ///
    /// Returns `Ok(None)` when no prefix rule accepts the current token;
    /// callers decide whether that is a fault. The result and every node
    /// reachable from it, up to nested blocks, is stamped with the file name
    /// and the line the expression started on.
    pub fn parse_expression(&mut self, bp: BindingPower) -> Result<Option<Expression>, Error> {
        self.skip_newlines()?;

        let line = self.current.line;
        let Some(rule) = self.find_prefix() else {
            return Ok(None);
        };

        trace!(rule = rule.name, token = %self.current, "Prefix");
        let mut left = (rule.handler)(self)?;

        while self.current_binding_power() > bp {
            let Some(rule) = self.find_infix() else {
                break;
            };

            trace!(rule = rule.name, token = %self.current, "Infix");
            left = (rule.handler)(self, left, rule.binding_power)?;
        }

        left.stamp(&self.file, line);
        Ok(Some(left))
    }

    /// Like [`Parser::parse_expression`], but a missing expression is a
    /// fault.
    pub fn expect_expression(&mut self, bp: BindingPower) -> Result<Expression, Error> {
        match self.parse_expression(bp)? {
            Some(expression) => Ok(expression),
            None => Err(self.error_here(ErrorImpl::ExpectedExpression)),
        }
    }

    pub fn parse_type(&mut self) -> Result<UnresolvedType, Error> {
        parse_type(self)
    }

    fn check(&self, expected: Expected<'_>) -> Result<Token, Error> {
        if expected.matches(&self.current) {
            Ok(self.current.clone())
        } else {
            Err(self.error_here(ErrorImpl::UnexpectedToken {
                expected: expected.to_string(),
            }))
        }
    }

    /// Checks the current token and returns a copy of it.
    pub fn expect<'a>(&mut self, expected: impl Into<Expected<'a>>) -> Result<Token, Error> {
        self.check(expected.into())
    }

    /// Checks the current token, then moves past it.
    pub fn expect_and_consume<'a>(
        &mut self,
        expected: impl Into<Expected<'a>>,
    ) -> Result<Token, Error> {
        let token = self.check(expected.into())?;
        self.advance()?;
        Ok(token)
    }

    /// Advances, then checks the new current token.
    pub fn expect_next<'a>(&mut self, expected: impl Into<Expected<'a>>) -> Result<Token, Error> {
        self.advance()?;
        self.check(expected.into())
    }

    /// Advances, checks the new current token, then moves past it.
    pub fn expect_next_and_consume<'a>(
        &mut self,
        expected: impl Into<Expected<'a>>,
    ) -> Result<Token, Error> {
        let token = self.expect_next(expected)?;
        self.advance()?;
        Ok(token)
    }

    /// Checks that the current token is one of `delimiters`, failing with
    /// `message` otherwise. Does not advance.
    pub fn expect_delimiter(&self, delimiters: &[&str], message: &str) -> Result<(), Error> {
        if delimiters.iter().any(|delimiter| self.current.is(delimiter)) {
            return Ok(());
        }

        Err(self.error_here(ErrorImpl::UnexpectedTokenDetailed {
            token: self.current.value.clone(),
            message: message.to_string(),
        }))
    }

    /// Builds a fault pointing at `token`.
    pub fn error(&self, error_impl: ErrorImpl, token: &Token) -> Error {
        Error::new(
            error_impl,
            Position::new(
                self.file(),
                token.line,
                token.column,
                token.underline_length(),
            ),
            self.source(),
        )
    }

    /// Builds a fault pointing at the current token.
    pub fn error_here(&self, error_impl: ErrorImpl) -> Error {
        self.error(error_impl, &self.current)
    }
}

/// Creates a parser for `source` with the Ibex grammar registered.
pub fn create_parser(source: String, file: Option<String>) -> Result<Parser, Error> {
    let mut parser = Parser::new(source, file)?;
    create_token_lookups(&mut parser);

    Ok(parser)
}

/// Parses a whole Ibex source file.
///
/// Top-level expressions are collected until none can be parsed; any input
/// left at that point is a fault.
#[instrument(skip_all, fields(file = file.as_deref().unwrap_or(UNKNOWN_SOURCE)))]
pub fn parse(source: String, file: Option<String>) -> Result<Expressions, Error> {
    let mut parser = create_parser(source, file)?;
    let mut contents = vec![];

    while let Some(node) = parser.parse_expression(BindingPower::Default)? {
        contents.push(node);
    }

    if !parser.current_token().is_eof() {
        return Err(parser.error_here(ErrorImpl::TrailingInput {
            token: parser.current_token().to_string(),
        }));
    }

    debug!(nodes = contents.len(), "Parsed");
    Ok(Expressions::new(contents))
}
