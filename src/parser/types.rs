//! Type parsing implementation.
//!
//! Type annotations are parsed by recursive descent on the same token cursor
//! as expressions, wherever the grammar expects a type. It supports:
//!
//! - Named types (`A::B`)
//! - Tuple types (`(a: A, B)`)
//! - Array types (`[]T`)
//! - Function types (`fn (A, B) -> R`, `fn A`, `fn`)

use crate::{
    ast::types::UnresolvedType,
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
};

use super::parser::Parser;

/// Parses the type annotation at the cursor.
pub fn parse_type(parser: &mut Parser) -> Result<UnresolvedType, Error> {
    if parser.current_token().is("(") {
        return parse_tuple_type(parser);
    }

    if parser.current_token().is("[") {
        parser.expect_next_and_consume("]")?;
        return Ok(UnresolvedType::array(parse_type(parser)?));
    }

    if parser.current_token().is_keyword("fn") {
        return parse_function_type(parser);
    }

    parse_named_type(parser)
}

/// Whether `token` can begin a type without parentheses around it.
fn starts_bare_type(token: &Token) -> bool {
    token.is_constant() || token.is_keyword("fn") || token.is("(") || token.is("[")
}

fn parse_tuple_type(parser: &mut Parser) -> Result<UnresolvedType, Error> {
    parser.advance()?;

    let mut entries = vec![];
    while !parser.current_token().is(")") {
        let name = if parser.current_token().is_identifier() {
            let name = parser.consume()?.value;
            parser.expect_and_consume(":")?;
            Some(name)
        } else {
            None
        };

        entries.push((name, parse_type(parser)?));
        parser.expect_delimiter(&[",", ")"], "Expected , or ) in tuple signature here:")?;

        if parser.current_token().is(",") {
            parser.advance()?;
        }
    }
    parser.advance()?;

    Ok(UnresolvedType::tuple(entries))
}

fn parse_function_type(parser: &mut Parser) -> Result<UnresolvedType, Error> {
    parser.advance()?;

    let mut arg_types = vec![];
    if parser.current_token().is("(") {
        parser.advance()?;

        while !parser.current_token().is(")") {
            arg_types.push(parse_type(parser)?);
            parser.expect_delimiter(&[")", ","], "Expected , or ) in function signature")?;

            if parser.current_token().is(",") {
                parser.advance()?;
            }
        }
        parser.advance()?;
    } else if starts_bare_type(parser.current_token()) {
        arg_types.push(parse_type(parser)?);
    }

    let return_type = if parser.current_token().is("->") {
        parser.advance()?;
        Some(parse_type(parser)?)
    } else {
        None
    };

    Ok(UnresolvedType::function(arg_types, return_type))
}

fn parse_named_type(parser: &mut Parser) -> Result<UnresolvedType, Error> {
    let mut names = vec![parser.expect_and_consume(TokenKind::Constant)?.value];

    while parser.current_token().is("::") {
        names.push(parser.expect_next_and_consume(TokenKind::Constant)?.value);
    }

    Ok(UnresolvedType::Named { names })
}
