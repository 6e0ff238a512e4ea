use crate::{
    ast::expressions::{
        Expression, Expressions, FunctionArg, FunctionDef, If, ModuleDef, Use, UseSegment,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Parses the body of a declaration.
///
/// Without an `Indent` the body is the single expression that follows,
/// returned as is. Otherwise every expression up to the matching `Outdent`
/// (or the end of input) is collected into an [`Expressions`] block.
pub fn parse_body(parser: &mut Parser, consume_trailing_newline: bool) -> Result<Expression, Error> {
    parser.skip_newlines()?;

    if !parser.current_token().is_kind(TokenKind::Indent) {
        return match parser.parse_expression(BindingPower::Default)? {
            Some(node) => Ok(node),
            None => Err(parser.error_here(ErrorImpl::MissingBody)),
        };
    }

    parser.expect_and_consume(TokenKind::Indent)?;

    let mut contents = vec![];
    loop {
        parser.skip_newlines()?;

        let token = parser.current_token();
        if token.is_kind(TokenKind::Outdent) || token.is_eof() {
            break;
        }

        contents.push(parser.expect_expression(BindingPower::Default)?);
    }

    // Outdent or EOF
    parser.advance()?;
    if consume_trailing_newline && parser.current_token().is_kind(TokenKind::Newline) {
        parser.advance()?;
    }

    Ok(Expressions::new(contents).into())
}

/// `module Name <body>`
pub fn parse_module_def(parser: &mut Parser) -> Result<Expression, Error> {
    let name = parser.expect_next_and_consume(TokenKind::Constant)?.value;
    let body = parse_body(parser, true)?;

    Ok(ModuleDef::new(name, body).into())
}

/// `use A::B::{C, D}`
pub fn parse_use_expr(parser: &mut Parser) -> Result<Expression, Error> {
    parser.advance()?;

    let mut path = vec![UseSegment::Module(
        parser.expect_and_consume(TokenKind::Constant)?.value,
    )];

    while parser.current_token().is("::") {
        parser.advance()?;

        if parser.current_token().is("{") {
            parser.advance()?;

            let mut alternatives = vec![];
            while !parser.current_token().is("}") {
                alternatives.push(parser.expect_and_consume(TokenKind::Constant)?.value);
                parser.expect_delimiter(&["}", ","], "Expected '}' or ',' here:")?;

                if parser.current_token().is(",") {
                    parser.advance()?;
                }
            }
            parser.advance()?;

            path.push(UseSegment::Alternatives(alternatives));
        } else {
            path.push(UseSegment::Module(
                parser.expect_and_consume(TokenKind::Constant)?.value,
            ));
        }
    }

    Ok(Use::new(path).into())
}

fn parse_function_arg(parser: &mut Parser) -> Result<FunctionArg, Error> {
    let name = parser.expect_and_consume(TokenKind::Identifier)?.value;
    parser.expect_and_consume(":")?;
    let given_type = parser.parse_type()?;

    Ok(FunctionArg::new(name, given_type))
}

/// `fn name`, `fn name arg: Type` or `fn name(a: A, b: B)`, each with an
/// optional `-> Type`, followed by the body.
pub fn parse_fn_def(parser: &mut Parser) -> Result<Expression, Error> {
    let name = parser.expect_next_and_consume(TokenKind::Identifier)?.value;
    let mut args = vec![];

    if parser.current_token().is_identifier() {
        args.push(parse_function_arg(parser)?);
    } else if parser.current_token().is_kind(TokenKind::LParen) {
        parser.advance()?;

        while !parser.current_token().is_kind(TokenKind::RParen) {
            args.push(parse_function_arg(parser)?);
            parser.expect_delimiter(&[",", ")"], "Expected ',' or ')' in function arg list")?;

            if parser.current_token().is(",") {
                parser.advance()?;
            }
        }
        parser.advance()?;
    }

    let return_type = if parser.current_token().is("->") {
        parser.advance()?;
        Some(parser.parse_type()?)
    } else {
        None
    };

    let body = parse_body(parser, true)?;

    Ok(FunctionDef::new(name, args, return_type, body).into())
}

/// `if condition <body>` with an optional `else <body>`.
pub fn parse_if_expr(parser: &mut Parser) -> Result<Expression, Error> {
    parser.advance()?;

    let condition = parser.expect_expression(BindingPower::Default)?;
    let true_body = parse_body(parser, true)?;

    parser.skip_newlines()?;
    let false_body = if parser.current_token().is_keyword("else") {
        parser.advance()?;
        Some(parse_body(parser, true)?)
    } else {
        None
    };

    Ok(If::new(condition, true_body, false_body).into())
}
