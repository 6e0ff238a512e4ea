use crate::{
    ast::expressions::{
        Assign, Binary, BoolLiteral, Call, CallArgs, Expression, FloatLiteral, Identifier,
        IntLiteral, ModuleFunctionRef, StringLiteral,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Literals and bare identifiers.
pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.consume()?;

    match token.kind {
        TokenKind::Keyword => Ok(BoolLiteral::new(token.is("true")).into()),
        TokenKind::Integer => match token.value.trim_end_matches('L').parse::<i64>() {
            Ok(value) => Ok(IntLiteral::new(value).into()),
            Err(_) => Err(parser.error(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                &token,
            )),
        },
        TokenKind::Float => match token.value.parse::<f64>() {
            Ok(value) => Ok(FloatLiteral::new(value).into()),
            Err(_) => Err(parser.error(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                &token,
            )),
        },
        // Drop the delimiting quotes
        TokenKind::String => Ok(StringLiteral::new(&token.value[1..token.value.len() - 1]).into()),
        TokenKind::Identifier => Ok(Identifier::new(token.value).into()),
        _ => Err(parser.error(ErrorImpl::ExpectedExpression, &token)),
    }
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expression,
    bp: BindingPower,
) -> Result<Expression, Error> {
    let operator = parser.consume()?;
    let right = parser.expect_expression(bp)?;

    Ok(Binary::new(left, operator.value, right).into())
}

/// `target = value`. The value is parsed without a precedence floor, so
/// assignment chains to the right.
pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Error> {
    parser.advance()?;
    let value = parser.expect_expression(BindingPower::Default)?;

    Ok(Assign::new(left, value).into())
}

/// `args -> target`. A `CallArgs` on the left supplies the argument list,
/// anything else is the single argument.
pub fn parse_call_expr(
    parser: &mut Parser,
    left: Expression,
    bp: BindingPower,
) -> Result<Expression, Error> {
    parser.advance()?;
    let target = parser.expect_expression(bp)?;

    let args = match left {
        Expression::CallArgs(call_args) => call_args.args,
        other => vec![other],
    };

    Ok(Call::new(target, args).into())
}

/// `()`, `(expr)` or `(a, b, ...)`.
///
/// A single parenthesized expression is returned unwrapped; the empty and
/// multi-element forms become [`CallArgs`] for a following `->`.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expression, Error> {
    parser.advance()?;

    if parser.current_token().is(")") {
        parser.advance()?;
        return Ok(CallArgs::new(Vec::<Expression>::new()).into());
    }

    let first = parser.expect_expression(BindingPower::Default)?;
    parser.expect_delimiter(&[",", ")"], "Expected , or ) here:")?;

    if parser.current_token().is(")") {
        parser.advance()?;
        return Ok(first);
    }

    let mut args = vec![first];
    while !parser.current_token().is(")") {
        parser.advance()?;
        args.push(parser.expect_expression(BindingPower::Default)?);
        parser.expect_delimiter(&[",", ")"], "Expected , or ) here:")?;
    }
    parser.advance()?;

    Ok(CallArgs::new(args).into())
}

/// `A::B::name`
pub fn parse_module_function_ref(parser: &mut Parser) -> Result<Expression, Error> {
    let mut constants = vec![parser.consume()?.value];

    while parser.current_token().is("::") {
        parser.advance()?;

        if parser.current_token().is_constant() {
            constants.push(parser.consume()?.value);
        } else {
            let name = parser.expect_and_consume(TokenKind::Identifier)?.value;
            return Ok(ModuleFunctionRef::new(constants, name).into());
        }
    }

    Err(parser.error_here(ErrorImpl::MissingFunctionName {
        path: constants.join("::"),
    }))
}
