use crate::{
    ast::expressions::Expression,
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
};

use super::{expr::*, parser::Parser, stmt::*};

/// Precedence of an infix rule. A rule keeps extending the left-hand side
/// only while its binding power is strictly greater than the caller's.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default = 0,
    Assignment = 1,
    Call = 3,
    LogicalOr = 4,
    LogicalAnd = 5,
    Equality = 9,
    Relational = 10,
    Modulo = 11,
    Additive = 12,
    Multiplicative = 13,
}

pub type TokenMatcher = fn(&Token) -> bool;
pub type PrefixHandler = fn(&mut Parser) -> Result<Expression, Error>;
pub type InfixHandler = fn(&mut Parser, Expression, BindingPower) -> Result<Expression, Error>;

/// A rule that starts an expression at a token accepted by `matcher`.
#[derive(Clone, Copy)]
pub struct PrefixRule {
    pub name: &'static str,
    pub matcher: TokenMatcher,
    pub handler: PrefixHandler,
}

/// A rule that extends an already parsed expression at a token accepted by
/// `matcher`.
#[derive(Clone, Copy)]
pub struct InfixRule {
    pub name: &'static str,
    pub binding_power: BindingPower,
    pub matcher: TokenMatcher,
    pub handler: InfixHandler,
}

/// Registers the Ibex grammar. Registration order is priority order: the
/// first rule whose matcher accepts the current token is used.
pub fn create_token_lookups(parser: &mut Parser) {
    // Literals and symbols
    parser.prefix("bool", |token: &Token| token.is("true") || token.is("false"), parse_primary_expr);
    parser.prefix("integer", |token: &Token| token.is_kind(TokenKind::Integer), parse_primary_expr);
    parser.prefix("float", |token: &Token| token.is_kind(TokenKind::Float), parse_primary_expr);
    parser.prefix("string", |token: &Token| token.is_kind(TokenKind::String), parse_primary_expr);
    parser.prefix("identifier", |token: &Token| token.is_identifier(), parse_primary_expr);

    // Declarations
    parser.prefix("module", |token: &Token| token.is_keyword("module"), parse_module_def);
    parser.prefix("use", |token: &Token| token.is_keyword("use"), parse_use_expr);
    parser.prefix("scoped reference", |token: &Token| token.is_constant(), parse_module_function_ref);

    parser.prefix("grouping", |token: &Token| token.is_kind(TokenKind::LParen), parse_grouping_expr);
    parser.prefix("fn", |token: &Token| token.is_keyword("fn"), parse_fn_def);
    parser.prefix("if", |token: &Token| token.is_keyword("if"), parse_if_expr);

    // Additive and multiplicative
    parser.infix("+", BindingPower::Additive, |token: &Token| token.is_operator("+"), parse_binary_expr);
    parser.infix("-", BindingPower::Additive, |token: &Token| token.is_operator("-"), parse_binary_expr);
    parser.infix("*", BindingPower::Multiplicative, |token: &Token| token.is_operator("*"), parse_binary_expr);
    parser.infix("/", BindingPower::Multiplicative, |token: &Token| token.is_operator("/"), parse_binary_expr);
    parser.infix("%", BindingPower::Modulo, |token: &Token| token.is_operator("%"), parse_binary_expr);

    // Logical
    parser.infix("&&", BindingPower::LogicalAnd, |token: &Token| token.is_operator("&&"), parse_binary_expr);
    parser.infix("||", BindingPower::LogicalOr, |token: &Token| token.is_operator("||"), parse_binary_expr);

    // Relational
    parser.infix("<", BindingPower::Relational, |token: &Token| token.is_operator("<"), parse_binary_expr);
    parser.infix("<=", BindingPower::Relational, |token: &Token| token.is_operator("<="), parse_binary_expr);
    parser.infix(">", BindingPower::Relational, |token: &Token| token.is_operator(">"), parse_binary_expr);
    parser.infix(">=", BindingPower::Relational, |token: &Token| token.is_operator(">="), parse_binary_expr);
    parser.infix("==", BindingPower::Equality, |token: &Token| token.is_operator("=="), parse_binary_expr);
    parser.infix("!=", BindingPower::Equality, |token: &Token| token.is_operator("!="), parse_binary_expr);

    parser.infix("=", BindingPower::Assignment, |token: &Token| token.is("="), parse_assignment_expr);
    parser.infix("->", BindingPower::Call, |token: &Token| token.is("->"), parse_call_expr);
}
