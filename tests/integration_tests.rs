//! Integration tests for the front end.
//!
//! These tests run whole Ibex programs through lexing and parsing and check
//! the resulting syntax tree, the positions stamped on it, and the faults
//! reported for malformed programs.

use ibex::{
    ast::{
        ast::Node,
        expressions::{Call, ExprType, Expression, FunctionDef, Identifier, ModuleDef, Visitor},
        types::UnresolvedType,
    },
    create_parser,
    errors::errors::ErrorPhase,
    lexer::{lexer::tokenize, tokens::TokenKind},
    parse,
};
use test_log::test;

const PROGRAM: &str = "\
use Std::{IO, Math}

module Geometry
  fn area(width: I32, height: I32) -> I32
    width * height

  fn describe shape: (w: I32, h: I32) -> Str
    if shape == 0
      \"empty\"
    else
      \"shape\"

fn main
  result = (3, 4) -> Geometry::area
  result -> IO::print
";

fn parse_program() -> ibex::ast::expressions::Expressions {
    parse(PROGRAM.to_string(), Some("program.ibex".to_string())).unwrap()
}

#[test]
fn test_program_top_level_shape() {
    let program = parse_program();

    let kinds: Vec<ExprType> = program.iter().map(|node| node.get_expr_type()).collect();
    assert_eq!(kinds, vec![ExprType::Use, ExprType::ModuleDef, ExprType::FunctionDef]);
}

#[test]
fn test_program_module_contents() {
    let program = parse_program();
    let module = program.contents[1].downcast_ref::<ModuleDef>().unwrap();

    assert_eq!(module.name, "Geometry");
    assert_eq!(module.body.len(), 2);

    let area = module.body.contents[0].downcast_ref::<FunctionDef>().unwrap();
    assert_eq!(area.name, "area");
    assert_eq!(area.args.len(), 2);
    assert_eq!(area.return_type, Some(UnresolvedType::named(["I32"])));
    assert_eq!(area.line, 4);

    let describe = module.body.contents[1].downcast_ref::<FunctionDef>().unwrap();
    assert_eq!(describe.args[0].given_type.to_string(), "(w: I32, h: I32)");
    assert_eq!(describe.return_type.as_ref().map(|ty| ty.to_string()), Some("Str".to_string()));
    assert_eq!(describe.body.len(), 1);
    assert_eq!(describe.body.contents[0].get_expr_type(), ExprType::If);
    assert_eq!(describe.body.contents[0].line(), 8);
}

#[test]
fn test_program_calls() {
    let program = parse_program();
    let main = program.contents[2].downcast_ref::<FunctionDef>().unwrap();

    assert_eq!(main.body.len(), 2);
    assert_eq!(main.body.contents[0].get_expr_type(), ExprType::Assign);

    let print = main.body.contents[1].downcast_ref::<Call>().unwrap();
    assert_eq!(print.args.len(), 1);
    assert_eq!(print.args[0].downcast_ref::<Identifier>().unwrap().value, "result");
    assert_eq!(print.line, 15);
    assert_eq!(print.filename(), "program.ibex");
}

#[derive(Default)]
struct CallCounter {
    calls: usize,
    functions: Vec<String>,
}

impl Visitor for CallCounter {
    type Output = ();

    fn visit_any(&mut self, node: &dyn Node) -> Option<()> {
        if node.get_expr_type() == ExprType::Call {
            self.calls += 1;
        }
        None
    }

    fn visit_module_def(&mut self, node: &ModuleDef) {
        node.body.iter().for_each(|child| child.accept(self));
    }

    fn visit_function_def(&mut self, node: &FunctionDef) {
        self.functions.push(node.name.clone());
        node.body.iter().for_each(|child| child.accept(self));
    }

    fn visit_assign(&mut self, node: &ibex::ast::expressions::Assign) {
        node.value.accept(self);
    }

    fn visit_call(&mut self, node: &Call) {
        node.args.iter().for_each(|arg| arg.accept(self));
    }
}

#[test]
fn test_visitor_walks_program() {
    let program = parse_program();
    let mut counter = CallCounter::default();

    program.iter().for_each(|node| node.accept(&mut counter));

    assert_eq!(counter.functions, vec!["area", "describe", "main"]);
    assert_eq!(counter.calls, 2);
}

#[test]
fn test_token_stream_ends_with_eof() {
    let tokens = tokenize(PROGRAM.to_string(), None).unwrap();

    assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::EOF));
    let indents = tokens.iter().filter(|token| token.kind == TokenKind::Indent).count();
    let outdents = tokens.iter().filter(|token| token.kind == TokenKind::Outdent).count();
    assert_eq!(indents, outdents);
}

#[test]
fn test_parser_can_be_driven_manually() {
    let mut parser = create_parser("a + 1\nb".to_string(), None).unwrap();

    let mut nodes: Vec<Expression> = vec![];
    while let Some(node) = parser
        .parse_expression(ibex::parser::lookups::BindingPower::Default)
        .unwrap()
    {
        nodes.push(node);
    }

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[1].line(), 2);
    assert!(parser.current_token().is_eof());
}

#[test]
fn test_reports_fault_in_nested_block() {
    let source = "module Foo\n  fn bar\n    x = \n  y\n";
    let error = parse(source.to_string(), Some("broken.ibex".to_string())).unwrap_err();

    assert_eq!(error.phase(), ErrorPhase::Parse);
    assert_eq!(error.get_error_name(), "ExpectedExpression");
    assert_eq!(error.get_position().line, 4);

    let rendered = error.to_string();
    assert!(rendered.contains("broken.ibex#3:     x = \n"));
    assert!(rendered.contains("broken.ibex#4:   y\n"));
}

#[test]
fn test_reports_lex_fault() {
    let error = parse("fn main\n  x = 1 $ 2\n".to_string(), None).unwrap_err();

    assert_eq!(error.phase(), ErrorPhase::Lex);
    assert_eq!(error.get_position().line, 2);
    assert_eq!(error.get_position().column, 8);
    assert!(error.to_string().contains("unknown source#2:   x = 1 $ 2"));
}
