//! The node catalog of the AST.
//!
//! Every node is a plain struct generated by `MK_NODES!`; [`Expression`] is
//! the enum over all of them. Fields named `*body` hold an [`Expressions`]
//! block and accept anything convertible into one: a single node, a `Vec`
//! of nodes, an existing block, or `None` for an empty block.

use std::slice::{Iter, IterMut};

use crate::MK_NODES;

use super::types::UnresolvedType;

MK_NODES! {
    /// Expressions
    /// An ordered block of nodes: the body of modules, functions and
    /// conditionals, and the result of parsing a whole file.
    Expressions => visit_expressions { contents: Vec<Expression> }

    /// Module Definition
    /// `module Name <body>`
    ModuleDef => visit_module_def { name: String, body: Expressions }

    /// Use
    /// `use A::B::{C, D}`. Each segment is a single module name or a set of
    /// alternatives.
    Use => visit_use { path: Vec<UseSegment> }

    /// Module Function Reference
    /// `A::B::name`, a function referenced through its module path.
    ModuleFunctionRef => visit_module_function_ref { constant: Vec<String>, name: String }

    /// Integer Literal
    IntLiteral => visit_int_literal { value: i64 }

    /// Float Literal
    FloatLiteral => visit_float_literal { value: f64 }

    /// String Literal
    /// The value excludes the delimiting quotes.
    StringLiteral => visit_string_literal { value: String }

    /// Bool Literal
    BoolLiteral => visit_bool_literal { value: bool }

    /// Identifier
    Identifier => visit_identifier { value: String }

    /// Binary Expression
    Binary => visit_binary { left: Box<Expression>, op: String, right: Box<Expression> }

    /// Assignment Expression
    Assign => visit_assign { target: Box<Expression>, value: Box<Expression> }

    /// Call Arguments
    /// A parenthesized argument list waiting for a `->` to turn it into a
    /// [`Call`]. Only survives in a finished AST as the empty `()`.
    CallArgs => visit_call_args { args: Vec<Expression> }

    /// Call Expression
    /// `args -> target`
    Call => visit_call { target: Box<Expression>, args: Vec<Expression> }

    /// Function Argument
    FunctionArg => visit_function_arg { name: String, given_type: UnresolvedType }

    /// Function Definition
    FunctionDef => visit_function_def {
        name: String,
        args: Vec<FunctionArg>,
        return_type: Option<UnresolvedType>,
        body: Expressions,
    }

    /// If Expression
    /// A missing `else` is an empty `false_body`.
    If => visit_if { condition: Box<Expression>, true_body: Expressions, false_body: Expressions }
}

/// One `::`-separated segment of a [`Use`] path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UseSegment {
    Module(String),
    /// `{A, B}`
    Alternatives(Vec<String>),
}

impl From<&str> for UseSegment {
    fn from(name: &str) -> Self {
        UseSegment::Module(name.to_string())
    }
}

impl From<Vec<&str>> for UseSegment {
    fn from(names: Vec<&str>) -> Self {
        UseSegment::Alternatives(names.into_iter().map(String::from).collect())
    }
}

impl Expressions {
    pub fn iter(&self) -> Iter<'_, Expression> {
        self.contents.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, Expression> {
        self.contents.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

impl Default for Expressions {
    fn default() -> Self {
        Expressions::new(Vec::new())
    }
}

impl From<Vec<Expression>> for Expressions {
    fn from(contents: Vec<Expression>) -> Self {
        Expressions::new(contents)
    }
}

/// A block stays as it is; any other node becomes a one-element block.
impl From<Expression> for Expressions {
    fn from(node: Expression) -> Self {
        match node {
            Expression::Expressions(block) => block,
            other => Expressions::new(vec![other]),
        }
    }
}

impl From<Option<Expression>> for Expressions {
    fn from(node: Option<Expression>) -> Self {
        node.map(Expressions::from).unwrap_or_default()
    }
}

impl<'a> IntoIterator for &'a Expressions {
    type Item = &'a Expression;
    type IntoIter = Iter<'a, Expression>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
