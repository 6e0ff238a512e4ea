//! Utility macros for the front end.
//!
//! This module defines helper macros used throughout the crate:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_NODES!` - Generates the AST node catalog, the `Expression` enum and
//!   the `Visitor` trait from a single list of node definitions
//!
//! These macros reduce boilerplate in the lexer and the AST.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$column` - The 0-based column of the token
/// * `$line` - The 1-based line of the token
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, "42".to_string(), 0, 1);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $column:expr, $line:expr) => {
        Token {
            kind: $kind,
            value: $value,
            column: $column,
            line: $line,
        }
    };
}

/// Generates the AST node catalog.
///
/// Every entry becomes a struct with the declared fields plus `filename` and
/// `line`, together with:
///
/// - a positional `new` constructor taking `impl Into<FieldType>` for each
///   field (so body fields run through the `Expressions` conversions)
/// - structural `PartialEq` and `Hash` over the declared fields only
/// - `stamp_position`, which writes `filename`/`line` onto the node and every
///   node reachable through its fields
/// - `accept`, the two-stage visitor dispatch
/// - an `Expression` variant of the same name and an `ExprType` tag
///
/// The `Visitor` trait gets one hook per entry, named by the identifier after
/// `=>`.
///
/// # Example
///
/// ```ignore
/// MK_NODES! {
///     /// Identifier
///     Identifier => visit_identifier { value: String }
/// }
/// ```
#[macro_export]
macro_rules! MK_NODES {
    ($(
        $(#[$attr:meta])*
        $name:ident => $visit:ident { $($field:ident : $ty:ty),+ $(,)? }
    )+) => {
        $(
            $(#[$attr])*
            #[derive(Debug, Clone)]
            pub struct $name {
                $(pub $field: $ty,)+
                pub filename: ::std::rc::Rc<String>,
                pub line: usize,
            }

            impl $name {
                #[allow(clippy::too_many_arguments)]
                pub fn new($($field: impl Into<$ty>),+) -> Self {
                    $name {
                        $($field: $field.into(),)+
                        filename: ::std::rc::Rc::default(),
                        line: 0,
                    }
                }

                /// Offers the node to [`Visitor::visit_any`] first and falls
                /// back to the variant hook when it declines.
                pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
                    match visitor.visit_any(self) {
                        Some(output) => output,
                        None => visitor.$visit(self),
                    }
                }

                pub fn stamp_position(&mut self, filename: &::std::rc::Rc<String>, line: usize) {
                    self.filename = ::std::rc::Rc::clone(filename);
                    self.line = line;
                    $($crate::ast::ast::NodeField::stamp(&mut self.$field, filename, line);)+
                }
            }

            impl PartialEq for $name {
                fn eq(&self, other: &Self) -> bool {
                    true $(&& self.$field == other.$field)+
                }
            }

            impl ::std::hash::Hash for $name {
                fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                    $($crate::ast::ast::NodeField::hash_field(&self.$field, state);)+
                }
            }

            impl $crate::ast::ast::Node for $name {
                fn get_expr_type(&self) -> ExprType {
                    ExprType::$name
                }
                fn as_any(&self) -> &dyn ::std::any::Any {
                    self
                }
                fn filename(&self) -> &str {
                    &self.filename
                }
                fn line(&self) -> usize {
                    self.line
                }
            }

            impl From<$name> for Expression {
                fn from(node: $name) -> Self {
                    Expression::$name(node)
                }
            }
        )+

        /// Any node of the AST.
        #[derive(Debug, Clone, PartialEq, Hash)]
        pub enum Expression {
            $($name($name),)+
        }

        /// Tag naming the concrete variant of an [`Expression`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ExprType {
            $($name,)+
        }

        /// Two-stage AST visitor.
        ///
        /// [`Visitor::visit_any`] sees every node first; returning `None`
        /// lets the node fall through to its variant hook. Variant hooks
        /// default to returning `Output::default()`.
        pub trait Visitor {
            type Output: Default;

            fn visit_any(&mut self, _node: &dyn $crate::ast::ast::Node) -> Option<Self::Output> {
                None
            }

            $(
                #[doc = concat!("Called for a [`", stringify!($name), "`] the pre-hook declined.")]
                fn $visit(&mut self, _node: &$name) -> Self::Output {
                    Self::Output::default()
                }
            )+
        }

        impl Expression {
            pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
                match self {
                    $(Expression::$name(node) => node.accept(visitor),)+
                }
            }

            pub fn as_node(&self) -> &dyn $crate::ast::ast::Node {
                match self {
                    $(Expression::$name(node) => node,)+
                }
            }

            pub fn stamp_position(&mut self, filename: &::std::rc::Rc<String>, line: usize) {
                match self {
                    $(Expression::$name(node) => node.stamp_position(filename, line),)+
                }
            }
        }
    };
}
