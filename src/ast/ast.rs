use std::{
    any::Any,
    fmt::Debug,
    hash::{Hash, Hasher},
    rc::Rc,
};

use super::{
    expressions::{ExprType, Expression, Expressions, FunctionArg, UseSegment},
    types::UnresolvedType,
};

/// Node Trait
///
/// Behavior shared by every node of the AST, independent of its variant.
pub trait Node: Debug {
    /// Returns the variant tag of the node.
    fn get_expr_type(&self) -> ExprType;
    /// Type conversion purposes - used with `.downcast_ref<T>()`
    fn as_any(&self) -> &dyn Any;
    /// Name of the file the node was parsed from, empty until stamped.
    fn filename(&self) -> &str;
    /// 1-based line the node was parsed from, 0 until stamped.
    fn line(&self) -> usize;
}

/// A value that can appear as a declared field of a node.
///
/// Hashing goes through this trait so that fields without a `Hash` impl
/// (floats) still take part in node hashing, and stamping goes through it
/// so that source positions reach every nested node without reflection.
pub trait NodeField {
    fn hash_field<H: Hasher>(&self, state: &mut H);

    /// Writes `filename`/`line` onto any nodes held by this field.
    fn stamp(&mut self, _filename: &Rc<String>, _line: usize) {}
}

macro_rules! plain_node_field {
    ($($ty:ty),+) => {
        $(
            impl NodeField for $ty {
                fn hash_field<H: Hasher>(&self, state: &mut H) {
                    self.hash(state);
                }
            }
        )+
    };
}

plain_node_field!(String, bool, i64, UseSegment, UnresolvedType);

impl NodeField for f64 {
    fn hash_field<H: Hasher>(&self, state: &mut H) {
        // `0.0 == -0.0`, so both must hash alike.
        let value = if *self == 0.0 { 0.0f64 } else { *self };
        value.to_bits().hash(state);
    }
}

impl<T: NodeField> NodeField for Vec<T> {
    fn hash_field<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for item in self {
            item.hash_field(state);
        }
    }

    fn stamp(&mut self, filename: &Rc<String>, line: usize) {
        for item in self.iter_mut() {
            item.stamp(filename, line);
        }
    }
}

impl<T: NodeField> NodeField for Option<T> {
    fn hash_field<H: Hasher>(&self, state: &mut H) {
        match self {
            Some(value) => {
                1u8.hash(state);
                value.hash_field(state);
            }
            None => 0u8.hash(state),
        }
    }

    fn stamp(&mut self, filename: &Rc<String>, line: usize) {
        if let Some(value) = self {
            value.stamp(filename, line);
        }
    }
}

impl<T: NodeField> NodeField for Box<T> {
    fn hash_field<H: Hasher>(&self, state: &mut H) {
        (**self).hash_field(state);
    }

    fn stamp(&mut self, filename: &Rc<String>, line: usize) {
        (**self).stamp(filename, line);
    }
}

impl NodeField for Expression {
    fn hash_field<H: Hasher>(&self, state: &mut H) {
        self.hash(state);
    }

    fn stamp(&mut self, filename: &Rc<String>, line: usize) {
        // Block contents were stamped when each statement was parsed.
        if let Expression::Expressions(_) = self {
            return;
        }

        self.stamp_position(filename, line);
    }
}

impl NodeField for Expressions {
    fn hash_field<H: Hasher>(&self, state: &mut H) {
        self.hash(state);
    }
}

impl NodeField for FunctionArg {
    fn hash_field<H: Hasher>(&self, state: &mut H) {
        self.hash(state);
    }

    fn stamp(&mut self, filename: &Rc<String>, line: usize) {
        self.stamp_position(filename, line);
    }
}

impl Expression {
    /// Stamps `filename`/`line` onto this node and every node reachable from
    /// it, stopping at nested blocks.
    pub fn stamp(&mut self, filename: &Rc<String>, line: usize) {
        NodeField::stamp(self, filename, line);
    }

    pub fn get_expr_type(&self) -> ExprType {
        self.as_node().get_expr_type()
    }

    pub fn filename(&self) -> &str {
        self.as_node().filename()
    }

    pub fn line(&self) -> usize {
        self.as_node().line()
    }

    /// Returns the wrapped node as `T`, or `None` for any other variant.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_node().as_any().downcast_ref::<T>()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::hash_map::DefaultHasher,
        hash::{Hash, Hasher},
        rc::Rc,
    };

    use crate::ast::{
        expressions::{
            Binary, Call, ExprType, Expression, Expressions, FloatLiteral, FunctionArg,
            FunctionDef, Identifier, If, IntLiteral, ModuleDef, StringLiteral, Visitor,
        },
        types::UnresolvedType,
    };

    use super::Node;

    fn int(value: i64) -> Expression {
        IntLiteral::new(value).into()
    }

    fn ident(value: &str) -> Expression {
        Identifier::new(value).into()
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_structural_equality_ignores_position() {
        let mut left = int(3);
        left.stamp(&Rc::new("a.ibex".to_string()), 4);
        let right = int(3);

        assert_eq!(left, right);
        assert_eq!(hash_of(&left), hash_of(&right));
    }

    #[test]
    fn test_equality_requires_same_variant() {
        let string: Expression = StringLiteral::new("3").into();
        let identifier = ident("3");

        assert_ne!(string, identifier);
    }

    #[test]
    fn test_float_literals_hash_consistently() {
        let left: Expression = FloatLiteral::new(2.5).into();
        let right: Expression = FloatLiteral::new(2.5).into();

        assert_eq!(left, right);
        assert_eq!(hash_of(&left), hash_of(&right));
    }

    #[test]
    fn test_signed_zero_floats_hash_consistently() {
        let positive: Expression = FloatLiteral::new(0.0).into();
        let negative: Expression = FloatLiteral::new(-0.0).into();

        assert_eq!(positive, negative);
        assert_eq!(hash_of(&positive), hash_of(&negative));
    }

    #[test]
    fn test_clone_is_deep() {
        let original: Expression = Binary::new(int(1), "+", int(2)).into();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        if let Expression::Binary(binary) = &mut copy {
            *binary.left = int(5);
        }

        assert_ne!(copy, original);
        assert_eq!(original, Expression::from(Binary::new(int(1), "+", int(2))));
    }

    #[test]
    fn test_body_normalization() {
        let single = ModuleDef::new("Foo", int(1));
        assert_eq!(single.body, Expressions::new(vec![int(1)]));

        let sequence = ModuleDef::new("Foo", vec![int(1), int(2)]);
        assert_eq!(sequence.body.len(), 2);

        let block: Expression = Expressions::new(vec![int(1), int(2)]).into();
        let unchanged = ModuleDef::new("Foo", block);
        assert_eq!(unchanged.body, sequence.body);

        let missing = ModuleDef::new("Foo", None::<Expression>);
        assert!(missing.body.is_empty());
    }

    #[test]
    fn test_stamp_reaches_nested_nodes_but_not_blocks() {
        let filename = Rc::new("stamp.ibex".to_string());
        let body_statement = {
            let mut statement = int(1);
            statement.stamp(&filename, 7);
            statement
        };

        let mut function: Expression = FunctionDef::new(
            "foo",
            vec![FunctionArg::new("a", UnresolvedType::named(["I32"]))],
            None::<UnresolvedType>,
            vec![body_statement],
        )
        .into();
        function.stamp(&filename, 2);

        let Expression::FunctionDef(function) = &function else {
            panic!("expected a function definition");
        };
        assert_eq!(function.line, 2);
        assert_eq!(&*function.filename, "stamp.ibex");
        assert_eq!(function.args[0].line, 2);
        assert_eq!(function.body.contents[0].line(), 7);
    }

    #[test]
    fn test_stamp_skips_block_itself() {
        let mut block: Expression = Expressions::new(vec![int(1)]).into();
        block.stamp(&Rc::new("x".to_string()), 3);

        assert_eq!(block.line(), 0);
        assert_eq!(block.filename(), "");
    }

    #[derive(Default)]
    struct Collector {
        seen: Vec<ExprType>,
        identifiers: Vec<String>,
        intercept_calls: bool,
    }

    impl Visitor for Collector {
        type Output = usize;

        fn visit_any(&mut self, node: &dyn Node) -> Option<usize> {
            self.seen.push(node.get_expr_type());
            if self.intercept_calls && node.get_expr_type() == ExprType::Call {
                return Some(100);
            }
            None
        }

        fn visit_identifier(&mut self, node: &Identifier) -> usize {
            self.identifiers.push(node.value.clone());
            1
        }

        fn visit_call(&mut self, node: &Call) -> usize {
            node.target.accept(self) + node.args.iter().map(|arg| arg.accept(self)).sum::<usize>()
        }
    }

    #[test]
    fn test_visitor_falls_through_to_variant_hook() {
        let call: Expression = Call::new(ident("foo"), vec![ident("a"), int(1)]).into();
        let mut collector = Collector::default();

        let result = call.accept(&mut collector);

        assert_eq!(result, 2);
        assert_eq!(collector.identifiers, vec!["foo", "a"]);
        assert_eq!(
            collector.seen,
            vec![ExprType::Call, ExprType::Identifier, ExprType::Identifier, ExprType::IntLiteral]
        );
    }

    #[test]
    fn test_visitor_pre_hook_intercepts() {
        let call: Expression = Call::new(ident("foo"), vec![ident("a")]).into();
        let mut collector = Collector {
            intercept_calls: true,
            ..Default::default()
        };

        assert_eq!(call.accept(&mut collector), 100);
        assert!(collector.identifiers.is_empty());
    }

    #[test]
    fn test_unhandled_variant_defaults() {
        let node: Expression = If::new(ident("a"), int(1), None::<Expression>).into();
        let mut collector = Collector::default();

        assert_eq!(node.accept(&mut collector), 0);
        assert_eq!(collector.seen, vec![ExprType::If]);
    }

    #[test]
    fn test_downcast_ref() {
        let node = ident("foo");

        assert_eq!(node.downcast_ref::<Identifier>().map(|id| id.value.as_str()), Some("foo"));
        assert!(node.downcast_ref::<IntLiteral>().is_none());
    }
}
