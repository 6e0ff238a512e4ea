/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Node traits, field plumbing and `Expression` helpers
/// - expressions: The node catalog, the `Expression` enum and the `Visitor`
/// - types: Unresolved type annotations
pub mod ast;
pub mod expressions;
pub mod types;
