/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: `Program` and the `Statement` / `Expression` sum types
/// - expressions: Node structs for each expression kind
/// - statements: Node structs for each statement kind
///
/// Every node renders back to canonical source through `Display`.
pub mod ast;
pub mod expressions;
pub mod statements;
