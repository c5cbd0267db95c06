use crate::ast::{Block, CommentGroup};
use crate::node::NodeId;
use crate::types::Type;

#[derive(Debug, Clone)]
pub struct ImportSpec {
    pub node: NodeId,
    pub path: String,
    /// Name of the imported package, used as the default local binding.
    pub pkg_name: String,
    /// Explicit alias (`import foo "path"`), if any and non-dot.
    pub alias: Option<String>,
    /// `import _ "path"`.
    pub anonymous: bool,
    /// `import . "path"`.
    pub dot: bool,
}

#[derive(Debug, Clone)]
pub struct TypeSpec {
    pub node: NodeId,
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone)]
pub struct ValueSpec {
    pub node: NodeId,
    pub names: Vec<String>,
    pub ty: Option<Type>,
    pub values: Vec<crate::ast::Expr>,
}

#[derive(Debug, Clone)]
pub struct Receiver {
    pub name: String,
    pub type_name: String,
}

#[derive(Debug, Clone)]
pub struct FuncDecl {
    pub node: NodeId,
    pub name: String,
    pub receiver: Option<Receiver>,
    pub params: Vec<crate::ast::Param>,
    pub variadic: bool,
    pub body: Block,
    pub doc: CommentGroup,
}

#[derive(Debug, Clone)]
pub enum Decl {
    Import(ImportSpec),
    Type(TypeSpec),
    Value(ValueSpec),
    Func(FuncDecl),
}
