use crate::node::NodeId;
use crate::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Quo,
    Rem,
    Eq,
    NotEq,
    Lss,
    Gtr,
    Leq,
    Geq,
    LAnd,
    LOr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Addr,
    Not,
    Pos,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Define,
    AddAssign,
    SubAssign,
    MulAssign,
    QuoAssign,
    RemAssign,
}

impl AssignOp {
    /// The binary operator a combined-assign desugars to.
    pub fn binary(self) -> Option<BinaryOp> {
        match self {
            AssignOp::AddAssign => Some(BinaryOp::Add),
            AssignOp::SubAssign => Some(BinaryOp::Sub),
            AssignOp::MulAssign => Some(BinaryOp::Mul),
            AssignOp::QuoAssign => Some(BinaryOp::Quo),
            AssignOp::RemAssign => Some(BinaryOp::Rem),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Literal {
    Int(String),
    Float(String),
    Char(char),
    String(String),
    RawString(String),
}

#[derive(Debug, Clone)]
pub enum CompositeElt {
    Positional(Expr),
    Keyed(String, Expr),
}

#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
}

#[derive(Debug, Clone)]
pub enum Expr {
    Ident {
        id: NodeId,
        name: String,
    },
    BasicLit { id: NodeId, lit: Literal },
    Paren(Box<Expr>),
    /// Type assertion; the assertion itself is erased since the target
    /// language has no static types to check against.
    TypeAssert {
        x: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        x: Box<Expr>,
        y: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        x: Box<Expr>,
    },
    Call {
        id: NodeId,
        func: Box<Expr>,
        args: Vec<Expr>,
        /// Last argument is the ellipsis-forwarded variadic slice.
        ellipsis: bool,
    },
    /// Composite literal. `ty` is the resolved type rather than a type
    /// expression grammar: the core never re-derives types, it only reads
    /// them off the program view, so no separate type-expr AST is needed
    /// here.
    CompositeLit {
        id: NodeId,
        ty: Type,
        elts: Vec<CompositeElt>,
    },
    FuncLit {
        params: Vec<Param>,
        variadic: bool,
        body: crate::ast::Block,
    },
    Selector {
        id: NodeId,
        x: Box<Expr>,
        sel: String,
    },
    Index {
        x: Box<Expr>,
        index: Box<Expr>,
    },
}

impl Expr {
    pub fn ident(id: NodeId, name: impl Into<String>) -> Expr {
        Expr::Ident { id, name: name.into() }
    }
}
