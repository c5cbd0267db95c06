use crate::ast::{AssignOp, Decl, Expr};

pub type Block = Vec<Stmt>;

#[derive(Debug, Clone)]
pub enum Stmt {
    Assign {
        lhs: Vec<Expr>,
        rhs: Vec<Expr>,
        op: AssignOp,
    },
    /// A declaration nested inside a function body; the declaration
    /// translator runs with `top_level = false`.
    Decl(Decl),
    ExprStmt(Expr),
    Return(Option<Vec<Expr>>),
    If {
        cond: Expr,
        body: Block,
        /// `Some(Box::new(Stmt::If{..}))` for `else if`, or any other
        /// statement (typically `Stmt::Block`) for a plain `else`.
        else_: Option<Box<Stmt>>,
    },
    Block(Block),
    Range {
        key: Option<String>,
        value: Option<String>,
        define: bool,
        expr: Expr,
        body: Block,
    },
}
