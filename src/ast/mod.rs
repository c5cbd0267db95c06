//! Typed source-language AST the translator consumes.
//!
//! The real front end (parser + type checker) is an external collaborator;
//! this module only defines the node shapes the core operates on, as a
//! plain enum-of-structs tree rather than an arena, since the core never
//! mutates or re-derives these nodes.

pub mod decl;
pub mod expr;
pub mod stmt;

pub use decl::*;
pub use expr::*;
pub use stmt::*;

/// A line or block comment, delimiters stripped.
#[derive(Debug, Clone)]
pub enum Comment {
    Line(String),
    Block(String),
}

#[derive(Debug, Clone, Default)]
pub struct CommentGroup(pub Vec<Comment>);

/// One parsed source file: its declarations in source order.
#[derive(Debug, Default)]
pub struct File {
    pub decls: Vec<Decl>,
}

/// A whole package: its files, in the package's own order.
#[derive(Debug, Default)]
pub struct SourcePackage {
    pub name: String,
    pub path: String,
    pub files: Vec<File>,
}
