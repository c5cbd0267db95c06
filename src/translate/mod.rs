//! Translator state and top-level node dispatch.
//!
//! `Translator` carries the program view, the set of transient import
//! paths, and an optional package-name override for tests; `translate_node`
//! dispatches over a closed `Node` enum rather than the caller's untyped
//! AST, so unhandled node shapes are a compile error, not a silent no-op.

pub mod builtin;
pub mod comment;
pub mod decl;
pub mod expr;
pub mod package;
pub mod stmt;

use std::collections::HashSet;
use std::io::Write as IoWrite;

use crate::ast::{Decl, File, SourcePackage, Stmt};
use crate::error::{CoreResult, TranslateError, TranslateErrorKind};
use crate::objects::ProgramView;
use crate::writer::Writer;

/// The four concrete node shapes `translate_node` accepts, plus a catch-all
/// for anything else so an unrecognized node logs instead of panicking.
pub enum Node<'a> {
    Decl(&'a Decl),
    Block(&'a [Stmt]),
    File(&'a File),
    Package(&'a SourcePackage),
    Other(&'static str),
}

/// Threaded through expression translation: distinguishes field-access-in-
/// call (selector/method dispatch via `:`) from plain value context, and
/// lvalue (assignment target) from rvalue.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExprCtx {
    pub in_call: bool,
    pub lvalue: bool,
}

impl ExprCtx {
    pub fn value() -> Self {
        ExprCtx::default()
    }

    pub fn call() -> Self {
        ExprCtx { in_call: true, lvalue: false }
    }

    pub fn lvalue() -> Self {
        ExprCtx { in_call: false, lvalue: true }
    }
}

/// Sentinel package path that marks a call as the raw-emit escape hatch
/// rather than an ordinary function call.
pub const RAW_PKG_PATH: &str = "github.com/eandre/lunar/lua";

pub struct Translator<'p, P: ProgramView> {
    pub(crate) view: &'p P,
    transient: HashSet<String>,
    test_pkg_name: Option<String>,
}

impl<'p, P: ProgramView> Translator<'p, P> {
    pub fn new(view: &'p P) -> Self {
        Translator {
            view,
            transient: HashSet::new(),
            test_pkg_name: None,
        }
    }

    /// Bypasses package-qualified lookups for the snippet test harness,
    /// which builds bare declarations with no real enclosing package.
    pub fn with_test_pkg_name(mut self, name: impl Into<String>) -> Self {
        self.test_pkg_name = Some(name.into());
        self
    }

    pub fn test_pkg_name(&self) -> Option<&str> {
        self.test_pkg_name.as_deref()
    }

    pub fn mark_transient_package(&mut self, import_path: impl Into<String>) {
        self.transient.insert(import_path.into());
    }

    pub fn is_transient_package(&self, path: Option<&str>) -> bool {
        match path {
            Some(p) => self.transient.contains(p),
            None => false,
        }
    }

    /// The short package name to qualify top-level declarations with,
    /// preferring the snippet-test override over the program view.
    pub(crate) fn pkg_prefix(&self, node: crate::node::NodeId) -> String {
        self.test_pkg_name
            .clone()
            .or_else(|| self.view.package_name_of_node(node).map(str::to_string))
            .unwrap_or_else(|| "_".to_string())
    }

    /// Emits target code for a declaration, block, file, or package. This is
    /// the single entry point: it dispatches to the per-kind translators and
    /// threads their `Result` straight through rather than catching or
    /// recovering from anything itself.
    pub fn translate_node(&mut self, sink: &mut dyn IoWrite, node: Node<'_>) -> CoreResult<()> {
        let mut w = Writer::new(sink);
        match node {
            Node::Decl(d) => decl::translate_decl(self, &mut w, d, true)?,
            Node::Block(b) => stmt::translate_block(self, &mut w, b)?,
            Node::File(f) => package::translate_file(self, &mut w, f)?,
            Node::Package(p) => package::translate_package(self, &mut w, p)?,
            Node::Other(kind) => {
                log::warn!("lunar_go: unhandled node type {kind}");
            }
        }
        Ok(())
    }
}

pub(crate) fn err<T>(node: crate::node::NodeId, kind: TranslateErrorKind) -> CoreResult<T> {
    Err(TranslateError::new(node, kind).into())
}
