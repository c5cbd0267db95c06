//! Objects, packages, and the typed-AST bridge.
//!
//! The translator never type-checks or resolves names itself; it queries
//! this bridge for what an external type checker already knows about each
//! node (its type, and the declaration or import it refers to).

use std::collections::HashMap;

use crate::node::NodeId;
use crate::types::Type;

/// Discriminated object kind an identifier can refer to.
#[derive(Debug, Clone)]
pub enum Object {
    PackageName {
        path: String,
        name: String,
    },
    Variable {
        pkg: Option<String>,
        is_field: bool,
        /// Declared at package scope vs. inside a function body. Local
        /// variables still carry a home package in the source language's
        /// own type checker, so "has a package" alone can't distinguish
        /// function-local identifiers from package-level ones; scope is
        /// tracked explicitly instead.
        package_level: bool,
    },
    Function {
        pkg: Option<String>,
        package_level: bool,
    },
    TypeName {
        pkg: Option<String>,
    },
    Constant {
        pkg: Option<String>,
        package_level: bool,
    },
}

impl Object {
    pub fn pkg(&self) -> Option<&str> {
        match self {
            Object::PackageName { path, .. } => Some(path.as_str()),
            Object::Variable { pkg, .. } | Object::Function { pkg, .. } | Object::Constant { pkg, .. } => {
                pkg.as_deref()
            }
            Object::TypeName { pkg } => pkg.as_deref(),
        }
    }

    pub fn is_field(&self) -> bool {
        matches!(self, Object::Variable { is_field: true, .. })
    }

    /// Named types are always declared at package scope in the source
    /// language.
    pub fn is_package_level(&self) -> bool {
        match self {
            Object::PackageName { .. } | Object::TypeName { .. } => true,
            Object::Variable { package_level, .. }
            | Object::Function { package_level, .. }
            | Object::Constant { package_level, .. } => *package_level,
        }
    }
}

/// What an expression's type-and-value classification says about its callee
/// role: is it a builtin, a type conversion, or an ordinary call/value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueCategory {
    Value,
    Variable,
    Builtin,
    Type,
    Constant,
}

#[derive(Debug, Clone)]
pub struct ExprInfo {
    pub ty: Type,
    pub category: ValueCategory,
}

impl ExprInfo {
    pub fn is_builtin(&self) -> bool {
        self.category == ValueCategory::Builtin
    }

    pub fn is_type(&self) -> bool {
        self.category == ValueCategory::Type
    }
}

/// A package record as supplied by the external loader.
#[derive(Debug, Default)]
pub struct Package {
    pub name: String,
    pub path: String,
    pub types: HashMap<NodeId, ExprInfo>,
    pub defs: HashMap<NodeId, Object>,
    pub uses: HashMap<NodeId, Object>,
    pub implicits: HashMap<NodeId, Object>,
}

impl Package {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            ..Default::default()
        }
    }
}

/// Errors the bridge raises when information is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeErrorKind {
    NoPackageFound,
    TypeNotKnown,
    ObjectNotKnown,
    ImplicitNotKnown,
}

impl std::fmt::Display for BridgeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            BridgeErrorKind::NoPackageFound => "no enclosing package found for node",
            BridgeErrorKind::TypeNotKnown => "no type information known for node",
            BridgeErrorKind::ObjectNotKnown => "no object known for identifier",
            BridgeErrorKind::ImplicitNotKnown => "no implicit object known for import",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for BridgeErrorKind {}

/// The typed-AST bridge: a thin, read-only façade over the program view.
/// Implementors own the actual package/type/object tables; this trait just
/// knows how to find the enclosing package for a node and query it.
pub trait ProgramView {
    /// The package record enclosing the given node, if any.
    fn package_of(&self, node: NodeId) -> Option<&Package>;

    fn expr_info(&self, node: NodeId) -> Result<&ExprInfo, BridgeErrorKind> {
        let pkg = self.package_of(node).ok_or(BridgeErrorKind::NoPackageFound)?;
        pkg.types.get(&node).ok_or(BridgeErrorKind::TypeNotKnown)
    }

    fn def_of(&self, node: NodeId) -> Result<&Object, BridgeErrorKind> {
        let pkg = self.package_of(node).ok_or(BridgeErrorKind::NoPackageFound)?;
        pkg.defs.get(&node).ok_or(BridgeErrorKind::ObjectNotKnown)
    }

    fn use_of(&self, node: NodeId) -> Result<&Object, BridgeErrorKind> {
        let pkg = self.package_of(node).ok_or(BridgeErrorKind::NoPackageFound)?;
        pkg.uses.get(&node).ok_or(BridgeErrorKind::ObjectNotKnown)
    }

    fn implicit_of(&self, node: NodeId) -> Result<&Object, BridgeErrorKind> {
        let pkg = self.package_of(node).ok_or(BridgeErrorKind::NoPackageFound)?;
        pkg.implicits
            .get(&node)
            .ok_or(BridgeErrorKind::ImplicitNotKnown)
    }

    fn package_name_of_node(&self, node: NodeId) -> Option<&str> {
        self.package_of(node).map(|p| p.name.as_str())
    }
}
