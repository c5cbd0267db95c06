//! Synthetic program view for snippet tests.
//!
//! Builds a single in-memory package and lets a test check generated text
//! against a fixed string rather than parsing real source, giving the test
//! harness a hand-buildable `ProgramView` to stand in for a full
//! type-checker.

use std::collections::HashMap;

use crate::node::{NodeId, NodeIdGen};
use crate::objects::{ExprInfo, Object, Package, ProgramView, ValueCategory};
use crate::types::Type;

/// A single fake package holding every node the test built, plus a node-id
/// generator so callers don't have to track ids by hand.
pub struct FakeProgram {
    pub gen: NodeIdGen,
    pkg: Package,
}

impl FakeProgram {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        FakeProgram {
            gen: NodeIdGen::new(),
            pkg: Package::new(name, path),
        }
    }

    pub fn next_id(&mut self) -> NodeId {
        self.gen.next()
    }

    pub fn set_type(&mut self, node: NodeId, ty: Type, category: ValueCategory) {
        self.pkg.types.insert(node, ExprInfo { ty, category });
    }

    pub fn set_def(&mut self, node: NodeId, obj: Object) {
        self.pkg.defs.insert(node, obj);
    }

    pub fn set_use(&mut self, node: NodeId, obj: Object) {
        self.pkg.uses.insert(node, obj);
    }

    pub fn set_implicit(&mut self, node: NodeId, obj: Object) {
        self.pkg.implicits.insert(node, obj);
    }

    /// Declares a variable and records both its type and its use-site
    /// object in one call, the common case for snippet fixtures.
    pub fn declare_ident(&mut self, node: NodeId, ty: Type, obj: Object) {
        self.set_type(node, ty, ValueCategory::Variable);
        self.set_use(node, obj);
    }
}

impl ProgramView for FakeProgram {
    fn package_of(&self, _node: NodeId) -> Option<&Package> {
        Some(&self.pkg)
    }
}

/// Multiple fake packages keyed by an explicit per-node assignment, for
/// tests that need cross-package qualification.
#[derive(Default)]
pub struct FakeMultiProgram {
    pub gen: NodeIdGen,
    packages: Vec<Package>,
    node_pkg: HashMap<NodeId, usize>,
}

impl FakeMultiProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_package(&mut self, name: impl Into<String>, path: impl Into<String>) -> usize {
        self.packages.push(Package::new(name, path));
        self.packages.len() - 1
    }

    pub fn next_id(&mut self) -> NodeId {
        self.gen.next()
    }

    pub fn assign(&mut self, node: NodeId, pkg_idx: usize) {
        self.node_pkg.insert(node, pkg_idx);
    }

    pub fn package_mut(&mut self, idx: usize) -> &mut Package {
        &mut self.packages[idx]
    }
}

impl ProgramView for FakeMultiProgram {
    fn package_of(&self, node: NodeId) -> Option<&Package> {
        self.node_pkg.get(&node).map(|&i| &self.packages[i])
    }
}
