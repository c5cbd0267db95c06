//! Go-to-Lua source translator: a typed-AST-to-text core plus a small fixed
//! runtime library.
//!
//! The core never parses or type-checks source itself; callers hand it an
//! already-built [`ast`] tree alongside a [`ProgramView`](objects::ProgramView)
//! exposing position→type/object lookups. [`Translator::translate_node`]
//! walks a declaration, block, file, or package and emits target text
//! through a [`writer::Writer`];
//! [`prelude::emit_runtime_prelude`] emits the fixed runtime blob the output
//! depends on.

pub mod ast;
pub mod error;
pub mod node;
pub mod objects;
pub mod prelude;
pub mod tags;
pub mod translate;
pub mod types;
pub mod writer;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use error::{CoreError, CoreResult, TranslateError, TranslateErrorKind};
pub use node::{NodeId, NodeIdGen};
pub use objects::{BridgeErrorKind, ExprInfo, Object, Package, ProgramView, ValueCategory};
pub use prelude::emit_runtime_prelude;
pub use translate::{ExprCtx, Node, Translator};
