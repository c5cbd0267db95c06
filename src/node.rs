/// Stable identifier assigned to an AST node at construction time.
///
/// The original source language's typed-AST bridge keys its `Types`/`Defs`/
/// `Uses`/`Implicits` maps by node pointer identity. Our AST is built from
/// owned values rather than parsed into an arena, so nodes carry an explicit
/// id instead; the bridge keys its maps by `NodeId` the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Hands out increasing `NodeId`s. One per `ProgramView` builder.
#[derive(Debug, Default)]
pub struct NodeIdGen(u32);

impl NodeIdGen {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn next(&mut self) -> NodeId {
        let id = NodeId(self.0);
        self.0 += 1;
        id
    }
}
