use serde::{Deserialize, Serialize};

/// Side membership of a rule node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeContext {
    /// Present unchanged on both sides.
    Context,
    /// Deleted by application.
    LeftOnly,
    /// Created by application.
    RightOnly,
    /// Present on both sides with a different label on each.
    LabelChange,
}

impl NodeContext {
    /// Returns whether the node is part of the left side.
    pub fn on_left(&self) -> bool {
        !matches!(self, NodeContext::RightOnly)
    }

    /// Returns whether the node is part of the right side.
    pub fn on_right(&self) -> bool {
        !matches!(self, NodeContext::LeftOnly)
    }

    /// Returns whether the node survives application.
    pub fn is_context(&self) -> bool {
        matches!(self, NodeContext::Context | NodeContext::LabelChange)
    }
}

/// Side membership of a rule edge. Edges never change their label; a
/// relabelled edge is a left-only plus a right-only edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeContext {
    /// Present unchanged on both sides.
    Context,
    /// Deleted by application.
    LeftOnly,
    /// Created by application.
    RightOnly,
}

impl EdgeContext {
    /// Returns whether the edge is part of the left side.
    pub fn on_left(&self) -> bool {
        !matches!(self, EdgeContext::RightOnly)
    }

    /// Returns whether the edge is part of the right side.
    pub fn on_right(&self) -> bool {
        !matches!(self, EdgeContext::LeftOnly)
    }

    /// Returns whether an edge of this context may join nodes of the given
    /// contexts.
    pub fn admits_endpoints(&self, a: NodeContext, b: NodeContext) -> bool {
        match self {
            EdgeContext::Context => a.is_context() && b.is_context(),
            EdgeContext::LeftOnly => a.on_left() && b.on_left(),
            EdgeContext::RightOnly => a.on_right() && b.on_right(),
        }
    }
}
