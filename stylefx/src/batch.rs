use alloc::vec::Vec;

use crate::NodeId;

/// What a single-node operation returned.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<R> {
    /// The node itself; the operation is chainable.
    Node(NodeId),
    Value(R),
}

/// The result of [`apply_to_all`].
#[derive(Clone, Debug, PartialEq)]
pub enum Batch<C, R> {
    /// Every call returned its node, so the original collection comes back for chaining.
    Nodes(C),
    /// The non-node results, in collection order.
    Values(Vec<R>),
}

impl<C, R> Batch<C, R> {
    pub fn is_nodes(&self) -> bool {
        matches!(self, Self::Nodes(_))
    }

    pub fn nodes(&self) -> Option<&C> {
        match self {
            Self::Nodes(nodes) => Some(nodes),
            Self::Values(_) => None,
        }
    }

    pub fn into_nodes(self) -> Option<C> {
        match self {
            Self::Nodes(nodes) => Some(nodes),
            Self::Values(_) => None,
        }
    }

    pub fn values(&self) -> Option<&[R]> {
        match self {
            Self::Nodes(_) => None,
            Self::Values(values) => Some(values),
        }
    }

    pub fn into_values(self) -> Option<Vec<R>> {
        match self {
            Self::Nodes(_) => None,
            Self::Values(values) => Some(values),
        }
    }
}

/// Calls `op` for every node, in collection order.
///
/// Non-node results are collected. If there are any, they are returned; otherwise the collection
/// itself is handed back so batch calls can be chained.
pub fn apply_to_all<C, R>(nodes: C, mut op: impl FnMut(NodeId) -> Outcome<R>) -> Batch<C, R>
where
    C: AsRef<[NodeId]>,
{
    let mut values = Vec::new();
    for &node in nodes.as_ref() {
        if let Outcome::Value(value) = op(node) {
            values.push(value);
        }
    }

    if values.is_empty() {
        Batch::Nodes(nodes)
    } else {
        Batch::Values(values)
    }
}
