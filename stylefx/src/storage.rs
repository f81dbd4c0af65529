use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::key::NodeMap;
use crate::{FxState, NodeAnimationState, NodeId, Value};

#[derive(Clone, Debug, Default)]
struct NodeRecord {
    values: BTreeMap<String, Value>,
    fx: NodeAnimationState,
}

/// Per-node key/value storage, owned by whatever represents the document.
///
/// A node's record is created on first write and lives until [`NodeStorage::remove`]. Scheduler
/// bookkeeping sits in a dedicated slot, so string keys set by callers can never collide with it.
#[derive(Clone, Debug, Default)]
pub struct NodeStorage {
    records: NodeMap<NodeRecord>,
}

impl NodeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes with a record.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.records.contains_key(&node)
    }

    pub fn get(&self, node: NodeId, key: &str) -> Option<&Value> {
        self.records.get(&node)?.values.get(key)
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn set(&mut self, node: NodeId, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.record_mut(node).values.insert(key.into(), value.into())
    }

    /// Stores every pair; keys not mentioned keep their values.
    pub fn set_many<I, K, V>(&mut self, node: NodeId, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let record = self.record_mut(node);
        for (key, value) in entries {
            record.values.insert(key.into(), value.into());
        }
    }

    pub fn remove_key(&mut self, node: NodeId, key: &str) -> Option<Value> {
        self.records.get_mut(&node)?.values.remove(key)
    }

    /// Drops the node's whole record. Returns `false` if there was none.
    ///
    /// This does not cancel timers; hosts should cancel the handles in
    /// [`NodeAnimationState`] first.
    pub fn remove(&mut self, node: NodeId) -> bool {
        self.records.remove(&node).is_some()
    }

    pub fn fx_state(&self, node: NodeId) -> Option<&NodeAnimationState> {
        self.records.get(&node).map(|r| &r.fx)
    }

    pub(crate) fn fx_state_mut(&mut self, node: NodeId) -> &mut NodeAnimationState {
        &mut self.record_mut(node).fx
    }

    pub fn fx_snapshot(&self, node: NodeId) -> Option<FxState> {
        self.fx_state(node).map(NodeAnimationState::snapshot)
    }

    fn record_mut(&mut self, node: NodeId) -> &mut NodeRecord {
        self.records.entry(node).or_default()
    }
}
