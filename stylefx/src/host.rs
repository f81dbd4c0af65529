use alloc::string::String;

use crate::{AnimationStep, ChainScheduler, FxTask, NodeId, NodeStorage, StyleMap, TimerHandle, Value};

/// The capabilities the scheduler consumes from its host.
///
/// A host owns the nodes, their [`NodeStorage`], and a one-shot timer facility. When a timer
/// armed through [`FxHost::arm_timer`] fires, the host passes the task back to
/// [`ChainScheduler::run`]. A host must not run a task whose timer was cancelled.
///
/// Timer delays are relative to the host's notion of "now". While a fired task runs, "now" is
/// expected to be that timer's scheduled instant, so timers armed from inside it stay exact.
pub trait FxHost {
    /// Writes `props` onto the node's style. Unknown nodes are ignored.
    fn write_style(&mut self, node: NodeId, props: &StyleMap);

    /// The node's current computed value for a hyphen-case property.
    fn computed_style(&self, node: NodeId, property: &str) -> Option<String>;

    fn arm_timer(&mut self, delay_ms: u64, task: FxTask) -> TimerHandle;

    /// Cancels a timer. Cancelling a timer that already fired is a no-op.
    fn cancel_timer(&mut self, handle: TimerHandle);

    fn storage(&self) -> &NodeStorage;

    fn storage_mut(&mut self) -> &mut NodeStorage;
}

/// What a completion callback sees: its node and the host, with the scheduler that fired it.
pub struct FxContext<'a> {
    scheduler: &'a ChainScheduler,
    host: &'a mut dyn FxHost,
    node: NodeId,
}

impl<'a> FxContext<'a> {
    pub(crate) fn new(scheduler: &'a ChainScheduler, host: &'a mut dyn FxHost, node: NodeId) -> Self {
        Self {
            scheduler,
            host,
            node,
        }
    }

    /// The node the callback is bound to.
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn scheduler(&self) -> &ChainScheduler {
        self.scheduler
    }

    pub fn host(&self) -> &dyn FxHost {
        &*self.host
    }

    pub fn host_mut(&mut self) -> &mut dyn FxHost {
        &mut *self.host
    }

    /// Schedules a new chain on this node, superseding the current one.
    pub fn fx<I>(&mut self, steps: I) -> NodeId
    where
        I: IntoIterator,
        I::Item: Into<AnimationStep>,
    {
        self.scheduler.schedule(&mut *self.host, self.node, steps)
    }

    pub fn clear_fx(&mut self) -> NodeId {
        self.scheduler.clear_fx(&mut *self.host, self.node)
    }

    pub fn set_css(&mut self, props: impl Into<StyleMap>) -> NodeId {
        self.scheduler
            .set_css(&mut *self.host, self.node, &props.into())
    }

    pub fn computed_style(&self, property: &str) -> Option<String> {
        self.host.computed_style(self.node, property)
    }

    pub fn data(&self, key: &str) -> Option<&Value> {
        self.host.storage().get(self.node, key)
    }

    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let node = self.node;
        self.host.storage_mut().set(node, key, value)
    }
}
