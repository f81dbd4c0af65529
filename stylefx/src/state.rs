use alloc::vec::Vec;

use crate::{ChainToken, TimerHandle};

/// Per-node scheduler bookkeeping: the current chain and the timers armed for it.
///
/// Only [`crate::ChainScheduler`] mutates this record. Each new chain cancels every recorded
/// handle and starts both lists empty.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeAnimationState {
    pub(crate) token: Option<ChainToken>,
    pub(crate) apply_timers: Vec<TimerHandle>,
    pub(crate) complete_timers: Vec<TimerHandle>,
}

impl NodeAnimationState {
    /// The chain most recently scheduled on the node.
    pub fn token(&self) -> Option<ChainToken> {
        self.token
    }

    /// Handles of the current chain's style-apply timers, in step order.
    pub fn apply_timers(&self) -> &[TimerHandle] {
        &self.apply_timers
    }

    /// Handles of the current chain's completion timers armed so far.
    pub fn complete_timers(&self) -> &[TimerHandle] {
        &self.complete_timers
    }

    pub fn snapshot(&self) -> FxState {
        FxState {
            token: self.token,
            apply_timers: self.apply_timers.len(),
            complete_timers: self.complete_timers.len(),
        }
    }
}

/// A lightweight, serializable snapshot of a node's animation bookkeeping.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxState {
    pub token: Option<ChainToken>,
    pub apply_timers: usize,
    pub complete_timers: usize,
}
