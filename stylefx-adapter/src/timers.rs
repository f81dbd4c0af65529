use alloc::collections::BTreeMap;

use stylefx::{FxTask, NodeId, TimerHandle};

/// One-shot timers on a manual clock.
///
/// Nothing fires by itself: the owner pulls due tasks with [`TimerQueue::pop_due`], which also
/// moves the clock to each task's scheduled instant. Timers due at the same instant fire in the
/// order they were armed.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_seq: u64,
    queue: BTreeMap<(u64, u64), FxTask>,
    deadlines: BTreeMap<u64, u64>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of armed timers.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn arm(&mut self, delay_ms: u64, task: FxTask) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        let fire_at = self.now_ms.saturating_add(delay_ms);
        self.queue.insert((fire_at, seq), task);
        self.deadlines.insert(seq, fire_at);
        TimerHandle(seq)
    }

    /// Returns `false` if the timer already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let Some(fire_at) = self.deadlines.remove(&handle.0) else {
            return false;
        };
        self.queue.remove(&(fire_at, handle.0)).is_some()
    }

    /// When an armed timer fires, if it is still armed.
    pub fn deadline(&self, handle: TimerHandle) -> Option<u64> {
        self.deadlines.get(&handle.0).copied()
    }

    /// The earliest instant at which some timer fires.
    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.keys().next().map(|&(fire_at, _)| fire_at)
    }

    /// Number of armed timers carrying a task for `node`.
    pub fn pending_for(&self, node: NodeId) -> usize {
        self.queue.values().filter(|task| task.node() == node).count()
    }

    /// Removes the earliest timer due at or before `until_ms` and moves the clock to its instant.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<FxTask> {
        let &(fire_at, seq) = self.queue.keys().next()?;
        if fire_at > until_ms {
            return None;
        }
        let task = self.queue.remove(&(fire_at, seq))?;
        self.deadlines.remove(&seq);
        self.now_ms = self.now_ms.max(fire_at);
        Some(task)
    }

    /// Moves the clock forward. The clock never goes back.
    pub fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}
