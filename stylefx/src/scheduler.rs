use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::step::{ArmedStep, TaskKind};
use crate::{
    AnimationStep, ChainToken, FxContext, FxHost, FxOptions, FxTask, NodeAnimationState, NodeId,
    StyleMap, resolve_map,
};

/// Offsets of one step, measured from the moment its chain was scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepTiming {
    pub apply_at_ms: u64,
    /// `None` when the step has no completion callback.
    pub complete_at_ms: Option<u64>,
}

/// Schedules chains of transition steps on host nodes.
///
/// The scheduler itself holds no per-node state. Everything it remembers about a node (the
/// current [`ChainToken`] and the timers armed for it) lives in the host's
/// [`crate::NodeStorage`], which is what makes supersession work: scheduling on a node first
/// cancels every timer recorded there.
///
/// Timing is computed, not observed. Step `i` is written at
/// `sum(d_0..d_{i-1}) * 1000 + lead_in` ms (`lead_in` alone for the first step), and its
/// completion callback fires `d_i * 1000 - lead_out` ms after that.
#[derive(Clone, Debug, Default)]
pub struct ChainScheduler {
    options: FxOptions,
}

impl ChainScheduler {
    pub fn new(options: FxOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FxOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: FxOptions) {
        self.options = options;
    }

    /// Clones the current options, applies `f`, then stores the result.
    pub fn update_options(&mut self, f: impl FnOnce(&mut FxOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.options = next;
    }

    /// Starts a new chain on `node` and returns the node.
    ///
    /// Every timer of the node's previous chain is cancelled before the first new timer is
    /// armed, so nothing from the superseded chain (style writes or completion callbacks) runs
    /// afterwards. An empty `steps` only cancels.
    pub fn schedule<I>(&self, host: &mut dyn FxHost, node: NodeId, steps: I) -> NodeId
    where
        I: IntoIterator,
        I::Item: Into<AnimationStep>,
    {
        let token = ChainToken::fresh();
        self.supersede(host, node, token);
        fxdebug!(node = node.0, token = token.get(), "schedule chain");

        let mut cumulative_secs = 0.0;
        for (index, step) in steps.into_iter().enumerate() {
            let step: AnimationStep = step.into();
            let duration_secs = self.options.step_duration(step.duration_secs);
            let delay_ms = self.apply_offset_ms(index, cumulative_secs);

            let mut properties = self.options.transition_props(duration_secs);
            properties.merge(&step.properties);

            let task = FxTask {
                node,
                token,
                kind: TaskKind::Apply(Arc::new(ArmedStep {
                    properties,
                    duration_secs,
                    on_complete: step.on_complete,
                })),
            };
            let handle = host.arm_timer(delay_ms, task);
            host.storage_mut()
                .fx_state_mut(node)
                .apply_timers
                .push(handle);
            fxtrace!(node = node.0, index, delay_ms, duration_secs, "arm apply timer");

            cumulative_secs += duration_secs;
        }

        node
    }

    /// Runs a task whose timer fired.
    pub fn run(&self, host: &mut dyn FxHost, task: FxTask) {
        let FxTask { node, token, kind } = task;

        let current = host
            .storage()
            .fx_state(node)
            .and_then(NodeAnimationState::token);
        if current != Some(token) {
            fxwarn!(
                node = node.0,
                token = token.get(),
                "dropping a task of a superseded chain"
            );
            debug_assert!(
                current == Some(token),
                "stale fx task on node {node}: the host ran a cancelled timer"
            );
            return;
        }

        match kind {
            TaskKind::Apply(step) => self.apply(host, node, token, &step),
            TaskKind::Complete(callback) => {
                fxtrace!(node = node.0, "run completion callback");
                let mut cx = FxContext::new(self, host, node);
                callback(&mut cx);
            }
        }
    }

    /// Switches transitions off on `node` for every configured prefix.
    ///
    /// Pending steps are left alone; schedule an empty chain to cancel them.
    pub fn clear_fx(&self, host: &mut dyn FxHost, node: NodeId) -> NodeId {
        host.write_style(node, &self.options.clear_props());
        node
    }

    /// Writes `props` right away, resolving relative values against the computed style.
    pub fn set_css(&self, host: &mut dyn FxHost, node: NodeId, props: &StyleMap) -> NodeId {
        let resolved = resolve_map(props, &self.options, |property| {
            host.computed_style(node, property)
        });
        host.write_style(node, &resolved);
        node
    }

    /// The offsets [`ChainScheduler::schedule`] would use for `steps`.
    pub fn timeline(&self, steps: &[AnimationStep]) -> Vec<StepTiming> {
        let mut cumulative_secs = 0.0;
        steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let duration_secs = self.options.step_duration(step.duration_secs);
                let apply_at_ms = self.apply_offset_ms(index, cumulative_secs);
                cumulative_secs += duration_secs;
                StepTiming {
                    apply_at_ms,
                    complete_at_ms: step.on_complete.as_ref().map(|_| {
                        apply_at_ms.saturating_add(self.completion_delay_ms(duration_secs))
                    }),
                }
            })
            .collect()
    }

    fn supersede(&self, host: &mut dyn FxHost, node: NodeId, token: ChainToken) {
        let state = host.storage_mut().fx_state_mut(node);
        state.token = Some(token);
        let apply = core::mem::take(&mut state.apply_timers);
        let complete = core::mem::take(&mut state.complete_timers);

        if !apply.is_empty() || !complete.is_empty() {
            fxdebug!(
                node = node.0,
                apply = apply.len(),
                complete = complete.len(),
                "cancel superseded timers"
            );
        }
        for handle in apply.into_iter().chain(complete) {
            host.cancel_timer(handle);
        }
    }

    fn apply(&self, host: &mut dyn FxHost, node: NodeId, token: ChainToken, step: &ArmedStep) {
        if let Some(callback) = &step.on_complete {
            let delay_ms = self.completion_delay_ms(step.duration_secs);
            let task = FxTask {
                node,
                token,
                kind: TaskKind::Complete(Arc::clone(callback)),
            };
            let handle = host.arm_timer(delay_ms, task);
            host.storage_mut()
                .fx_state_mut(node)
                .complete_timers
                .push(handle);
        }

        self.set_css(host, node, &step.properties);
    }

    fn apply_offset_ms(&self, index: usize, cumulative_secs: f64) -> u64 {
        let base = if index == 0 {
            0
        } else {
            secs_to_ms(cumulative_secs)
        };
        base.saturating_add(self.options.lead_in_ms)
    }

    fn completion_delay_ms(&self, duration_secs: f64) -> u64 {
        secs_to_ms(duration_secs).saturating_sub(self.options.lead_out_ms)
    }
}

fn secs_to_ms(secs: f64) -> u64 {
    // `as` saturates and maps NaN to 0.
    (secs * 1000.0 + 0.5) as u64
}
