use alloc::sync::Arc;

use crate::{ChainToken, FxContext, NodeId, StyleMap};

/// A callback fired shortly before a step's transition ends.
///
/// The callback is bound to its node through [`FxContext::node`] and may schedule a follow-up
/// chain with [`FxContext::fx`].
pub type OnComplete = Arc<dyn Fn(&mut FxContext<'_>) + Send + Sync>;

/// One step of an animation chain.
#[derive(Clone, Default)]
pub struct AnimationStep {
    /// Target values; each may be absolute or relative (`+=` / `-=`).
    pub properties: StyleMap,
    /// Transition duration. `None` uses [`crate::FxOptions::default_duration_secs`].
    pub duration_secs: Option<f64>,
    pub on_complete: Option<OnComplete>,
}

impl AnimationStep {
    pub fn new(properties: impl Into<StyleMap>) -> Self {
        Self {
            properties: properties.into(),
            duration_secs: None,
            on_complete: None,
        }
    }

    pub fn duration(mut self, secs: f64) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    pub fn on_complete(mut self, f: impl Fn(&mut FxContext<'_>) + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Arc::new(f));
        self
    }
}

impl core::fmt::Debug for AnimationStep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnimationStep")
            .field("properties", &self.properties)
            .field("duration_secs", &self.duration_secs)
            .field("on_complete", &self.on_complete.as_ref().map(|_| ".."))
            .finish()
    }
}

impl From<StyleMap> for AnimationStep {
    fn from(properties: StyleMap) -> Self {
        Self::new(properties)
    }
}

impl<P: Into<StyleMap>> From<(P,)> for AnimationStep {
    fn from((properties,): (P,)) -> Self {
        Self::new(properties)
    }
}

impl<P: Into<StyleMap>> From<(P, f64)> for AnimationStep {
    fn from((properties, secs): (P, f64)) -> Self {
        Self::new(properties).duration(secs)
    }
}

impl<P, F> From<(P, f64, F)> for AnimationStep
where
    P: Into<StyleMap>,
    F: Fn(&mut FxContext<'_>) + Send + Sync + 'static,
{
    fn from((properties, secs, f): (P, f64, F)) -> Self {
        Self::new(properties).duration(secs).on_complete(f)
    }
}

/// A step after scheduling: transition triple merged in, duration normalised.
pub(crate) struct ArmedStep {
    pub(crate) properties: StyleMap,
    pub(crate) duration_secs: f64,
    pub(crate) on_complete: Option<OnComplete>,
}

#[derive(Clone)]
pub(crate) enum TaskKind {
    Apply(Arc<ArmedStep>),
    Complete(OnComplete),
}

/// The payload a host keeps for an armed timer and hands back to
/// [`crate::ChainScheduler::run`] when the timer fires.
#[derive(Clone)]
pub struct FxTask {
    pub(crate) node: NodeId,
    pub(crate) token: ChainToken,
    pub(crate) kind: TaskKind,
}

impl FxTask {
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn token(&self) -> ChainToken {
        self.token
    }

    /// `true` for a completion-callback timer, `false` for a style-apply timer.
    pub fn is_completion(&self) -> bool {
        matches!(self.kind, TaskKind::Complete(_))
    }
}

impl core::fmt::Debug for FxTask {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let kind = match &self.kind {
            TaskKind::Apply(_) => "Apply",
            TaskKind::Complete(_) => "Complete",
        };
        f.debug_struct("FxTask")
            .field("node", &self.node)
            .field("token", &self.token)
            .field("kind", &kind)
            .finish()
    }
}
