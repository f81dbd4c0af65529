use alloc::collections::BTreeMap;
use alloc::string::String;

use stylefx::{
    AnimationStep, Batch, ChainScheduler, FxOptions, NodeId, Outcome, StyleMap, Value,
};

use crate::{Document, ElementFeatures, FeatureKind, FeatureSet, NodeOp, OpValue};

/// A framework-neutral controller that owns a [`ChainScheduler`] and the [`Document`] it
/// animates.
///
/// Nothing runs on its own. Adapters drive it by calling `tick(now_ms)` from a frame loop or
/// timer; every timer due by then fires in deadline order, including timers armed while the
/// tick is running.
#[derive(Clone, Debug, Default)]
pub struct Controller {
    scheduler: ChainScheduler,
    doc: Document,
    features: FeatureSet,
}

impl Controller {
    pub fn new(options: FxOptions) -> Self {
        Self {
            scheduler: ChainScheduler::new(options),
            doc: Document::new(),
            features: FeatureSet::default(),
        }
    }

    pub fn from_parts(scheduler: ChainScheduler, doc: Document) -> Self {
        Self {
            scheduler,
            doc,
            features: FeatureSet::default(),
        }
    }

    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.features = features;
        self
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn features_mut(&mut self) -> &mut FeatureSet {
        &mut self.features
    }

    pub fn scheduler(&self) -> &ChainScheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut ChainScheduler {
        &mut self.scheduler
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn into_parts(self) -> (ChainScheduler, Document) {
        (self.scheduler, self.doc)
    }

    pub fn now_ms(&self) -> u64 {
        self.doc.now_ms()
    }

    /// The instant of the next pending timer, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.doc.timers().next_deadline()
    }

    pub fn is_animating(&self, node: NodeId) -> bool {
        self.doc.timers().pending_for(node) > 0
    }

    /// Runs every timer due at or before `now_ms` and returns how many fired.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        let mut fired = 0;
        while let Some(task) = self.doc.pop_due_task(now_ms) {
            fxtrace!(
                node = task.node().0,
                completion = task.is_completion(),
                at_ms = self.doc.now_ms(),
                "fire timer"
            );
            self.scheduler.run(&mut self.doc, task);
            fired += 1;
        }
        self.doc.advance_clock(now_ms);
        fired
    }

    /// Schedules a chain on `node`, superseding whatever chain it had.
    pub fn fx<I>(&mut self, node: NodeId, steps: I) -> NodeId
    where
        I: IntoIterator,
        I::Item: Into<AnimationStep>,
    {
        if !self.doc.contains(node) {
            fxwarn!(node = node.0, "fx on an unknown node");
        }
        self.scheduler.schedule(&mut self.doc, node, steps)
    }

    /// Cancels the node's chain without starting a new one.
    pub fn stop(&mut self, node: NodeId) -> NodeId {
        self.fx(node, core::iter::empty::<AnimationStep>())
    }

    pub fn clear_fx(&mut self, node: NodeId) -> NodeId {
        self.scheduler.clear_fx(&mut self.doc, node)
    }

    pub fn set_css(&mut self, node: NodeId, props: impl Into<StyleMap>) -> NodeId {
        self.scheduler.set_css(&mut self.doc, node, &props.into())
    }

    pub fn get_css(&self, node: NodeId, property: &str) -> Option<&str> {
        self.doc.get_css(node, property)
    }

    pub fn get_css_many(&self, node: NodeId, properties: &[&str]) -> BTreeMap<String, Option<String>> {
        self.doc.get_css_many(node, properties)
    }

    pub fn add_class(&mut self, node: NodeId, classes: &[&str]) -> NodeId {
        self.doc.add_class(node, classes);
        node
    }

    pub fn toggle_class(&mut self, node: NodeId, classes: &[&str]) -> NodeId {
        self.doc.toggle_class(node, classes);
        node
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.doc.has_class(node, class)
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> NodeId {
        self.doc.set_attr(node, [(name, value)]);
        node
    }

    pub fn get_attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.doc.get_attr(node, name)
    }

    pub fn data(&self, node: NodeId, key: &str) -> Option<&Value> {
        self.doc.data(node, key)
    }

    pub fn set_data(&mut self, node: NodeId, key: &str, value: impl Into<Value>) -> NodeId {
        self.doc.set_data(node, key, value);
        node
    }

    /// Sets a shortcut property: a style value for style shortcuts (relative values allowed),
    /// an attribute otherwise. Unknown shortcuts are ignored with a warning.
    pub fn set_feature(&mut self, node: NodeId, name: &str, value: &str) -> NodeId {
        match self.features.lookup(name) {
            Some((FeatureKind::Css, property)) => {
                let props = StyleMap::from([(property, value)]);
                self.scheduler.set_css(&mut self.doc, node, &props);
            }
            Some((FeatureKind::Attr, attr)) => {
                self.doc.set_attr(node, [(attr, value)]);
            }
            None => {
                fxwarn!(node = node.0, name, "unknown feature shortcut");
            }
        }
        node
    }

    /// Reads a shortcut property. `None` for unknown shortcuts and unset values.
    pub fn get_feature(&self, node: NodeId, name: &str) -> Option<&str> {
        match self.features.lookup(name)? {
            (FeatureKind::Css, property) => self.doc.get_css(node, property),
            (FeatureKind::Attr, attr) => self.doc.get_attr(node, attr),
        }
    }

    pub fn set_html(&mut self, node: NodeId, html: &str) -> NodeId {
        self.doc.set_html(node, html);
        node
    }

    pub fn append_html(&mut self, node: NodeId, html: &str) -> NodeId {
        self.doc.append_html(node, html);
        node
    }

    pub fn get_html(&self, node: NodeId) -> Option<&str> {
        self.doc.get_html(node)
    }

    /// Creates an element, sets its attributes and style, then attaches it.
    pub fn create_element(&mut self, tag: &str, features: ElementFeatures) -> NodeId {
        let ElementFeatures {
            attr,
            css,
            append_to,
        } = features;
        let node = self.doc.create_element(tag);
        self.doc.set_attr(node, attr);
        if !css.is_empty() {
            self.scheduler.set_css(&mut self.doc, node, &css);
        }
        if let Some(parent) = append_to {
            if !self.doc.append_child(parent, node) {
                fxwarn!(parent = parent.0, node = node.0, "could not attach new element");
            }
        }
        node
    }

    pub fn div(&mut self, features: ElementFeatures) -> NodeId {
        self.create_element("div", features)
    }

    /// Removes `node` and its subtree, cancelling their pending timers.
    pub fn remove(&mut self, node: NodeId) -> bool {
        self.doc.remove_node(node)
    }

    /// Runs one operation on one node.
    pub fn call(&mut self, node: NodeId, op: &NodeOp) -> Outcome<OpValue> {
        match op {
            NodeOp::SetCss(props) => {
                self.scheduler.set_css(&mut self.doc, node, props);
            }
            NodeOp::GetCss(property) => {
                return Outcome::Value(OpValue::Css(
                    self.doc.get_css(node, property).map(String::from),
                ));
            }
            NodeOp::GetCssMany(properties) => {
                return Outcome::Value(OpValue::CssMany(self.doc.get_css_many(node, properties)));
            }
            NodeOp::AddClass(classes) => {
                self.doc.add_class(node, classes);
            }
            NodeOp::ToggleClass(classes) => {
                self.doc.toggle_class(node, classes);
            }
            NodeOp::SetAttr(attrs) => {
                self.doc.set_attr(node, attrs.iter().cloned());
            }
            NodeOp::GetAttr(name) => {
                return Outcome::Value(OpValue::Attr(
                    self.doc.get_attr(node, name).map(String::from),
                ));
            }
            NodeOp::SetData(key, value) => {
                self.doc.set_data(node, key.as_str(), value.clone());
            }
            NodeOp::GetData(key) => {
                return Outcome::Value(OpValue::Data(self.doc.data(node, key).cloned()));
            }
            NodeOp::SetFeature(name, value) => {
                self.set_feature(node, name, value);
            }
            NodeOp::GetFeature(name) => {
                let value = self.get_feature(node, name).map(String::from);
                return Outcome::Value(match self.features.lookup(name) {
                    Some((FeatureKind::Attr, _)) => OpValue::Attr(value),
                    _ => OpValue::Css(value),
                });
            }
            NodeOp::SetHtml(html) => {
                self.doc.set_html(node, html);
            }
            NodeOp::AppendHtml(html) => {
                self.doc.append_html(node, html);
            }
            NodeOp::GetHtml => {
                return Outcome::Value(OpValue::Html(self.doc.get_html(node).map(String::from)));
            }
            NodeOp::Fx(steps) => {
                self.scheduler.schedule(&mut self.doc, node, steps.iter().cloned());
            }
            NodeOp::ClearFx => {
                self.scheduler.clear_fx(&mut self.doc, node);
            }
        }
        Outcome::Node(node)
    }

    /// Runs `op` on every node in order.
    ///
    /// Returns the collection itself for setters, or one [`OpValue`] per node for getters.
    pub fn apply_to_all<C>(&mut self, nodes: C, op: &NodeOp) -> Batch<C, OpValue>
    where
        C: AsRef<[NodeId]>,
    {
        fxdebug!(
            op = op.name(),
            getter = op.is_getter(),
            nodes = nodes.as_ref().len(),
            "apply to all"
        );
        stylefx::apply_to_all(nodes, |node| self.call(node, op))
    }
}
