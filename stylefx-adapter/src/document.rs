use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use stylefx::{FxHost, FxTask, NodeId, NodeStorage, StyleMap, TimerHandle, Value};

use crate::TimerQueue;

/// One node of a [`Document`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    base_style: StyleMap,
    style: StyleMap,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    html: String,
}

impl Element {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Inline style, i.e. everything written through [`FxHost::write_style`].
    pub fn style(&self) -> &StyleMap {
        &self.style
    }

    /// Stylesheet-level style that inline values override.
    pub fn base_style(&self) -> &StyleMap {
        &self.base_style
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Content markup, kept as an opaque string.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Inline value if set, else the base value.
    pub fn computed(&self, property: &str) -> Option<&str> {
        self.style
            .get(property)
            .or_else(|| self.base_style.get(property))
    }
}

/// A style write observed by a [`Document`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleWrite {
    pub at_ms: u64,
    pub node: NodeId,
    pub props: StyleMap,
}

/// Initial attributes, style and parent for [`crate::Controller::create_element`].
#[derive(Clone, Debug, Default)]
pub struct ElementFeatures {
    pub attr: Vec<(String, String)>,
    pub css: StyleMap,
    pub append_to: Option<NodeId>,
}

impl ElementFeatures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attr.push((name.into(), value.into()));
        self
    }

    pub fn css(mut self, props: impl Into<StyleMap>) -> Self {
        self.css.merge(&props.into());
        self
    }

    pub fn append_to(mut self, parent: NodeId) -> Self {
        self.append_to = Some(parent);
        self
    }
}

/// An in-memory node tree that hosts the scheduler.
///
/// Owns the elements, their [`NodeStorage`] and a [`TimerQueue`]. Every style write is also
/// recorded in a journal (see [`Document::take_style_writes`]) stamped with the clock at the
/// time of the write.
#[derive(Clone, Debug, Default)]
pub struct Document {
    elements: BTreeMap<NodeId, Element>,
    next_id: u64,
    storage: NodeStorage,
    timers: TimerQueue,
    journal: Vec<StyleWrite>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.elements.contains_key(&node)
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(&node)
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Pops the earliest timer due at or before `until_ms`, moving the clock to its instant.
    pub fn pop_due_task(&mut self, until_ms: u64) -> Option<FxTask> {
        self.timers.pop_due(until_ms)
    }

    pub fn advance_clock(&mut self, now_ms: u64) {
        self.timers.advance_to(now_ms);
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let node = NodeId(self.next_id);
        self.next_id += 1;
        self.elements.insert(
            node,
            Element {
                tag: tag.to_ascii_lowercase(),
                ..Element::default()
            },
        );
        node
    }

    /// Moves `child` under `parent`. Returns `false` for unknown nodes or when the move would
    /// create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            return false;
        }
        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                fxwarn!(parent = parent.0, child = child.0, "append would create a cycle");
                return false;
            }
            cursor = self.elements.get(&ancestor).and_then(|e| e.parent);
        }

        self.detach(child);
        if let Some(element) = self.elements.get_mut(&child) {
            element.parent = Some(parent);
        }
        if let Some(element) = self.elements.get_mut(&parent) {
            element.children.push(child);
        }
        true
    }

    /// Removes `node` and its subtree, cancelling their pending fx timers and dropping their
    /// storage.
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        self.detach(node);
        self.remove_subtree(node)
    }

    fn remove_subtree(&mut self, node: NodeId) -> bool {
        let Some(element) = self.elements.remove(&node) else {
            return false;
        };
        if let Some(state) = self.storage.fx_state(node) {
            for &handle in state.apply_timers().iter().chain(state.complete_timers()) {
                self.timers.cancel(handle);
            }
        }
        self.storage.remove(node);
        for child in element.children {
            self.remove_subtree(child);
        }
        true
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.elements.get_mut(&node).and_then(|e| e.parent.take()) else {
            return;
        };
        if let Some(element) = self.elements.get_mut(&parent) {
            element.children.retain(|&c| c != node);
        }
    }

    /// Replaces the node's stylesheet-level style.
    pub fn set_base_style(&mut self, node: NodeId, props: impl Into<StyleMap>) -> bool {
        match self.elements.get_mut(&node) {
            Some(element) => {
                element.base_style = props.into();
                true
            }
            None => false,
        }
    }

    pub fn get_css(&self, node: NodeId, property: &str) -> Option<&str> {
        self.elements.get(&node)?.computed(property)
    }

    /// Computed values for several properties, keyed by the names as given.
    pub fn get_css_many<I, S>(&self, node: NodeId, properties: I) -> BTreeMap<String, Option<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        properties
            .into_iter()
            .map(|p| {
                let value = self.get_css(node, p.as_ref()).map(ToString::to_string);
                (p.as_ref().to_string(), value)
            })
            .collect()
    }

    pub fn add_class<I, S>(&mut self, node: NodeId, classes: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(element) = self.elements.get_mut(&node) else {
            return false;
        };
        for class in classes {
            let class = class.as_ref();
            if !element.has_class(class) {
                element.classes.push(class.to_string());
            }
        }
        true
    }

    pub fn toggle_class<I, S>(&mut self, node: NodeId, classes: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(element) = self.elements.get_mut(&node) else {
            return false;
        };
        for class in classes {
            let class = class.as_ref();
            match element.classes.iter().position(|c| c == class) {
                Some(index) => {
                    element.classes.remove(index);
                }
                None => element.classes.push(class.to_string()),
            }
        }
        true
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.elements.get(&node).is_some_and(|e| e.has_class(class))
    }

    pub fn set_attr<I, K, V>(&mut self, node: NodeId, attrs: I) -> bool
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let Some(element) = self.elements.get_mut(&node) else {
            return false;
        };
        element
            .attrs
            .extend(attrs.into_iter().map(|(k, v)| (k.into(), v.into())));
        true
    }

    pub fn get_attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.elements.get(&node)?.attr(name)
    }

    pub fn set_html(&mut self, node: NodeId, html: &str) -> bool {
        let Some(element) = self.elements.get_mut(&node) else {
            return false;
        };
        element.html.clear();
        element.html.push_str(html);
        true
    }

    pub fn append_html(&mut self, node: NodeId, html: &str) -> bool {
        let Some(element) = self.elements.get_mut(&node) else {
            return false;
        };
        element.html.push_str(html);
        true
    }

    pub fn get_html(&self, node: NodeId) -> Option<&str> {
        self.elements.get(&node).map(Element::html)
    }

    pub fn data(&self, node: NodeId, key: &str) -> Option<&Value> {
        self.storage.get(node, key)
    }

    pub fn set_data(&mut self, node: NodeId, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.storage.set(node, key, value)
    }

    pub fn set_data_many<I, K, V>(&mut self, node: NodeId, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.storage.set_many(node, entries);
    }

    pub fn style_writes(&self) -> &[StyleWrite] {
        &self.journal
    }

    pub fn take_style_writes(&mut self) -> Vec<StyleWrite> {
        core::mem::take(&mut self.journal)
    }
}

impl FxHost for Document {
    fn write_style(&mut self, node: NodeId, props: &StyleMap) {
        let Some(element) = self.elements.get_mut(&node) else {
            fxwarn!(node = node.0, "style write to an unknown node");
            return;
        };
        element.style.merge(props);
        fxtrace!(node = node.0, props = props.len(), at_ms = self.timers.now_ms(), "write style");
        self.journal.push(StyleWrite {
            at_ms: self.timers.now_ms(),
            node,
            props: props.clone(),
        });
    }

    fn computed_style(&self, node: NodeId, property: &str) -> Option<String> {
        self.get_css(node, property).map(ToString::to_string)
    }

    fn arm_timer(&mut self, delay_ms: u64, task: FxTask) -> TimerHandle {
        self.timers.arm(delay_ms, task)
    }

    fn cancel_timer(&mut self, handle: TimerHandle) {
        self.timers.cancel(handle);
    }

    fn storage(&self) -> &NodeStorage {
        &self.storage
    }

    fn storage_mut(&mut self) -> &mut NodeStorage {
        &mut self.storage
    }
}
