use crate::*;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use stylefx::{AnimationStep, Batch, FxContext, FxHost, FxOptions, NodeId, TimerHandle, Value};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        start + (self.next_u64() % (end_exclusive - start))
    }
}

fn boxed(c: &mut Controller, width: &str) -> NodeId {
    let node = c.div(ElementFeatures::new());
    c.document_mut().set_base_style(node, [("width", width)]);
    node
}

fn writes_of(c: &Controller, node: NodeId, property: &str) -> Vec<(u64, String)> {
    c.document()
        .style_writes()
        .iter()
        .filter(|w| w.node == node)
        .filter_map(|w| w.props.get(property).map(|v| (w.at_ms, v.to_string())))
        .collect()
}

fn counter() -> (Arc<AtomicUsize>, impl Fn(&mut FxContext<'_>) + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&count);
    (count, move |_: &mut FxContext<'_>| {
        c.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn timer_queue_cancel_is_idempotent() {
    let mut q = TimerQueue::new();
    assert!(q.is_empty());
    assert!(!q.cancel(TimerHandle(7)));
    q.advance_to(50);
    q.advance_to(20);
    assert_eq!(q.now_ms(), 50);
    assert_eq!(q.next_deadline(), None);
}

#[test]
fn same_deadline_fires_in_arm_order() {
    let mut c = Controller::default();
    let a = boxed(&mut c, "0px");
    let b = boxed(&mut c, "0px");
    c.fx(b, [([("width", "2px")], 1.0)]);
    c.fx(a, [([("width", "1px")], 1.0)]);

    assert_eq!(c.next_deadline(), Some(10));
    assert_eq!(c.tick(10), 2);
    let order: Vec<NodeId> = c.document().style_writes().iter().map(|w| w.node).collect();
    assert_eq!(order, vec![b, a]);
}

#[test]
fn chain_fires_at_cumulative_offsets() {
    let mut c = Controller::default();
    let node = boxed(&mut c, "0px");
    let (done, cb) = counter();
    let cb = Arc::new(cb);
    let step = |width: &'static str, secs: f64| {
        let cb = Arc::clone(&cb);
        AnimationStep::new([("width", width)])
            .duration(secs)
            .on_complete(move |cx| cb(cx))
    };
    c.fx(node, [step("10px", 1.0), step("20px", 2.0), step("30px", 0.5)]);

    assert_eq!(c.tick(9), 0);
    assert_eq!(c.tick(10), 1);
    assert_eq!(c.tick(909), 0);
    assert_eq!(c.tick(910), 1);
    assert_eq!(done.load(Ordering::SeqCst), 1);

    assert_eq!(c.tick(3500), 4);
    assert_eq!(done.load(Ordering::SeqCst), 3);
    assert_eq!(
        writes_of(&c, node, "width"),
        vec![
            (10, "10px".to_string()),
            (1010, "20px".to_string()),
            (3010, "30px".to_string()),
        ]
    );
    assert!(!c.is_animating(node));
    assert_eq!(c.now_ms(), 3500);
}

#[test]
fn rescheduling_mid_chain_silences_the_old_chain() {
    let mut c = Controller::default();
    let node = boxed(&mut c, "0px");
    let (done, cb) = counter();
    let cb = Arc::new(cb);
    let steps: Vec<AnimationStep> = ["100px", "200px", "300px"]
        .iter()
        .map(|w| {
            let cb = Arc::clone(&cb);
            AnimationStep::new([("width", *w)])
                .duration(1.0)
                .on_complete(move |cx| cb(cx))
        })
        .collect();
    c.fx(node, steps);

    c.tick(500);
    c.fx(node, [([("height", "5px")], 1.0)]);
    c.tick(10_000);

    assert_eq!(writes_of(&c, node, "width"), vec![(10, "100px".to_string())]);
    assert_eq!(writes_of(&c, node, "height"), vec![(510, "5px".to_string())]);
    assert_eq!(done.load(Ordering::SeqCst), 0);
    assert!(c.document().timers().is_empty());
}

#[test]
fn completion_callback_rechains_within_the_same_tick() {
    let mut c = Controller::default();
    let node = boxed(&mut c, "0px");
    c.fx(
        node,
        [
            AnimationStep::new([("width", "10px")])
                .duration(1.0)
                .on_complete(|cx| {
                    cx.fx([([("opacity", "0.5")], 0.2)]);
                }),
            AnimationStep::new([("width", "99px")]).duration(1.0),
        ],
    );

    assert_eq!(c.tick(5_000), 3);
    assert_eq!(writes_of(&c, node, "width"), vec![(10, "10px".to_string())]);
    assert_eq!(writes_of(&c, node, "opacity"), vec![(920, "0.5".to_string())]);
}

#[test]
fn relative_steps_compound_end_to_end() {
    let mut c = Controller::default();
    let node = boxed(&mut c, "10px");
    c.fx(
        node,
        [
            ([("width", "+=10px")], 1.0),
            ([("width", "+=10px")], 1.0),
            ([("width", "-=5px")], 1.0),
        ],
    );
    c.tick(5_000);

    let widths: Vec<String> = writes_of(&c, node, "width").into_iter().map(|(_, w)| w).collect();
    assert_eq!(widths, vec!["20px", "30px", "25px"]);
    assert_eq!(c.get_css(node, "width"), Some("25px"));
    assert_eq!(c.document().element(node).map(|e| e.base_style().get("width")), Some(Some("10px")));
}

#[test]
fn every_apply_write_carries_the_prefixed_triple() {
    let mut c = Controller::default();
    let node = boxed(&mut c, "0px");
    c.fx(node, [([("width", "1px")], 0.5), ([("width", "2px")], 1.5)]);
    c.tick(5_000);

    let writes = c.document().style_writes();
    assert_eq!(writes.len(), 2);
    for (write, duration) in writes.iter().zip(["0.5s", "1.5s"]) {
        for prefix in ["", "-webkit-", "-moz-"] {
            let key = |name: &str| {
                let mut s = String::from(prefix);
                s.push_str(name);
                s
            };
            assert_eq!(write.props.get(&key("transition-property")), Some("all"));
            assert_eq!(write.props.get(&key("transition-duration")), Some(duration));
            assert_eq!(
                write.props.get(&key("transition-timing-function")),
                Some("linear")
            );
        }
    }
}

#[test]
fn stop_and_empty_fx_only_cancel() {
    let mut c = Controller::default();
    let node = boxed(&mut c, "0px");
    c.fx(node, [([("width", "1px")], 1.0), ([("width", "2px")], 1.0)]);
    c.tick(10);
    assert!(c.is_animating(node));

    assert_eq!(c.stop(node), node);
    assert!(!c.is_animating(node));
    c.tick(5_000);
    assert_eq!(writes_of(&c, node, "width").len(), 1);

    let batch = c.apply_to_all(vec![node], &NodeOp::fx(Vec::<AnimationStep>::new()));
    assert!(batch.is_nodes());
    assert!(c.document().timers().is_empty());
}

#[test]
fn clear_fx_switches_transitions_off() {
    let mut c = Controller::default();
    let node = boxed(&mut c, "0px");
    c.clear_fx(node);
    for prefix in ["", "-webkit-", "-moz-"] {
        let mut name = String::from(prefix);
        name.push_str("transition-property");
        assert_eq!(c.get_css(node, &name), Some("none"));
    }
}

#[test]
fn batch_getters_collect_values_and_setters_return_the_collection() {
    let mut c = Controller::default();
    let nodes: Vec<NodeId> = ["5px", "10px", "15px"]
        .iter()
        .map(|w| c.div(ElementFeatures::new().css([("width", *w)])))
        .collect();

    let widths = c.apply_to_all(&nodes, &NodeOp::get_css("width"));
    let widths: Vec<Option<&str>> = widths
        .values()
        .map(|v| v.iter().map(OpValue::as_str).collect())
        .unwrap_or_default();
    assert_eq!(widths, vec![Some("5px"), Some("10px"), Some("15px")]);

    match c.apply_to_all(nodes.clone(), &NodeOp::add_class(["active"])) {
        Batch::Nodes(returned) => assert_eq!(returned, nodes),
        Batch::Values(_) => panic!("add_class must keep the collection"),
    }
    assert!(nodes.iter().all(|&n| c.has_class(n, "active")));

    let set = c.apply_to_all(&nodes, &NodeOp::set_css([("width", "+=1px")]));
    assert!(set.is_nodes());
    assert_eq!(c.get_css(nodes[2], "width"), Some("16px"));
}

#[test]
fn batch_fx_starts_one_chain_per_node() {
    let mut c = Controller::default();
    let nodes = [boxed(&mut c, "1px"), boxed(&mut c, "2px")];
    c.apply_to_all(nodes, &NodeOp::fx([([("width", "+=1px")], 1.0)]));
    c.tick(10);
    assert_eq!(c.get_css(nodes[0], "width"), Some("2px"));
    assert_eq!(c.get_css(nodes[1], "width"), Some("3px"));
}

#[test]
fn class_attr_and_data_ops() {
    let mut c = Controller::default();
    let node = c.div(ElementFeatures::new().attr("id", "panel"));

    c.call(node, &NodeOp::toggle_class(["open", "wide"]));
    c.call(node, &NodeOp::toggle_class(["open"]));
    assert!(!c.has_class(node, "open"));
    assert!(c.has_class(node, "wide"));

    c.call(
        node,
        &NodeOp::SetAttr(vec![("role".to_string(), "dialog".to_string())]),
    );
    let role = c.apply_to_all([node], &NodeOp::GetAttr("role".to_string()));
    assert_eq!(
        role.into_values(),
        Some(vec![OpValue::Attr(Some("dialog".to_string()))])
    );
    assert_eq!(c.get_attr(node, "id"), Some("panel"));

    c.call(node, &NodeOp::SetData("count".to_string(), Value::from(3)));
    let got = c.apply_to_all([node], &NodeOp::GetData("count".to_string()));
    assert_eq!(got.into_values(), Some(vec![OpValue::Data(Some(Value::Number(3.0)))]));
    assert_eq!(c.data(node, "missing"), None);
}

#[test]
fn get_css_many_reads_inline_over_base() {
    let mut c = Controller::default();
    let node = boxed(&mut c, "4px");
    c.document_mut()
        .set_base_style(node, [("width", "4px"), ("height", "8px")]);
    c.set_css(node, [("height", "9px")]);

    let map = c.get_css_many(node, &["width", "height", "color"]);
    assert_eq!(map.get("width"), Some(&Some("4px".to_string())));
    assert_eq!(map.get("height"), Some(&Some("9px".to_string())));
    assert_eq!(map.get("color"), Some(&None));

    let batch = c.apply_to_all([node], &NodeOp::get_css_many(["height"]));
    match batch.values() {
        Some([OpValue::CssMany(m)]) => assert_eq!(m.get("height"), Some(&Some("9px".to_string()))),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn create_element_applies_features() {
    let mut c = Controller::default();
    let parent = c.create_element("SECTION", ElementFeatures::new());
    let child = c.div(
        ElementFeatures::new()
            .attr("title", "hi")
            .css([("marginLeft", "3px")])
            .append_to(parent),
    );

    let doc = c.document();
    let element = doc.element(child).map(|e| (e.tag().to_string(), e.parent()));
    assert_eq!(element, Some(("div".to_string(), Some(parent))));
    assert_eq!(doc.element(parent).map(|e| e.tag()), Some("section"));
    assert_eq!(doc.element(parent).map(|e| e.children().to_vec()), Some(vec![child]));
    assert_eq!(c.get_css(child, "margin-left"), Some("3px"));
    assert_eq!(c.get_attr(child, "title"), Some("hi"));
}

#[test]
fn append_child_rejects_cycles() {
    let mut doc = Document::new();
    let a = doc.create_element("div");
    let b = doc.create_element("div");
    assert!(doc.append_child(a, b));
    assert!(!doc.append_child(b, a));
    assert!(!doc.append_child(a, a));
    assert!(!doc.append_child(a, NodeId(99)));

    let c = doc.create_element("div");
    assert!(doc.append_child(c, b));
    assert_eq!(doc.element(a).map(|e| e.children().len()), Some(0));
    assert_eq!(doc.element(b).and_then(|e| e.parent()), Some(c));
}

#[test]
fn removing_a_subtree_cancels_its_timers() {
    let mut c = Controller::default();
    let parent = c.div(ElementFeatures::new());
    let child = c.div(ElementFeatures::new().append_to(parent));
    c.fx(child, [([("width", "1px")], 1.0)]);
    c.set_data(child, "k", "v");
    assert!(c.is_animating(child));

    assert!(c.remove(parent));
    assert!(!c.document().contains(child));
    assert!(c.document().timers().is_empty());
    assert!(!c.document().storage().contains(child));
    assert_eq!(c.tick(5_000), 0);
    assert!(!c.remove(parent));
}

#[test]
fn writes_to_unknown_nodes_are_ignored() {
    let mut c = Controller::default();
    let ghost = NodeId(42);
    c.set_css(ghost, [("width", "1px")]);
    c.fx(ghost, [([("width", "2px")], 0.0)]);
    c.tick(100);
    assert!(c.document().style_writes().is_empty());
    assert_eq!(c.get_css(ghost, "width"), None);
}

#[test]
fn custom_options_flow_through_the_controller() {
    let mut c = Controller::new(
        FxOptions::default()
            .with_prefixes([""])
            .with_lead_in_ms(0)
            .with_lead_out_ms(0),
    );
    let node = boxed(&mut c, "0px");
    let (done, cb) = counter();
    c.fx(node, [AnimationStep::new([("width", "5px")]).duration(0.25).on_complete(cb)]);

    assert_eq!(c.tick(0), 1);
    assert_eq!(c.tick(249), 0);
    assert_eq!(c.tick(250), 1);
    assert_eq!(done.load(Ordering::SeqCst), 1);
    let write = &c.document().style_writes()[0];
    assert_eq!(write.props.len(), 4);
}

#[test]
fn random_rescheduling_only_writes_the_current_chain() {
    let mut rng = Lcg::new(0xfeed);
    let mut c = Controller::default();
    let nodes: Vec<NodeId> = (0..4).map(|_| boxed(&mut c, "0px")).collect();
    let mut current = vec![0u64; nodes.len()];
    let mut now = 0u64;

    for generation in 1..200u64 {
        let i = rng.gen_range_u64(0, nodes.len() as u64) as usize;
        let steps: Vec<AnimationStep> = (0..rng.gen_range_u64(0, 4))
            .map(|_| {
                AnimationStep::new([("z-index", generation.to_string())])
                    .duration(rng.gen_range_u64(0, 15) as f64 / 10.0)
            })
            .collect();
        c.fx(nodes[i], steps);
        current[i] = generation;

        now += rng.gen_range_u64(0, 1500);
        c.tick(now);
        for write in c.document_mut().take_style_writes() {
            let k = nodes.iter().position(|&n| n == write.node);
            let written = write.props.get("z-index").map(|z| z.to_string());
            assert_eq!(
                written,
                k.map(|k| current[k].to_string()),
                "stale write at {}",
                write.at_ms
            );
        }
    }
}

#[test]
fn feature_shortcuts_route_to_css_and_attrs_across_a_batch() {
    let mut c = Controller::default();
    let nodes = [boxed(&mut c, "10px"), boxed(&mut c, "20px")];

    let set = c.apply_to_all(nodes, &NodeOp::set_feature("width", "+=5px"));
    assert!(set.is_nodes());
    c.apply_to_all(nodes, &NodeOp::set_feature("marginLeft", "3px"));
    c.apply_to_all(nodes, &NodeOp::set_feature("title", "card"));

    let widths = c.apply_to_all(nodes, &NodeOp::get_feature("width"));
    assert_eq!(
        widths.into_values(),
        Some(vec![
            OpValue::Css(Some("15px".to_string())),
            OpValue::Css(Some("25px".to_string())),
        ])
    );
    assert_eq!(c.get_css(nodes[1], "margin-left"), Some("3px"));
    assert_eq!(c.get_feature(nodes[0], "margin-left"), Some("3px"));

    let titles = c.apply_to_all(nodes, &NodeOp::get_feature("title"));
    assert_eq!(
        titles.values().map(|v| v.to_vec()),
        Some(vec![OpValue::Attr(Some("card".to_string())); 2])
    );
    assert_eq!(c.get_attr(nodes[0], "title"), Some("card"));
}

#[test]
fn unknown_feature_shortcuts_are_ignored() {
    let mut c = Controller::default().with_features(FeatureSet::empty().with_css("opacity"));
    let node = boxed(&mut c, "1px");

    c.set_feature(node, "width", "9px");
    assert_eq!(c.get_css(node, "width"), Some("1px"));
    assert_eq!(c.get_feature(node, "width"), None);
    assert!(c.document().style_writes().is_empty());

    c.set_feature(node, "opacity", "0.5");
    assert_eq!(c.get_feature(node, "opacity"), Some("0.5"));
    assert_eq!(c.features().lookup("lang"), None);

    *c.features_mut() = FeatureSet::default();
    assert_eq!(
        c.features().lookup("borderTopWidth"),
        Some((FeatureKind::Css, "border-top-width"))
    );
    assert_eq!(c.features().lookup("lang"), Some((FeatureKind::Attr, "lang")));
}

#[test]
fn html_is_set_appended_and_read_through_a_batch() {
    let mut c = Controller::default();
    let nodes = [c.div(ElementFeatures::new()), c.div(ElementFeatures::new())];

    assert!(c.apply_to_all(nodes, &NodeOp::SetHtml("<b>a</b>".to_string())).is_nodes());
    c.apply_to_all(&nodes[1..], &NodeOp::AppendHtml("<i>b</i>".to_string()));

    let html = c.apply_to_all(nodes, &NodeOp::GetHtml);
    let html: Vec<Option<&str>> = html
        .values()
        .map(|v| v.iter().map(OpValue::as_str).collect())
        .unwrap_or_default();
    assert_eq!(html, vec![Some("<b>a</b>"), Some("<b>a</b><i>b</i>")]);

    c.set_html(nodes[1], "");
    c.append_html(nodes[0], "!");
    assert_eq!(c.get_html(nodes[1]), Some(""));
    assert_eq!(c.get_html(nodes[0]), Some("<b>a</b>!"));
    assert_eq!(c.get_html(NodeId(99)), None);
}

#[test]
fn getter_ops_are_the_ones_that_yield_values() {
    let mut c = Controller::default();
    let node = c.div(ElementFeatures::new());
    let ops = [
        NodeOp::get_css("width"),
        NodeOp::get_css_many(["width"]),
        NodeOp::GetAttr("id".to_string()),
        NodeOp::GetData("k".to_string()),
        NodeOp::get_feature("title"),
        NodeOp::GetHtml,
        NodeOp::set_css([("width", "1px")]),
        NodeOp::add_class(["a"]),
        NodeOp::set_feature("title", "t"),
        NodeOp::SetHtml(String::new()),
        NodeOp::ClearFx,
    ];
    for op in &ops {
        let yields_value = !c.apply_to_all([node], op).is_nodes();
        assert_eq!(op.is_getter(), yields_value, "{}", op.name());
    }
}

#[test]
fn data_many_and_timer_deadlines() {
    let mut c = Controller::default();
    let node = boxed(&mut c, "0px");
    c.document_mut()
        .set_data_many(node, [("a", Value::from(1)), ("b", Value::from("x"))]);
    c.set_data(node, "a", 2);
    assert_eq!(c.data(node, "a"), Some(&Value::Number(2.0)));
    assert_eq!(c.data(node, "b").and_then(Value::as_str), Some("x"));

    c.fx(node, [([("width", "1px")], 1.0), ([("width", "2px")], 1.0)]);
    let handles = c
        .document()
        .storage()
        .fx_state(node)
        .map(|s| s.apply_timers().to_vec())
        .unwrap_or_default();
    let deadlines: Vec<Option<u64>> = handles
        .iter()
        .map(|&h| c.document().timers().deadline(h))
        .collect();
    assert_eq!(deadlines, vec![Some(10), Some(1010)]);

    c.stop(node);
    assert!(handles.iter().all(|&h| c.document().timers().deadline(h).is_none()));
}
