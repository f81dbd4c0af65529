use stylefx::{AnimationStep, FxOptions};
use stylefx_adapter::{Controller, ElementFeatures, NodeOp};

fn main() {
    // Example: a controller driving a chained transition on an in-memory document.
    //
    // An adapter would:
    // - schedule chains with fx(node, steps)
    // - call tick(now_ms) from a frame loop or timer
    // - copy the document's style writes onto the real nodes
    let mut c = Controller::new(FxOptions::default());
    let list = c.create_element("ul", ElementFeatures::new().attr("id", "list"));
    let items: Vec<_> = (0..3)
        .map(|i| {
            c.create_element(
                "li",
                ElementFeatures::new()
                    .css([("margin-left", format!("{}px", i * 10))])
                    .append_to(list),
            )
        })
        .collect();

    c.apply_to_all(&items, &NodeOp::add_class(["item"]));
    c.apply_to_all(
        &items,
        &NodeOp::fx([
            AnimationStep::new([("marginLeft", "+=100px")]).duration(0.5),
            AnimationStep::new([("opacity", "0.25")])
                .duration(1.0)
                .on_complete(|cx| {
                    cx.clear_fx();
                    cx.set_css([("opacity", "1")]);
                }),
        ]),
    );

    let mut now_ms = 0u64;
    while let Some(deadline) = c.next_deadline() {
        now_ms = now_ms.max(deadline);
        let fired = c.tick(now_ms);
        for write in c.document_mut().take_style_writes() {
            println!("t={} node={} props={}", write.at_ms, write.node, write.props.len());
        }
        println!("t={now_ms} fired={fired}");
    }

    let margins = c.apply_to_all(&items, &NodeOp::get_css("margin-left"));
    println!("done: margin-left={margins:?}");
}
