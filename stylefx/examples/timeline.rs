use stylefx::{AnimationStep, ChainScheduler, FxOptions, resolve};

fn main() {
    // Example: inspect when a chain's steps and callbacks would fire, without any host.
    let scheduler = ChainScheduler::new(FxOptions::default());
    let steps = [
        AnimationStep::new([("width", "+=40px")]).duration(0.4),
        AnimationStep::new([("opacity", "0")])
            .duration(1.2)
            .on_complete(|cx| {
                cx.set_css([("display", "none")]);
            }),
        AnimationStep::new([("height", "-=2em")]),
    ];

    for (i, t) in scheduler.timeline(&steps).iter().enumerate() {
        println!("step={i} apply_at={}ms complete_at={:?}", t.apply_at_ms, t.complete_at_ms);
    }

    let options = scheduler.options();
    for (current, expr) in [("100px", "+=40px"), ("3em", "-=2em"), ("50%", "+=5")] {
        let next = resolve("width", expr, options, |_| Some(current.to_string()));
        println!("{current} {expr} -> {next}");
    }
}
