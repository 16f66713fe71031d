// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel basics.
//!
//! Load options from JSON, mount a three-slide carousel, and drive it through
//! a scripted timeline of clicks, a drag, and autoplay, printing the strip
//! after every step.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example carousel_basics`

use kurbo::{Point, Size};
use understory_carousel::{
    Carousel, CarouselInput, CarouselOptions, Markup, RootElement, SlideElement,
};

const OPTIONS: &str = r#"{
    "duration_ms": 300,
    "autoplay": false,
    "autoplay_delay_ms": 1000,
    "draggable": true,
    "nav": { "text_next": "&rsaquo;", "text_prev": "&lsaquo;" }
}"#;

fn describe(label: &str, carousel: &Carousel, markup: &Markup) {
    let order: Vec<String> = carousel
        .strip()
        .slides()
        .iter()
        .map(|s| {
            let mark = if s.active { "*" } else { "" };
            let clone = if s.is_clone { "'" } else { "" };
            format!("{}{clone}{mark}", s.id.ordinal())
        })
        .collect();
    let strip = markup.element(markup.strip());
    println!(
        "t={:>5} {label:<18} active={} strip=[{}] left={} transition={}",
        carousel.now(),
        carousel.active_index(),
        order.join(" "),
        strip.style("left").unwrap_or("-"),
        strip.style("transition").unwrap_or("-"),
    );
}

/// One host frame: advance the clock, then re-render.
fn step(label: &str, carousel: &mut Carousel, markup: &mut Markup, now: u64) {
    carousel.advance_to(now);
    markup.sync(carousel);
    describe(label, carousel, markup);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let options: CarouselOptions = serde_json::from_str(OPTIONS)?;
    let root = RootElement::new("div", Size::new(480.0, 270.0))
        .with_child(SlideElement::new("figure").with_html("<img src=\"a.jpg\">"))
        .with_child(SlideElement::new("figure").with_html("<img src=\"b.jpg\">"))
        .with_child(SlideElement::new("figure").with_html("<img src=\"c.jpg\">"));

    let mut carousel = Carousel::builder()
        .root(root.metrics())
        .options(options)
        .build()?;
    let mut markup = Markup::new(root, &carousel);
    let mut input = CarouselInput::new(carousel.options());
    log::info!("mounted {} slides", carousel.slide_count());
    describe("mounted", &carousel, &markup);

    let next = markup.next_button().ok_or("next button missing")?;
    input.click(&markup, next, &mut carousel)?;
    step("click next", &mut carousel, &mut markup, 0);
    step("settled", &mut carousel, &mut markup, 300);

    let prev = markup.prev_button().ok_or("prev button missing")?;
    input.click(&markup, prev, &mut carousel)?;
    step("click prev (mask)", &mut carousel, &mut markup, 300);
    step("settled", &mut carousel, &mut markup, 600);

    let third_dot = markup.dots()[2];
    input.click(&markup, third_dot, &mut carousel)?;
    step("click dot 2", &mut carousel, &mut markup, 600);
    step("settled", &mut carousel, &mut markup, 900);

    let slide = markup.strip();
    input.pointer_down(&markup, slide, Point::new(100.0, 50.0));
    input.pointer_move(Point::new(180.0, 50.0), &mut carousel);
    input.pointer_up();
    step("drag right", &mut carousel, &mut markup, 900);
    step("settled", &mut carousel, &mut markup, 1_200);

    carousel.play();
    let mut now = 1_200;
    while now < 4_500 {
        now = carousel.next_deadline().map_or(4_500, |d| d.min(4_500));
        step("autoplay", &mut carousel, &mut markup, now);
    }
    carousel.pause();
    step("paused", &mut carousel, &mut markup, 6_000);

    println!("\n{}", markup.to_html());
    Ok(())
}
