//! DOM side of the roll animation.
//! Applies sequencer frames to the animated die element as inline styles and
//! lets CSS transitions do the tweening.

use decision_dice::config::VISUAL_SELECTOR;
use decision_dice::sequencer::{Frame, Pose};
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, HtmlElement};

/// Look up the animated die. Done fresh for every roll; never cached.
pub fn find_visual_target() -> Option<HtmlElement> {
    gloo_utils::document()
        .query_selector(VISUAL_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Start the transition described by `frame`.
pub fn play_frame(element: &HtmlElement, frame: &Frame) {
    let style = element.style();
    if let Some(from) = frame.from {
        set_pose(&style, &from, "none");
        // Reading layout flushes the jump so the transition starts from `from`.
        let _ = element.offset_width();
    }
    let transition = format!(
        "transform {ms}ms {ease}, opacity {ms}ms {ease}",
        ms = frame.duration_ms,
        ease = frame.easing.css()
    );
    set_pose(&style, &frame.pose, &transition);
}

fn set_pose(style: &CssStyleDeclaration, pose: &Pose, transition: &str) {
    let props = [
        ("transition", transition.to_string()),
        ("transform", pose.css_transform()),
        ("opacity", format!("{:.2}", pose.opacity)),
    ];
    for (name, value) in props {
        if let Err(e) = style.set_property(name, &value) {
            debug!("Could not set {} on die element: {:?}", name, e);
        }
    }
}
