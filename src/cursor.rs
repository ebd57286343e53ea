// Custom cursor: a dot pinned to the pointer and a follower ring that trails it,
// closing a ninth of the remaining gap every frame. The ring gets the `active`
// class while the pointer is over something clickable.

use crate::dom_helpers;
use vecmath::Vector2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, HtmlElement};

pub const HOVER_TARGETS: &str = "a, button, .project-card, .video-placeholder, .script-item";
pub const ACTIVE_CLASS: &str = "active";

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CursorFollower {
    pub pos: Vector2<f64>,
}

impl CursorFollower {
    pub const EASING: f64 = 9.0;

    pub fn new() -> Self {
        CursorFollower { pos: [0.0, 0.0] }
    }

    pub fn follow(&mut self, target: Option<Vector2<f64>>) -> Vector2<f64> {
        if let Some(target) = target {
            let gap = vecmath::vec2_sub(target, self.pos);
            let step = vecmath::vec2_scale(gap, 1.0 / CursorFollower::EASING);
            self.pos = vecmath::vec2_add(self.pos, step);
        }
        self.pos
    }
}

impl Default for CursorFollower {
    fn default() -> Self {
        CursorFollower::new()
    }
}

// Elements matching `targets` are looked up once; ones added to the page later
// do not get the hover effect
pub fn listen_for_hover(follower: &HtmlElement, targets: &str) -> Result<(), JsValue> {
    let nodes = dom_helpers::document()?.query_selector_all(targets)?;
    let on_enter = toggle_active(follower.clone(), true);
    let on_leave = toggle_active(follower.clone(), false);

    for i in 0..nodes.length() {
        if let Some(node) = nodes.get(i) {
            node.add_event_listener_with_callback("mouseenter", on_enter.as_ref().unchecked_ref())?;
            node.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
        }
    }

    on_enter.forget();
    on_leave.forget();
    Ok(())
}

fn toggle_active(follower: HtmlElement, active: bool) -> Closure<dyn FnMut()> {
    Closure::wrap(Box::new(move || {
        let classes = follower.class_list();
        let toggled = if active {
            classes.add_1(ACTIVE_CLASS)
        } else {
            classes.remove_1(ACTIVE_CLASS)
        };
        if let Err(err) = toggled {
            console::error_2(&"failed to toggle cursor hover class:".into(), &err);
        }
    }) as Box<dyn FnMut()>)
}
