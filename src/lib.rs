mod utils;

pub mod color;
pub mod config;
pub mod cursor;
pub mod dom_helpers;
pub mod field;
pub mod particle;
pub mod pointer;
pub mod renderer;
pub mod ticker;

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, HtmlCanvasElement, HtmlElement, MouseEvent};

pub use crate::color::Color;
pub use crate::config::FieldConfig;
pub use crate::cursor::CursorFollower;
pub use crate::field::{connection_opacity, Field, FieldTask};
pub use crate::particle::{repulsion_factor, Particle};
pub use crate::pointer::SharedPointer;
pub use crate::renderer::{CanvasSurface, DrawCommand, RecordingSurface, Surface};
pub use crate::ticker::{AnimationLoop, ManualTicker, Tick};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

// Wraps a block in console.time / console.timeEnd under the given label
pub struct Timer<'a> {
    label: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(label: &'a str) -> Timer<'a> {
        console::time_with_label(label);
        Timer { label }
    }

    // Frame timing is opt-in; without it no console calls are made at all
    pub fn start_if(enabled: bool, label: &'a str) -> Option<Timer<'a>> {
        if enabled {
            Some(Timer::new(label))
        } else {
            None
        }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.label);
    }
}

// Sets up the whole background on the canvas with the given id: sizes it to the
// window, listens for pointer moves and resizes, and animates until the page goes away
#[wasm_bindgen]
pub fn start(canvas_id: &str) -> Result<(), JsValue> {
    start_with_timings(canvas_id, false)
}

// Same as `start`, optionally timing every frame in the console
#[wasm_bindgen]
pub fn start_with_timings(canvas_id: &str, log_frame_timings: bool) -> Result<(), JsValue> {
    utils::set_panic_hook();

    let canvas = dom_helpers::get_canvas(canvas_id)?;
    let context = dom_helpers::context_2d(&canvas)?;
    let (width, height) = dom_helpers::fit_canvas_to_viewport(&canvas)?;

    let config = FieldConfig {
        log_frame_timings,
        ..FieldConfig::default()
    };
    let mut rng = rand::thread_rng();
    let field = Field::new(&mut rng, width, width, height, config);
    console::log_1(
        &format!(
            "particle field: {} particles on {}x{}",
            field.particles().len(),
            width,
            height
        )
        .into(),
    );

    let pointer = SharedPointer::at_page_start();
    let pending_size = Rc::new(Cell::new(None));
    listen_for_pointer(pointer.clone(), dom_helpers::find_html_element(".cursor"))?;
    listen_for_resize(canvas, pending_size.clone())?;

    let follower = dom_helpers::find_html_element(".cursor-follower");
    if let Some(follower) = &follower {
        cursor::listen_for_hover(follower, cursor::HOVER_TARGETS)?;
    }

    let task = PageTask {
        frame: FieldTask::new(field, CanvasSurface::new(context), pointer),
        pending_size,
        follower: follower.map(|element| (element, CursorFollower::new())),
    };
    AnimationLoop::start(task)
}

fn listen_for_pointer(pointer: SharedPointer, dot: Option<HtmlElement>) -> Result<(), JsValue> {
    let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
        let x = event.client_x() as f64;
        let y = event.client_y() as f64;
        pointer.set(x, y);
        if let Some(dot) = &dot {
            // Best effort, a failed style write only affects the decoration
            let _ = dom_helpers::place_element(dot, x, y);
        }
    }) as Box<dyn FnMut(MouseEvent)>);

    dom_helpers::document()?
        .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
    on_move.forget();
    Ok(())
}

// The canvas follows the window right away; the field picks up the new bounds on
// its next frame
fn listen_for_resize(
    canvas: HtmlCanvasElement,
    pending_size: Rc<Cell<Option<(f64, f64)>>>,
) -> Result<(), JsValue> {
    let on_resize = Closure::wrap(Box::new(move || {
        match dom_helpers::fit_canvas_to_viewport(&canvas) {
            Ok(size) => pending_size.set(Some(size)),
            Err(err) => console::error_2(&"failed to resize particle canvas:".into(), &err),
        }
    }) as Box<dyn FnMut()>);

    dom_helpers::window()?
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();
    Ok(())
}

struct PageTask {
    frame: FieldTask<CanvasSurface>,
    pending_size: Rc<Cell<Option<(f64, f64)>>>,
    follower: Option<(HtmlElement, CursorFollower)>,
}

impl Tick for PageTask {
    fn tick(&mut self, timestamp: f64) {
        let _timer = Timer::start_if(self.frame.field.config().log_frame_timings, "particle frame");

        if let Some((width, height)) = self.pending_size.take() {
            self.frame.field.resize(width, height);
        }

        self.frame.tick(timestamp);
        if let Some(err) = self.frame.take_error() {
            console::error_2(&"particle frame failed:".into(), &err);
        }

        if let Some((element, follower)) = &mut self.follower {
            let [x, y] = follower.follow(self.frame.pointer.get());
            if let Err(err) = dom_helpers::place_element(element, x, y) {
                console::error_2(&"failed to move cursor follower:".into(), &err);
            }
        }
    }
}

// JS-driven variant: the page owns the loop and event listeners and calls in here
#[wasm_bindgen]
pub struct ParticleCanvas {
    field: Field,
    surface: CanvasSurface,
    pointer: SharedPointer,
}

#[wasm_bindgen]
impl ParticleCanvas {
    pub fn new(canvas: &HtmlCanvasElement, viewport_width: f64) -> Result<ParticleCanvas, JsValue> {
        let context = dom_helpers::context_2d(canvas)?;
        let mut rng = rand::thread_rng();
        let field = Field::new(
            &mut rng,
            viewport_width,
            canvas.width() as f64,
            canvas.height() as f64,
            FieldConfig::default(),
        );

        Ok(ParticleCanvas {
            field,
            surface: CanvasSurface::new(context),
            pointer: SharedPointer::at_page_start(),
        })
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer.set(x, y);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer.clear();
    }

    pub fn set_log_frame_timings(&mut self, enabled: bool) {
        self.field.config_mut().log_frame_timings = enabled;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.field.resize(width, height);
    }

    pub fn frame(&mut self) -> Result<(), JsValue> {
        let _timer = Timer::start_if(self.field.config().log_frame_timings, "particle frame");
        self.field.frame(&mut self.surface, self.pointer.get())
    }

    pub fn particle_count(&self) -> usize {
        self.field.particles().len()
    }
}
