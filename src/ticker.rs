// Frame scheduling. A Tick is one update-and-render step; something else decides
// when it runs. In the browser that is AnimationLoop on top of requestAnimationFrame,
// in tests ManualTicker steps it a given number of frames.

use crate::dom_helpers;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::console;

pub trait Tick {
    // `timestamp` is in milliseconds, same clock as requestAnimationFrame
    fn tick(&mut self, timestamp: f64);
}

pub struct ManualTicker<T: Tick> {
    task: T,
    frames: u64,
}

impl<T: Tick> ManualTicker<T> {
    // Synthetic 60Hz clock
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn new(task: T) -> Self {
        ManualTicker { task, frames: 0 }
    }

    pub fn advance(&mut self, frames: u64) {
        for _ in 0..frames {
            let timestamp = self.frames as f64 * Self::FRAME_MS;
            self.task.tick(timestamp);
            self.frames += 1;
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn task(&self) -> &T {
        &self.task
    }

    pub fn task_mut(&mut self) -> &mut T {
        &mut self.task
    }

    pub fn into_inner(self) -> T {
        self.task
    }
}

// Runs a task on every animation frame for the lifetime of the page. There is no
// handle to stop it; the callback keeps itself alive by rescheduling.
pub struct AnimationLoop;

impl AnimationLoop {
    pub fn start<T: Tick + 'static>(task: T) -> Result<(), JsValue> {
        let task = Rc::new(RefCell::new(task));
        let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let reschedule = callback.clone();

        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            task.borrow_mut().tick(timestamp);
            if let Some(next) = reschedule.borrow().as_ref() {
                if let Err(err) = dom_helpers::request_animation_frame(next) {
                    console::error_2(&"failed to schedule animation frame:".into(), &err);
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let first = callback.borrow();
        match first.as_ref() {
            Some(callback) => dom_helpers::request_animation_frame(callback),
            None => Ok(()),
        }
    }
}
