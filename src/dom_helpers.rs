// Helper functions for dealing with the page: finding the canvas and its 2D context,
// reading the viewport size, positioning cursor elements and scheduling frames

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

pub fn get_canvas(canvas_id: &str) -> Result<HtmlCanvasElement, JsValue> {
    document()?
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id `{}`", canvas_id)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("element `{}` is not a canvas", canvas_id)))
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("2d context has an unexpected type"))
}

pub fn viewport_size() -> Result<(f64, f64), JsValue> {
    let window = window()?;
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("innerWidth is not a number"))?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("innerHeight is not a number"))?;
    Ok((width, height))
}

// Sizes the canvas backing store to the viewport and returns the new size
pub fn fit_canvas_to_viewport(canvas: &HtmlCanvasElement) -> Result<(f64, f64), JsValue> {
    let (width, height) = viewport_size()?;
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    Ok((width, height))
}

pub fn request_animation_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<(), JsValue> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(())
}

// Cursor elements are decoration; a page without them just gets no custom cursor
pub fn find_html_element(selector: &str) -> Option<HtmlElement> {
    document()
        .ok()?
        .query_selector(selector)
        .ok()??
        .dyn_into::<HtmlElement>()
        .ok()
}

pub fn place_element(element: &HtmlElement, x: f64, y: f64) -> Result<(), JsValue> {
    let style = element.style();
    style.set_property("left", &format!("{}px", x))?;
    style.set_property("top", &format!("{}px", y))
}
