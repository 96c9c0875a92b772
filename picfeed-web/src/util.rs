use wasm_bindgen::{prelude::*, JsCast};
use yew::Callback;

// How close to the bottom of the page scrolling has to get for the next page
// to be requested
const SCROLL_THRESHOLD_PX: f64 = 300.0;

fn window() -> web_sys::Window {
    web_sys::window().expect("running outside of a browser window")
}

/// Whether the viewport currently shows the end of the page, give or take
/// `SCROLL_THRESHOLD_PX`
pub fn near_bottom() -> bool {
    let w = window();
    let viewport = w.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(0.0);
    let scrolled = w.scroll_y().unwrap_or(0.0);
    let page = w
        .document()
        .and_then(|d| d.body())
        .map(|b| b.offset_height() as f64)
        .unwrap_or(0.0);
    viewport + scrolled >= page - SCROLL_THRESHOLD_PX
}

/// Emits on every window scroll that gets near the bottom of the page, until
/// dropped
pub struct ScrollListener {
    closure: Closure<dyn FnMut()>,
}

impl ScrollListener {
    pub fn new(on_near_bottom: Callback<()>) -> ScrollListener {
        let closure = Closure::<dyn FnMut()>::new(move || {
            if near_bottom() {
                on_near_bottom.emit(());
            }
        });
        window()
            .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
            .expect("failed registering scroll listener");
        ScrollListener { closure }
    }
}

impl Drop for ScrollListener {
    fn drop(&mut self) {
        let res = window()
            .remove_event_listener_with_callback("scroll", self.closure.as_ref().unchecked_ref());
        if let Err(e) = res {
            tracing::warn!(?e, "failed unregistering scroll listener");
        }
    }
}
