use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use waypost_core::{ScrollHost, SectionGeometry};
use waypost_protocol::{SectionBounds, SectionId, ViewportState};
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, Window};

/// The live page, read through `web_sys`.
pub(crate) struct Dom {
    window: Window,
    document: Document,
}

impl Dom {
    pub(crate) fn current() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub(crate) fn window(&self) -> &Window {
        &self.window
    }

    /// Current scroll geometry. Values the browser cannot report come back
    /// as NaN, which the tracker treats as "not laid out yet".
    pub(crate) fn viewport(&self) -> ViewportState {
        let scroll_y = self.window.scroll_y().unwrap_or(f64::NAN);
        let viewport_height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(f64::NAN);
        let document_height = self
            .document
            .document_element()
            .map_or(f64::NAN, |root| f64::from(root.scroll_height()));
        ViewportState::new(scroll_y, viewport_height, document_height)
    }

    pub(crate) fn viewport_width(&self) -> Option<f64> {
        self.window.inner_width().ok().and_then(|v| v.as_f64())
    }
}

impl SectionGeometry for Dom {
    fn bounds(&self, id: &SectionId) -> Option<SectionBounds> {
        let element: HtmlElement = self
            .document
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into().ok())?;
        Some(SectionBounds::new(
            f64::from(element.offset_top()),
            f64::from(element.offset_height()),
        ))
    }
}

impl ScrollHost for Dom {
    type Element = Element;

    fn find_section(&self, id: &SectionId) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn smooth_scroll_into_view(&mut self, element: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

/// Scroll and resize listeners registered on the window.
///
/// Listeners are removed when the subscription is dropped, so a tracker
/// that is unsubscribed or garbage collected never leaves a dangling
/// callback behind.
pub(crate) struct ScrollSubscription {
    window: Window,
    on_scroll: Closure<dyn FnMut()>,
    on_resize: Closure<dyn FnMut()>,
}

impl ScrollSubscription {
    pub(crate) fn attach(
        window: Window,
        on_scroll: Closure<dyn FnMut()>,
        on_resize: Closure<dyn FnMut()>,
    ) -> Result<Self, JsValue> {
        window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
        if let Err(e) =
            window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        {
            let _ = window
                .remove_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
            return Err(e);
        }
        Ok(Self {
            window,
            on_scroll,
            on_resize,
        })
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("scroll", self.on_scroll.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
    }
}
