mod dom;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use waypost_core::PageSession;
use waypost_core::nav::NavKey;
use waypost_protocol::{SectionId, ThemeMode};

use crate::dom::{Dom, ScrollSubscription};

struct Shared {
    session: PageSession,
    on_change: Option<js_sys::Function>,
}

type SharedState = Rc<RefCell<Shared>>;

/// Nav bar tracker bound to the browser page.
///
/// Create it once per page with the manifest JSON, call `subscribe()` when
/// the nav bar mounts and `unsubscribe()` when it unmounts.
#[wasm_bindgen]
pub struct NavTracker {
    state: SharedState,
    subscription: Option<ScrollSubscription>,
}

#[wasm_bindgen]
impl NavTracker {
    #[wasm_bindgen(constructor)]
    pub fn new(manifest_json: &str) -> Result<NavTracker, JsError> {
        let session = PageSession::from_json(manifest_json.as_bytes())
            .map_err(|e| JsError::new(&e.to_string()))?;
        web_sys::console::log_1(
            &format!(
                "waypost: tracking {} sections",
                session.tracker().sections().len()
            )
            .into(),
        );
        Ok(NavTracker {
            state: Rc::new(RefCell::new(Shared {
                session,
                on_change: None,
            })),
            subscription: None,
        })
    }

    /// Start listening to scroll and resize events. Samples the page once
    /// immediately so the highlight is correct on mount.
    pub fn subscribe(&mut self) -> Result<(), JsError> {
        if self.subscription.is_some() {
            return Ok(());
        }
        let dom = Dom::current().ok_or_else(|| JsError::new("no window or document"))?;

        let scroll_state = Rc::clone(&self.state);
        let on_scroll = Closure::<dyn FnMut()>::new(move || {
            sample(&scroll_state, false);
        });
        let resize_state = Rc::clone(&self.state);
        let on_resize = Closure::<dyn FnMut()>::new(move || {
            resize(&resize_state);
        });

        let subscription = ScrollSubscription::attach(dom.window().clone(), on_scroll, on_resize)
            .map_err(|e| JsError::new(&format!("failed to add listeners: {e:?}")))?;
        self.subscription = Some(subscription);
        web_sys::console::log_1(&"waypost: subscribed to scroll events".into());

        resize(&self.state);
        Ok(())
    }

    /// Remove the listeners. Safe to call when not subscribed.
    pub fn unsubscribe(&mut self) {
        if self.subscription.take().is_some() {
            web_sys::console::log_1(&"waypost: unsubscribed from scroll events".into());
        }
    }

    #[wasm_bindgen(getter)]
    pub fn subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Register a callback invoked with the new active id (or `null`)
    /// whenever it changes.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: js_sys::Function) {
        self.state.borrow_mut().on_change = Some(callback);
    }

    #[wasm_bindgen(js_name = activeSection)]
    pub fn active_section(&self) -> Option<String> {
        self.state
            .borrow()
            .session
            .active_section()
            .map(ToString::to_string)
    }

    /// Sample the page now, outside of a scroll event.
    pub fn refresh(&self) -> bool {
        sample(&self.state, false)
    }

    /// Smooth-scroll to a section. Returns `false` when the section has no
    /// element on the page.
    #[wasm_bindgen(js_name = scrollToSection)]
    pub fn scroll_to_section(&self, id: &str) -> bool {
        let Some(mut dom) = Dom::current() else {
            return false;
        };
        self.state
            .borrow_mut()
            .session
            .follow_link(&mut dom, &SectionId::from(id))
    }

    /// Keyboard activation of a focused link (`KeyboardEvent.key`).
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&self, key: &str, id: &str) -> bool {
        let Some(mut dom) = Dom::current() else {
            return false;
        };
        self.state.borrow_mut().session.handle_key(
            &mut dom,
            NavKey::from_key_name(key),
            &SectionId::from(id),
        )
    }

    #[wasm_bindgen(js_name = openMenu)]
    pub fn open_menu(&self) {
        self.state.borrow_mut().session.open_menu();
    }

    #[wasm_bindgen(js_name = closeMenu)]
    pub fn close_menu(&self) {
        self.state.borrow_mut().session.close_menu();
    }

    /// Flip the theme and return the new one (`"light"` or `"dark"`).
    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&self) -> String {
        match self.state.borrow_mut().session.toggle_theme() {
            ThemeMode::Light => "light".to_string(),
            ThemeMode::Dark => "dark".to_string(),
        }
    }

    /// Nav bar render commands as JSON.
    #[wasm_bindgen(js_name = navCommands)]
    pub fn nav_commands(&self) -> Result<String, JsError> {
        let commands = self.state.borrow().session.nav_commands();
        serde_json::to_string(&commands).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Splash state for a time since page start as JSON:
    /// `{"phase":"splash"}`, `{"phase":"reveal","content_opacity":0.5}` or
    /// `{"phase":"done"}`.
    #[wasm_bindgen(js_name = loaderPhase)]
    pub fn loader_phase(&self, elapsed_ms: f64) -> Result<String, JsError> {
        let phase = self.state.borrow().session.loader_phase(elapsed_ms);
        serde_json::to_string(&phase).map_err(|e| JsError::new(&e.to_string()))
    }
}

/// Recompute the active section from the live page and notify on change.
/// `already_changed` forces a notification for changes made by the caller.
fn sample(state: &SharedState, already_changed: bool) -> bool {
    let Some(dom) = Dom::current() else {
        return false;
    };
    let viewport = dom.viewport();

    // Release the borrow before calling out so the callback may query us.
    let (changed, callback, active) = {
        let mut shared = state.borrow_mut();
        let changed = shared.session.on_scroll(&viewport, &dom) || already_changed;
        let active = shared.session.active_section().map(ToString::to_string);
        (changed, shared.on_change.clone(), active)
    };

    if changed && let Some(callback) = callback {
        let arg = active.map_or(JsValue::NULL, |id| JsValue::from_str(&id));
        if let Err(e) = callback.call1(&JsValue::NULL, &arg) {
            web_sys::console::error_1(&format!("waypost: onChange threw: {e:?}").into());
        }
    }
    changed
}

fn resize(state: &SharedState) {
    let layout_changed = Dom::current()
        .and_then(|dom| dom.viewport_width())
        .is_some_and(|width| state.borrow_mut().session.set_viewport_width(width));
    sample(state, layout_changed);
}
