use super::{LocationChange, LocationProvider};
use crate::error::LocationError;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::Window;

/// The browser's `window.location` and `window.history`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHistory;

impl BrowserHistory {
    pub fn new() -> Self {
        Self
    }

    /// Calls `f` whenever the user moves through history with the back or
    /// forward buttons. The listener lives as long as the page.
    ///
    /// Hosts typically call
    /// [`SyncEngine::restore_from_location`](crate::engine::SyncEngine::restore_from_location)
    /// from here.
    pub fn on_popstate(
        &self,
        f: impl Fn() + 'static,
    ) -> Result<(), LocationError> {
        let closure =
            Closure::wrap(Box::new(f) as Box<dyn Fn()>).into_js_value();
        window()?
            .add_event_listener_with_callback(
                "popstate",
                closure.unchecked_ref(),
            )
            .map_err(host_error)
    }
}

impl LocationProvider for BrowserHistory {
    fn current(&self) -> Result<String, LocationError> {
        window()?.location().href().map_err(host_error)
    }

    fn complete_navigation(
        &mut self,
        loc: &LocationChange,
    ) -> Result<(), LocationError> {
        let history = window()?.history().map_err(host_error)?;
        let state = JsValue::from_str(&loc.state);
        let result = if loc.replace {
            history.replace_state_with_url(&state, "", Some(&loc.value))
        } else {
            history.push_state_with_url(&state, "", Some(&loc.value))
        };
        result.map_err(host_error)
    }
}

fn window() -> Result<Window, LocationError> {
    web_sys::window()
        .ok_or_else(|| LocationError::Host("no global `window` exists".into()))
}

fn host_error(e: JsValue) -> LocationError {
    LocationError::Host(
        e.as_string().unwrap_or_else(|| format!("{e:?}")),
    )
}
