//! `window.history` adapter for the preview modal's history entry.

use platform_host::{Listener, NavigationHost, Subscription};

#[cfg(target_arch = "wasm32")]
const MODAL_STATE_KEY: &str = "modalOpen";

#[cfg(target_arch = "wasm32")]
fn history() -> Result<web_sys::History, String> {
    web_sys::window()
        .ok_or_else(|| "window unavailable".to_string())?
        .history()
        .map_err(crate::http::js_error_to_string)
}

#[derive(Debug, Clone, Copy, Default)]
/// Browser navigation host; the modal entry carries `{ modalOpen: true }` as its state.
pub struct WebNavigationHost;

impl NavigationHost for WebNavigationHost {
    fn push_modal_entry(&self) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsValue;

            let state = js_sys::Object::new();
            js_sys::Reflect::set(&state, &JsValue::from_str(MODAL_STATE_KEY), &JsValue::TRUE)
                .map_err(crate::http::js_error_to_string)?;
            history()?
                .push_state(&state, "")
                .map_err(crate::http::js_error_to_string)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Err("history is only available in the browser".to_string())
        }
    }

    fn is_modal_entry_current(&self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            let Ok(state) = history().and_then(|h| h.state().map_err(crate::http::js_error_to_string))
            else {
                return false;
            };
            if state.is_null() || state.is_undefined() {
                return false;
            }
            js_sys::Reflect::get(&state, &wasm_bindgen::JsValue::from_str(MODAL_STATE_KEY))
                .ok()
                .and_then(|value| value.as_bool())
                .unwrap_or(false)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }

    fn back(&self) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            history()?.back().map_err(crate::http::js_error_to_string)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Err("history is only available in the browser".to_string())
        }
    }

    fn on_back_navigation(&self, listener: Listener<()>) -> Subscription {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                return Subscription::noop();
            };
            let popstate = gloo_events::EventListener::new(&window, "popstate", move |_| {
                listener(());
            });
            Subscription::new(move || drop(popstate))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = listener;
            Subscription::noop()
        }
    }
}
