// Accessibility helpers
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

const FOCUSABLE_SELECTOR: &str =
    "button, [href], input, textarea, select, [tabindex]:not([tabindex='-1'])";

/// Get CSS for visible focus indicators and screen reader utilities
///
/// Returns critical accessibility CSS that should be injected early in the page load.
/// Includes focus ring styles and screen reader helper classes.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus{outline:3px solid #00D9C0;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Move focus to the element with `id`, if it exists.
pub fn restore_focus(id: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| doc.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        {
            let _ = el.focus();
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = id;
    }
}

/// Focus the first focusable element inside `container`.
pub fn focus_first_in(container: &web_sys::Element) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(first) = container
            .query_selector(FOCUSABLE_SELECTOR)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        {
            let _ = first.focus();
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (container, FOCUSABLE_SELECTOR);
    }
}

/// Keep Tab / Shift+Tab cycling inside `container`.
///
/// Call from the container's `keydown` handler.
pub fn trap_tab_key(container: &web_sys::Element, e: &web_sys::KeyboardEvent) {
    #[cfg(target_arch = "wasm32")]
    {
        if e.key() != "Tab" {
            return;
        }
        let Ok(list) = container.query_selector_all(FOCUSABLE_SELECTOR) else {
            return;
        };
        let len = list.length();
        if len == 0 {
            return;
        }
        let first = list
            .get(0)
            .and_then(|n| n.dyn_into::<web_sys::HtmlElement>().ok());
        let last = list
            .get(len - 1)
            .and_then(|n| n.dyn_into::<web_sys::HtmlElement>().ok());
        let active = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.active_element());
        let shift = e.shift_key();
        if let (Some(first), Some(last), Some(active)) = (first, last, active) {
            let first_el: web_sys::Element = first.clone().unchecked_into();
            let last_el: web_sys::Element = last.clone().unchecked_into();
            if !container.contains(Some(&active)) {
                e.prevent_default();
                let _ = first.focus();
                return;
            }
            if shift && active == first_el {
                e.prevent_default();
                let _ = last.focus();
            } else if !shift && active == last_el {
                e.prevent_default();
                let _ = first.focus();
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (container, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_css_includes_sr_only_helper() {
        let css = visible_focus_css();
        assert!(css.contains(":focus"));
        assert!(css.contains(".sr-only"));
    }
}
