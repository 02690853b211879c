use log::warn;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::error::SiteError;
use crate::popup::controller::ScrollHost;

pub fn window() -> Result<Window, SiteError> {
    web_sys::window().ok_or(SiteError::NoWindow)
}

pub fn document() -> Result<Document, SiteError> {
    window()?.document().ok_or(SiteError::NoDocument)
}

pub fn query_all(selector: &str) -> Result<Vec<Element>, SiteError> {
    let list = document()?
        .query_selector_all(selector)
        .map_err(SiteError::dom)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn query(selector: &str) -> Result<Option<Element>, SiteError> {
    document()?.query_selector(selector).map_err(SiteError::dom)
}

/// Attaches a listener for the rest of the page's life.
pub fn listen<T, F>(target: &EventTarget, event: &str, handler: F) -> Result<(), SiteError>
where
    T: JsCast + 'static,
    F: FnMut(T) + 'static,
{
    let mut handler = handler;
    let callback = Closure::wrap(Box::new(move |e: web_sys::Event| {
        if let Ok(e) = e.dyn_into::<T>() {
            handler(e);
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(SiteError::dom)?;
    callback.forget();
    Ok(())
}

/// Runs `on_visible` the first time each element scrolls into view, then stops watching it.
pub fn observe_once<F>(
    elements: &[Element],
    threshold: f64,
    root_margin: &str,
    on_visible: F,
) -> Result<(), SiteError>
where
    F: Fn(Element) + 'static,
{
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    observer.unobserve(&target);
                    on_visible(target);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&wasm_bindgen::JsValue::from_f64(threshold));
    init.set_root_margin(root_margin);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
        .map_err(SiteError::dom)?;
    for el in elements {
        observer.observe(el);
    }
    callback.forget();
    Ok(())
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = el.style().set_property(property, value) {
        warn!("Failed to set {}: {:?}", property, e);
    }
}

pub fn clear_style(el: &HtmlElement, property: &str) {
    let _ = el.style().remove_property(property);
}

pub fn page_offset() -> f64 {
    let Ok(window) = window() else {
        return 0.0;
    };
    match window.scroll_y() {
        Ok(offset) if offset > 0.0 => offset,
        _ => window
            .document()
            .and_then(|d| d.document_element())
            .map(|el| f64::from(el.scroll_top()))
            .unwrap_or(0.0),
    }
}

/// Scroll lock that pins `<body>` with fixed positioning, which also holds on mobile Safari.
pub struct WindowScroll;

impl ScrollHost for WindowScroll {
    fn scroll_offset(&self) -> f64 {
        page_offset()
    }

    fn lock_scroll(&self, offset: f64) {
        let Ok(document) = document() else {
            return;
        };
        if let Some(root) = document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            set_style(&root, "overflow", "hidden");
        }
        if let Some(body) = document.body() {
            set_style(&body, "position", "fixed");
            set_style(&body, "top", &format!("-{}px", offset));
            let _ = body.class_list().add_1("no-scroll");
        }
    }

    fn release_scroll(&self, offset: f64) {
        let Ok(window) = window() else {
            return;
        };
        if let Some(document) = window.document() {
            if let Some(body) = document.body() {
                let _ = body.class_list().remove_1("no-scroll");
                clear_style(&body, "position");
                clear_style(&body, "top");
            }
            if let Some(root) = document
                .document_element()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                clear_style(&root, "overflow");
            }
        }
        // same task as the unlock, so nothing paints at offset 0 in between
        window.scroll_to_with_x_and_y(0.0, offset);
    }
}
