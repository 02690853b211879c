//! Navbar and page chrome: mobile menu, company tabs, in-page anchors and
//! the back-to-top button.

pub const BACK_TO_TOP_THRESHOLD_PX: f64 = 300.0;

pub const BACK_TO_TOP_STYLE: &str = "position: fixed; bottom: 20px; right: 20px; width: 50px; \
    height: 50px; border-radius: 50%; \
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; \
    border: none; cursor: pointer; font-size: 18px; opacity: 0; visibility: hidden; \
    transition: all 0.3s ease; z-index: 1000;";

pub fn back_to_top_visible(offset: f64) -> bool {
    offset > BACK_TO_TOP_THRESHOLD_PX
}

/// Selector for an in-page link, `None` for a bare `#` which points nowhere.
pub fn anchor_target(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        None
    } else {
        Some(href)
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use web_sys::{
        Event, HtmlElement, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
        ScrollLogicalPosition, ScrollToOptions,
    };

    use super::{anchor_target, back_to_top_visible, BACK_TO_TOP_STYLE};
    use crate::components::dropdown_memory::DropdownMemory;
    use crate::error::SiteError;
    use crate::utils::dom;
    use crate::utils::storage::LocalStore;

    fn attach_menu() -> Result<(), SiteError> {
        let hamburger = dom::query(".hamburger")?;
        let nav_menu = dom::query(".nav-menu")?;

        if let (Some(toggle), Some(menu)) = (hamburger.clone(), nav_menu.clone()) {
            let button = toggle.clone();
            dom::listen(&toggle, "click", move |_: MouseEvent| {
                let _ = button.class_list().toggle("active");
                let _ = menu.class_list().toggle("active");
                DropdownMemory::new(LocalStore).clear();
            })?;
        }

        // Following a menu link closes the mobile menu
        for link in dom::query_all(".nav-menu a")? {
            let (hamburger, nav_menu) = (hamburger.clone(), nav_menu.clone());
            dom::listen(&link, "click", move |_: MouseEvent| {
                for el in [&hamburger, &nav_menu].into_iter().flatten() {
                    let _ = el.class_list().remove_1("active");
                }
            })?;
        }
        Ok(())
    }

    fn attach_tabs() -> Result<(), SiteError> {
        let buttons = Rc::new(dom::query_all(".tab-btn")?);
        let contents = Rc::new(dom::query_all(".tab-content")?);

        for btn in buttons.iter() {
            let (buttons, contents, clicked) = (buttons.clone(), contents.clone(), btn.clone());
            dom::listen(btn, "click", move |_: MouseEvent| {
                for el in buttons.iter().chain(contents.iter()) {
                    let _ = el.class_list().remove_1("active");
                }
                let _ = clicked.class_list().add_1("active");
                let target = clicked.get_attribute("data-tab").and_then(|id| {
                    web_sys::window()
                        .and_then(|w| w.document())
                        .and_then(|d| d.get_element_by_id(&id))
                });
                if let Some(target) = target {
                    let _ = target.class_list().add_1("active");
                }
            })?;
        }
        Ok(())
    }

    fn attach_smooth_scroll() -> Result<(), SiteError> {
        for anchor in dom::query_all(r##"a[href^="#"]"##)? {
            let link = anchor.clone();
            dom::listen(&anchor, "click", move |e: MouseEvent| {
                e.prevent_default();
                let Some(href) = link.get_attribute("href") else {
                    return;
                };
                let Some(selector) = anchor_target(&href) else {
                    return;
                };
                if let Ok(Some(target)) = dom::query(selector) {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    options.set_block(ScrollLogicalPosition::Start);
                    target.scroll_into_view_with_scroll_into_view_options(&options);
                }
            })?;
        }
        Ok(())
    }

    fn attach_back_to_top() -> Result<(), SiteError> {
        let document = dom::document()?;
        let body = document.body().ok_or(SiteError::NoDocument)?;
        let button = document
            .create_element("button")
            .map_err(SiteError::dom)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SiteError::Dom("button is not an HtmlElement".to_string()))?;
        button.set_inner_html(r#"<i class="fas fa-arrow-up"></i>"#);
        button.set_class_name("back-to-top");
        let _ = button.set_attribute("aria-label", "Back to top");
        button.style().set_css_text(BACK_TO_TOP_STYLE);
        body.append_child(&button).map_err(SiteError::dom)?;

        let window = dom::window()?;
        {
            let button = button.clone();
            dom::listen(&window, "scroll", move |_: Event| {
                let shown = back_to_top_visible(dom::page_offset());
                dom::set_style(&button, "opacity", if shown { "1" } else { "0" });
                dom::set_style(&button, "visibility", if shown { "visible" } else { "hidden" });
            })?;
        }

        dom::listen(&button, "click", move |_: MouseEvent| {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        })?;
        Ok(())
    }

    pub fn attach() -> Result<(), SiteError> {
        attach_menu()?;
        attach_tabs()?;
        attach_smooth_scroll()?;
        attach_back_to_top()?;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::attach;
