//! Client-side behaviour for the Alpha Solutions Hub marketing pages.
//!
//! The crate is loaded as a wasm module by the static pages. Page logic that
//! does not need a browser (phone resolution, popup state, validation rules)
//! lives outside the `wasm32`-only modules so it can be tested natively.

pub mod components;
pub mod config;
pub mod error;
pub mod popup;
pub mod utils;

#[cfg(target_arch = "wasm32")]
mod start {
    use log::{error, warn};
    use wasm_bindgen::prelude::*;
    use web_sys::Event;

    use crate::components::{contact_form, dropdown_memory, lazy_images, nav, stats_counter};
    use crate::config::SiteConfig;
    use crate::popup;
    use crate::utils::dom;

    fn init_site() {
        let loaded = SiteConfig::load();
        let config = match &loaded {
            Ok(config) => config.clone(),
            Err(e) => {
                warn!("Falling back to built-in site config: {}", e);
                SiteConfig::default()
            }
        };

        if let Err(e) = nav::attach() {
            warn!("Navigation setup failed: {}", e);
        }
        if let Err(e) = dropdown_memory::attach() {
            warn!("Dropdown memory setup failed: {}", e);
        }
        if let Err(e) = stats_counter::attach() {
            warn!("Stats counter setup failed: {}", e);
        }
        if let Err(e) = contact_form::attach(&config) {
            warn!("Form validation setup failed: {}", e);
        }
        if let Err(e) = lazy_images::attach() {
            warn!("Lazy image loading setup failed: {}", e);
        }
        // gets the unpatched result so a broken config keeps the popup off
        popup::boot(loaded);
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        wasm_logger::init(wasm_logger::Config::default());

        let document = match dom::document() {
            Ok(document) => document,
            Err(e) => {
                error!("Site scripts not started: {}", e);
                return;
            }
        };
        if document.ready_state() != "loading" {
            init_site();
            return;
        }
        if let Err(e) = dom::listen(&document, "DOMContentLoaded", |_: Event| init_site()) {
            error!("Failed to wait for DOMContentLoaded: {}", e);
        }
    }
}
