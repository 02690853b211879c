//! Call-to-pay popup shown on provider pages.
//!
//! Startup is split in two: [`prepare`] is pure and decides whether the page
//! gets a popup and what it says; `boot` reads the live page, feeds it to
//! `prepare` and mounts the [`component::CallPopup`] overlay.

pub mod brand;
pub mod controller;
pub mod page;
pub mod phone;

#[cfg(target_arch = "wasm32")]
pub mod component;

use crate::config::SiteConfig;
use crate::error::SiteError;
use brand::PopupContent;
use page::{is_eligible, PageSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupPlan {
    pub content: PopupContent,
    pub delay_ms: u32,
}

/// Gate, resolve, then apply overrides. `Ok(None)` means the page never gets a popup.
pub fn prepare(page: &PageSnapshot, config: &SiteConfig) -> Result<Option<PopupPlan>, SiteError> {
    let name = page.page_name();
    if !is_eligible(name, &config.popup_pages) {
        return Ok(None);
    }
    let resolved = phone::resolve(page, &config.default_phone);
    let content = PopupContent::new(resolved, config.override_for(name));
    Ok(Some(PopupPlan {
        content,
        delay_ms: config.popup_delay_ms,
    }))
}

#[cfg(target_arch = "wasm32")]
mod boot {
    use std::sync::atomic::{AtomicBool, Ordering};

    use log::{debug, info, warn};

    use super::component::{CallPopup, CallPopupProps};
    use super::page::{self, PageSnapshot};
    use super::{is_eligible, prepare};
    use crate::config::SiteConfig;
    use crate::error::SiteError;
    use crate::utils::dom;

    // One overlay per page load
    static MOUNTED: AtomicBool = AtomicBool::new(false);

    pub const OVERLAY_ROOT_ID: &str = "site-popup-root";

    fn try_boot(config: Result<SiteConfig, SiteError>) -> Result<bool, SiteError> {
        let config = config?;
        let path = page::current_path()?;
        // check the gate before touching anything else on the page
        if !is_eligible(page::page_name(&path), &config.popup_pages) {
            return Ok(false);
        }
        let snapshot = PageSnapshot::capture(path, &config.header_selector)?;
        let Some(plan) = prepare(&snapshot, &config)? else {
            return Ok(false);
        };

        if MOUNTED.swap(true, Ordering::SeqCst) {
            return Err(SiteError::AlreadyMounted);
        }
        let document = dom::document()?;
        let body = document.body().ok_or(SiteError::NoDocument)?;
        let root = document.create_element("div").map_err(SiteError::dom)?;
        root.set_id(OVERLAY_ROOT_ID);
        body.append_child(&root).map_err(SiteError::dom)?;

        yew::Renderer::<CallPopup>::with_root_and_props(root, CallPopupProps { plan }).render();
        Ok(true)
    }

    /// Mounts the popup on provider pages. A config that failed to load, or any
    /// later failure, leaves the page without a popup.
    pub fn boot(config: Result<SiteConfig, SiteError>) {
        match try_boot(config) {
            Ok(true) => info!("Call popup armed"),
            Ok(false) => debug!("Call popup not enabled for this page"),
            Err(e) => warn!("Call popup disabled: {}", e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use boot::boot;
