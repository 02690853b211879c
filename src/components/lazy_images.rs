//! Deferred images: `<img data-src=...>` gets its real `src` once it scrolls into view.

pub const LAZY_CLASS: &str = "lazy";

/// The URL to load for a deferred image, `None` when `data-src` is blank.
pub fn deferred_source(data_src: Option<&str>) -> Option<&str> {
    data_src.map(str::trim).filter(|src| !src.is_empty())
}

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::Element;

    use super::{deferred_source, LAZY_CLASS};
    use crate::error::SiteError;
    use crate::utils::dom;

    fn load(img: Element) {
        let data_src = img.get_attribute("data-src");
        if let Some(src) = deferred_source(data_src.as_deref()) {
            let _ = img.set_attribute("src", src);
        }
        let _ = img.class_list().remove_1(LAZY_CLASS);
    }

    pub fn attach() -> Result<(), SiteError> {
        let images = dom::query_all("img[data-src]")?;
        if images.is_empty() {
            return Ok(());
        }
        dom::observe_once(&images, 0.0, "0px", load)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::attach;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_src_is_loaded_as_is() {
        assert_eq!(deferred_source(Some("img/hero.webp")), Some("img/hero.webp"));
        assert_eq!(deferred_source(Some("  img/hero.webp ")), Some("img/hero.webp"));
    }

    #[test]
    fn blank_data_src_keeps_current_image() {
        assert_eq!(deferred_source(Some("   ")), None);
        assert_eq!(deferred_source(None), None);
    }
}
