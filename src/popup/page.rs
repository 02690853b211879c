use super::phone::TelAnchor;

/// What the popup needs to know about the current page, read once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    /// Navigation path, e.g. `/providers/spectrum.html`.
    pub path: String,
    pub tel_anchors: Vec<TelAnchor>,
    pub header_text: String,
}

impl PageSnapshot {
    pub fn page_name(&self) -> &str {
        page_name(&self.path)
    }
}

/// Trailing filename of a navigation path.
pub fn page_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

pub fn is_eligible(page: &str, allow_list: &[String]) -> bool {
    !page.is_empty() && allow_list.iter().any(|allowed| allowed == page)
}

#[cfg(target_arch = "wasm32")]
mod capture {
    use super::{PageSnapshot, TelAnchor};
    use crate::error::SiteError;
    use crate::utils::dom;

    pub fn current_path() -> Result<String, SiteError> {
        dom::window()?
            .location()
            .pathname()
            .map_err(|e| SiteError::Location(format!("{:?}", e)))
    }

    pub fn tel_anchors() -> Result<Vec<TelAnchor>, SiteError> {
        let anchors = dom::query_all(r#"a[href^="tel:"]"#)?
            .into_iter()
            .filter_map(|el| {
                let href = el.get_attribute("href")?;
                let text = el.text_content().unwrap_or_default();
                Some(TelAnchor { href, text })
            })
            .collect();
        Ok(anchors)
    }

    /// Text of the header strip, or of the whole body when the page has none.
    pub fn header_text(selector: &str) -> Result<String, SiteError> {
        let document = dom::document()?;
        let region: Option<web_sys::Element> =
            match document.query_selector(selector).map_err(SiteError::dom)? {
                Some(el) => Some(el),
                None => document.body().map(Into::into),
            };
        Ok(region.and_then(|el| el.text_content()).unwrap_or_default())
    }

    impl PageSnapshot {
        /// Reads path, tel links and header text. Only the path is needed for the gate,
        /// so callers check eligibility before capturing the rest.
        pub fn capture(path: String, header_selector: &str) -> Result<Self, SiteError> {
            Ok(Self {
                path,
                tel_anchors: tel_anchors()?,
                header_text: header_text(header_selector)?,
            })
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use capture::current_path;
