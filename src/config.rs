use std::collections::HashMap;

use serde::Deserialize;

use crate::error::SiteError;
use crate::popup::brand::PageOverride;
use crate::popup::phone::PhoneNumber;

/// Id of the optional `<script type="application/json">` block that replaces
/// the built-in config on a page.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

pub const DEFAULT_PHONE_DISPLAY: &str = "+1 (844) 209-4073";
pub const DEFAULT_PHONE_TEL: &str = "+18442094073";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Page filenames the call-to-pay popup may appear on. Fixed, pages cannot change it.
    #[serde(skip)]
    pub popup_pages: Vec<String>,
    pub overrides: HashMap<String, PageOverride>,
    pub default_phone: PhoneNumber,
    #[serde(skip)]
    pub popup_delay_ms: u32,
    /// Element whose text is scanned for a phone number when no tel link exists.
    pub header_selector: String,
    pub toast_visible_ms: u32,
    pub toast_exit_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let mut overrides = HashMap::new();
        overrides.insert(
            "spectrum.html".to_string(),
            PageOverride {
                tel: Some("+18332689840".to_string()),
                display: Some("+1 (833) 268-9840".to_string()),
                brand: Some("Spectrum".to_string()),
                logo: Some("img/spectrum.png".to_string()),
            },
        );
        // verizon and optimum only swap the logo, their number comes from the page
        overrides.insert(
            "verizon.html".to_string(),
            PageOverride {
                logo: Some("img/verizo.png".to_string()),
                ..Default::default()
            },
        );
        overrides.insert(
            "optimum.html".to_string(),
            PageOverride {
                logo: Some("img/optimum.png".to_string()),
                ..Default::default()
            },
        );

        Self {
            popup_pages: vec![
                "verizon.html".to_string(),
                "optimum.html".to_string(),
                "spectrum.html".to_string(),
            ],
            overrides,
            default_phone: PhoneNumber {
                display: DEFAULT_PHONE_DISPLAY.to_string(),
                tel: DEFAULT_PHONE_TEL.to_string(),
            },
            popup_delay_ms: 2_000,
            header_selector: ".header-top".to_string(),
            toast_visible_ms: 5_000,
            toast_exit_ms: 300,
        }
    }
}

impl SiteConfig {
    /// Parse a config blob. Missing fields keep their built-in values; a default
    /// phone without a dialable number is rejected.
    pub fn from_json(raw: &str) -> Result<Self, SiteError> {
        let mut config: Self = serde_json::from_str(raw)?;
        let tel = config.default_phone.tel.clone();
        config.default_phone = config
            .default_phone
            .normalized()
            .ok_or(SiteError::InvalidDefaultPhone(tel))?;
        Ok(config)
    }

    pub fn override_for(&self, page: &str) -> Option<&PageOverride> {
        self.overrides.get(page)
    }

    /// Reads the page's embedded config if it has one, the built-in table otherwise.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self, SiteError> {
        use log::debug;

        let document = crate::utils::dom::document()?;
        match document.get_element_by_id(CONFIG_ELEMENT_ID) {
            Some(el) => {
                let raw = el.text_content().unwrap_or_default();
                debug!("Using embedded site config");
                Self::from_json(&raw)
            }
            None => Ok(Self::default()),
        }
    }
}
