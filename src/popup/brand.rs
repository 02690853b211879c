use serde::Deserialize;

use super::phone::{dial_string, PhoneNumber};

pub const DEFAULT_LOGO: &str = "img/logo.svg";

/// Per-page replacements for the resolved number and the popup branding.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PageOverride {
    pub tel: Option<String>,
    pub display: Option<String>,
    pub brand: Option<String>,
    pub logo: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// What sits at the top of the popup body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Brand {
    Logo(String),
    Label(String),
    Default,
}

impl Brand {
    /// A logo beats a text label, which beats the site logo.
    pub fn from_override(page_override: Option<&PageOverride>) -> Self {
        let Some(o) = page_override else {
            return Brand::Default;
        };
        if let Some(logo) = non_blank(&o.logo) {
            Brand::Logo(logo.to_string())
        } else if let Some(label) = non_blank(&o.brand) {
            Brand::Label(label.to_string())
        } else {
            Brand::Default
        }
    }
}

pub fn apply_override(phone: PhoneNumber, page_override: Option<&PageOverride>) -> PhoneNumber {
    let Some(o) = page_override else {
        return phone;
    };
    let mut phone = phone;
    if let Some(display) = non_blank(&o.display) {
        phone.display = display.to_string();
    }
    if let Some(tel) = non_blank(&o.tel) {
        let tel = dial_string(tel);
        // an override without digits must not blank out a good number
        if !tel.is_empty() {
            phone.tel = tel;
        }
    }
    phone
}

/// Everything the overlay renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    pub phone: PhoneNumber,
    pub brand: Brand,
}

impl PopupContent {
    pub fn new(resolved: PhoneNumber, page_override: Option<&PageOverride>) -> Self {
        Self {
            phone: apply_override(resolved, page_override),
            brand: Brand::from_override(page_override),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scraped() -> PhoneNumber {
        PhoneNumber {
            display: "(800) 555-0100".to_string(),
            tel: "18005550100".to_string(),
        }
    }

    #[test]
    fn override_replaces_number_and_sets_brand() {
        let o = PageOverride {
            tel: Some("+1 833 268 9840".to_string()),
            display: Some("+1 (833) 268-9840".to_string()),
            brand: Some("Spectrum".to_string()),
            logo: Some("img/spectrum.png".to_string()),
        };
        let content = PopupContent::new(scraped(), Some(&o));
        assert_eq!(
            content,
            PopupContent {
                phone: PhoneNumber {
                    display: "+1 (833) 268-9840".to_string(),
                    tel: "+18332689840".to_string(),
                },
                brand: Brand::Logo("img/spectrum.png".to_string()),
            }
        );
    }

    #[test]
    fn logo_only_override_keeps_scraped_number() {
        let o = PageOverride {
            logo: Some("img/verizo.png".to_string()),
            ..Default::default()
        };
        let content = PopupContent::new(scraped(), Some(&o));
        assert_eq!(content.phone, scraped());
        assert_eq!(content.brand, Brand::Logo("img/verizo.png".to_string()));
    }

    #[test]
    fn label_used_without_logo() {
        let o = PageOverride {
            brand: Some(" of Spectrum ".to_string()),
            logo: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(Brand::from_override(Some(&o)), Brand::Label("of Spectrum".to_string()));
    }

    #[test]
    fn no_override_uses_default_logo() {
        let content = PopupContent::new(scraped(), None);
        assert_eq!(content.phone, scraped());
        assert_eq!(content.brand, Brand::Default);
    }

    #[test]
    fn digitless_tel_override_is_ignored() {
        let o = PageOverride {
            tel: Some("call-us".to_string()),
            ..Default::default()
        };
        assert_eq!(apply_override(scraped(), Some(&o)).tel, "18005550100");
    }
}
