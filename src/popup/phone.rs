use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::page::PageSnapshot;

static TEL_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*tel:\s*").unwrap());

// Loose match for a phone-looking run of text, e.g. "Call +1 (833) 268-9840 today"
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?\d[\d\s\-\(\)]{6,}\d").unwrap());

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    /// What the visitor reads.
    pub display: String,
    /// Dial string: digits with an optional leading `+`.
    pub tel: String,
}

impl PhoneNumber {
    pub fn href(&self) -> String {
        format!("tel:{}", self.tel)
    }

    /// Reduces `tel` to a dial string and fills a blank display from it.
    /// `None` when there is nothing to dial.
    pub fn normalized(self) -> Option<Self> {
        let tel = dial_string(&self.tel);
        if tel.is_empty() {
            return None;
        }
        let display = match self.display.trim() {
            "" => format_display(&tel),
            shown => shown.to_string(),
        };
        Some(Self { display, tel })
    }
}

/// A `tel:` link as found on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelAnchor {
    pub href: String,
    pub text: String,
}

impl TelAnchor {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: text.into(),
        }
    }
}

pub fn has_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

/// Normalizes `tel:` targets and free text into a dial string.
/// Returns an empty string when there are no digits at all.
pub fn dial_string(raw: &str) -> String {
    let number = TEL_SCHEME.replace(raw, "");
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return String::new();
    }
    let leading_plus = number.chars().find(|c| *c == '+' || c.is_ascii_digit()) == Some('+');
    if leading_plus {
        format!("+{}", digits)
    } else {
        digits
    }
}

/// Formats US numbers for display, anything else is shown as dialed.
pub fn format_display(dial: &str) -> String {
    let digits: String = dial.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        11 if digits.starts_with('1') => {
            let d = &digits[1..];
            format!("+1 ({}) {}-{}", &d[..3], &d[3..6], &d[6..])
        }
        10 => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        _ => dial.to_string(),
    }
}

fn phone_from_anchor(anchor: &TelAnchor) -> Option<PhoneNumber> {
    let tel = dial_string(&anchor.href);
    if tel.is_empty() {
        return None;
    }
    let visible = anchor.text.trim();
    let display = if has_digit(visible) {
        visible.to_string()
    } else {
        format_display(&tel)
    };
    Some(PhoneNumber { display, tel })
}

/// First tel link whose visible text carries digits; that text is likely the number itself.
pub fn from_anchor_text(anchors: &[TelAnchor]) -> Option<PhoneNumber> {
    anchors
        .iter()
        .filter(|a| has_digit(a.text.trim()))
        .find_map(phone_from_anchor)
}

pub fn from_first_anchor(anchors: &[TelAnchor]) -> Option<PhoneNumber> {
    anchors.first().and_then(phone_from_anchor)
}

pub fn from_header_text(text: &str) -> Option<PhoneNumber> {
    let found = PHONE_PATTERN.find(text)?;
    let tel = dial_string(found.as_str());
    if tel.is_empty() {
        return None;
    }
    Some(PhoneNumber {
        display: found.as_str().trim().to_string(),
        tel,
    })
}

pub type Resolver = fn(&PageSnapshot) -> Option<PhoneNumber>;

fn by_anchor_text(page: &PageSnapshot) -> Option<PhoneNumber> {
    from_anchor_text(&page.tel_anchors)
}

fn by_first_anchor(page: &PageSnapshot) -> Option<PhoneNumber> {
    from_first_anchor(&page.tel_anchors)
}

fn by_header_text(page: &PageSnapshot) -> Option<PhoneNumber> {
    from_header_text(&page.header_text)
}

/// Resolution order. The first resolver that produces a number wins.
pub const RESOLVERS: [(&str, Resolver); 3] = [
    ("anchor_text", by_anchor_text),
    ("first_anchor", by_first_anchor),
    ("header_text", by_header_text),
];

pub fn first_success(page: &PageSnapshot, resolvers: &[(&str, Resolver)]) -> Option<PhoneNumber> {
    resolvers.iter().find_map(|(name, resolver)| {
        let phone = resolver(page)?;
        debug!("Phone resolved by {}: {}", name, phone.tel);
        Some(phone)
    })
}

pub fn resolve(page: &PageSnapshot, default: &PhoneNumber) -> PhoneNumber {
    first_success(page, &RESOLVERS).unwrap_or_else(|| default.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_PHONE_DISPLAY, DEFAULT_PHONE_TEL};
    use pretty_assertions::assert_eq;

    fn default_phone() -> PhoneNumber {
        PhoneNumber {
            display: DEFAULT_PHONE_DISPLAY.to_string(),
            tel: DEFAULT_PHONE_TEL.to_string(),
        }
    }

    fn page(anchors: Vec<TelAnchor>, header: &str) -> PageSnapshot {
        PageSnapshot {
            path: "/spectrum.html".to_string(),
            tel_anchors: anchors,
            header_text: header.to_string(),
        }
    }

    #[test]
    fn dial_string_strips_scheme_and_punctuation() {
        assert_eq!(dial_string("tel:+1-833-268-9840"), "+18332689840");
        assert_eq!(dial_string("TEL: 1 (833) 268 9840"), "18332689840");
        assert_eq!(dial_string("(+1) 833.268.9840"), "+18332689840");
        assert_eq!(dial_string("tel:"), "");
        assert_eq!(dial_string("tel:+"), "");
    }

    #[test]
    fn dial_string_drops_inner_plus_signs() {
        assert_eq!(dial_string("tel:1+833"), "1833");
    }

    #[test]
    fn format_display_for_us_numbers() {
        assert_eq!(format_display("18332689840"), "+1 (833) 268-9840");
        assert_eq!(format_display("+18332689840"), "+1 (833) 268-9840");
        assert_eq!(format_display("8332689840"), "(833) 268-9840");
        assert_eq!(format_display("+4420794600"), "(442) 079-4600");
        assert_eq!(format_display("+358454901522"), "+358454901522");
    }

    #[test]
    fn visible_text_wins_for_display() {
        let anchors = vec![TelAnchor::new("tel:+18332689840", "(833) 268-9840")];
        let phone = resolve(&page(anchors, ""), &default_phone());
        assert_eq!(
            phone,
            PhoneNumber {
                display: "(833) 268-9840".to_string(),
                tel: "+18332689840".to_string(),
            }
        );
    }

    #[test]
    fn anchor_without_digits_gets_formatted_display() {
        let anchors = vec![TelAnchor::new("tel:18332689840", "  Call us  ")];
        let phone = resolve(&page(anchors, ""), &default_phone());
        assert_eq!(phone.display, "+1 (833) 268-9840");
        assert_eq!(phone.tel, "18332689840");
    }

    #[test]
    fn digit_text_anchor_preferred_over_earlier_icon_link() {
        let anchors = vec![
            TelAnchor::new("tel:18005550100", ""),
            TelAnchor::new("tel:+18332689840", "+1 (833) 268-9840"),
        ];
        let phone = resolve(&page(anchors, ""), &default_phone());
        assert_eq!(phone.tel, "+18332689840");
        assert_eq!(phone.display, "+1 (833) 268-9840");
    }

    #[test]
    fn header_text_used_when_no_anchor() {
        let phone = resolve(
            &page(vec![], "Support hours 24/7 | Call +1 (866) 555-0199 now"),
            &default_phone(),
        );
        assert_eq!(phone.display, "+1 (866) 555-0199");
        assert_eq!(phone.tel, "+18665550199");
    }

    #[test]
    fn tel_anchor_beats_header_number() {
        let anchors = vec![TelAnchor::new("tel:18332689840", "Call us")];
        let phone = resolve(
            &page(anchors, "Questions? Call +1 (866) 555-0199"),
            &default_phone(),
        );
        assert_eq!(phone.tel, "18332689840");
        assert_eq!(phone.display, "+1 (833) 268-9840");
    }

    #[test]
    fn header_text_needs_enough_digits() {
        assert_eq!(from_header_text("Open 24/7, est. 1999"), None);
    }

    #[test]
    fn falls_back_to_default() {
        let phone = resolve(&page(vec![], "Welcome to Alpha Solutions Hub"), &default_phone());
        assert_eq!(phone, default_phone());
    }

    #[test]
    fn anchor_with_empty_number_falls_through() {
        let anchors = vec![TelAnchor::new("tel:", "Call 24/7")];
        let phone = resolve(&page(anchors, ""), &default_phone());
        assert_eq!(phone, default_phone());
    }

    #[test]
    fn first_success_respects_order() {
        fn never(_: &PageSnapshot) -> Option<PhoneNumber> {
            None
        }
        fn fixed(_: &PageSnapshot) -> Option<PhoneNumber> {
            Some(PhoneNumber {
                display: "x".to_string(),
                tel: "1".to_string(),
            })
        }
        let resolvers: [(&str, Resolver); 2] = [("never", never), ("fixed", fixed)];
        let phone = first_success(&page(vec![], ""), &resolvers);
        assert_eq!(phone.map(|p| p.tel), Some("1".to_string()));
    }
}
