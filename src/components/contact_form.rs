//! Advisory validation for the contact/quote forms. Nothing is sent anywhere;
//! the visitor just gets a toast.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").unwrap());
static PHONE_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-\(\)]").unwrap());

pub const SUCCESS_MESSAGE: &str = "Thank you for your inquiry! We will contact you soon.";
pub const ERROR_MESSAGE: &str = "Please fill in all required fields correctly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
}

impl FieldKind {
    /// From an `<input type=...>`; textareas and unknown types are plain text.
    pub fn from_input_type(input_type: &str) -> Self {
        match input_type {
            "email" => FieldKind::Email,
            "tel" => FieldKind::Tel,
            _ => FieldKind::Text,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("This field is required")]
    Missing,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Invalid phone number")]
    InvalidPhone,
}

/// Checks one required field.
pub fn validate_field(kind: FieldKind, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Missing);
    }
    match kind {
        FieldKind::Email if !EMAIL_PATTERN.is_match(value) => Err(FieldError::InvalidEmail),
        FieldKind::Tel if !PHONE_PATTERN.is_match(&PHONE_SEPARATORS.replace_all(value, "")) => {
            Err(FieldError::InvalidPhone)
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn for_form(valid: bool) -> Self {
        if valid {
            ToastKind::Success
        } else {
            ToastKind::Error
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ToastKind::Success => SUCCESS_MESSAGE,
            ToastKind::Error => ERROR_MESSAGE,
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            ToastKind::Success => "message message-success",
            ToastKind::Error => "message message-error",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            ToastKind::Success => "#27ae60",
            ToastKind::Error => "#e74c3c",
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use gloo_timers::callback::Timeout;
    use log::{debug, warn};
    use wasm_bindgen::JsCast;
    use web_sys::{Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

    use super::{validate_field, FieldKind, ToastKind};
    use crate::config::SiteConfig;
    use crate::error::SiteError;
    use crate::utils::dom;

    const TOAST_STYLE: &str = "position: fixed; top: 20px; right: 20px; padding: 15px 20px; \
        border-radius: 5px; color: white; font-weight: bold; z-index: 10000; \
        animation: slideIn 0.3s ease; max-width: 300px;";

    const FORM_CSS: &str = "
        @keyframes slideIn { from { transform: translateX(100%); opacity: 0; } to { transform: translateX(0); opacity: 1; } }
        @keyframes slideOut { from { transform: translateX(0); opacity: 1; } to { transform: translateX(100%); opacity: 0; } }
        .error { border-color: #e74c3c !important; box-shadow: 0 0 5px rgba(231, 76, 60, 0.3) !important; }
    ";

    fn field_value(el: &Element) -> Option<(FieldKind, String)> {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            return Some((FieldKind::from_input_type(&input.type_()), input.value()));
        }
        el.dyn_ref::<HtmlTextAreaElement>()
            .map(|area| (FieldKind::Text, area.value()))
    }

    /// Flags every invalid required field. True when all pass.
    fn validate_form(form: &HtmlFormElement) -> bool {
        let Ok(fields) = form.query_selector_all("input[required], textarea[required]") else {
            return true;
        };
        let mut valid = true;
        for el in (0..fields.length())
            .filter_map(|i| fields.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
        {
            let Some((kind, value)) = field_value(&el) else {
                continue;
            };
            match validate_field(kind, &value) {
                Ok(()) => {
                    let _ = el.class_list().remove_1("error");
                }
                Err(e) => {
                    debug!("Field {} rejected: {}", el.id(), e);
                    let _ = el.class_list().add_1("error");
                    valid = false;
                }
            }
        }
        valid
    }

    fn show_toast(kind: ToastKind, visible_ms: u32, exit_ms: u32) -> Result<(), SiteError> {
        let document = dom::document()?;
        let body = document.body().ok_or(SiteError::NoDocument)?;
        let toast = document
            .create_element("div")
            .map_err(SiteError::dom)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SiteError::Dom("div is not an HtmlElement".to_string()))?;
        toast.set_class_name(kind.class_name());
        toast.set_text_content(Some(kind.message()));
        toast.style().set_css_text(TOAST_STYLE);
        dom::set_style(&toast, "background", kind.background());
        body.append_child(&toast).map_err(SiteError::dom)?;

        let timeout = Timeout::new(visible_ms, move || {
            dom::set_style(&toast, "animation", "slideOut 0.3s ease");
            let removal = Timeout::new(exit_ms, move || {
                if body.contains(Some(toast.as_ref())) {
                    let _ = body.remove_child(&toast);
                }
            });
            removal.forget();
        });
        timeout.forget();
        Ok(())
    }

    fn inject_styles() -> Result<(), SiteError> {
        let document = dom::document()?;
        let style = document.create_element("style").map_err(SiteError::dom)?;
        style.set_text_content(Some(FORM_CSS));
        if let Some(head) = document.head() {
            head.append_child(&style).map_err(SiteError::dom)?;
        }
        Ok(())
    }

    pub fn attach(config: &SiteConfig) -> Result<(), SiteError> {
        inject_styles()?;
        let (visible_ms, exit_ms) = (config.toast_visible_ms, config.toast_exit_ms);
        for form in dom::query_all("form")? {
            let Ok(form) = form.dyn_into::<HtmlFormElement>() else {
                continue;
            };
            let target = form.clone();
            dom::listen(&target, "submit", move |e: Event| {
                e.prevent_default();
                let valid = validate_form(&form);
                if let Err(err) = show_toast(ToastKind::for_form(valid), visible_ms, exit_ms) {
                    warn!("Could not show form message: {}", err);
                }
                if valid {
                    form.reset();
                }
            })?;
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::attach;
