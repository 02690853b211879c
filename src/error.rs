use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("No window available")]
    NoWindow,
    #[error("No document available")]
    NoDocument,
    #[error("Failed to read location: {0}")]
    Location(String),
    #[error("DOM query failed: {0}")]
    Dom(String),
    #[error("Invalid site config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Default phone {0:?} has no digits to dial")]
    InvalidDefaultPhone(String),
    #[error("Popup already mounted")]
    AlreadyMounted,
}

#[cfg(target_arch = "wasm32")]
impl SiteError {
    /// Wraps a thrown JS value, keeping whatever text it carries.
    pub fn dom(err: wasm_bindgen::JsValue) -> Self {
        SiteError::Dom(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
    }
}
