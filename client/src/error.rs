use thiserror::Error;

/// Failure to talk to the page itself. Validation outcomes are never errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("element '#{0}' not found")]
    MissingElement(&'static str),
    #[error("element '#{0}' has an unexpected type")]
    WrongElementType(&'static str),
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_family = "wasm")]
impl From<wasm_bindgen::JsValue> for PageError {
    fn from(js: wasm_bindgen::JsValue) -> Self {
        PageError::Js(format!("{:?}", js))
    }
}

#[cfg(target_family = "wasm")]
impl From<PageError> for wasm_bindgen::JsValue {
    fn from(e: PageError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("config value: {0}")]
    Json(#[from] serde_json::Error),
    #[error("local storage: {0}")]
    Storage(String),
}

#[test]
fn test_page_error_display() {
    assert_eq!(
        PageError::MissingElement("loginForm").to_string(),
        "element '#loginForm' not found"
    );
    assert_eq!(
        PageError::Js("TypeError".to_owned()).to_string(),
        "javascript error: TypeError"
    );
}
