pub mod config;
pub mod error;
pub mod form;
pub mod handler;
pub mod logging;
pub mod message;
pub mod page;

pub use config::{Config, Mode};
pub use error::{ConfigError, PageError};
pub use handler::{LoginForm, Outcome};
pub use logging::LogType;

#[cfg(target_family = "wasm")]
use wasm_bindgen::prelude::*;

/// Entry point run by the browser once the module is instantiated.
#[cfg(target_family = "wasm")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    logging::init();

    let config = Config::load().unwrap_or_else(|e| {
        ::log::warn!(target: LogType::General.target(), "Using default config: {}", e);
        Config::default()
    });
    log_to!(LogType::General, "Starting login form in {:?} mode", config.mode);

    let page = page::WebPage::new()?;
    page::bind(LoginForm::new(std::rc::Rc::new(page), config))?;
    Ok(())
}
