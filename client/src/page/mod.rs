use crate::{error::PageError, form::Field, message::Message};
use std::time::Duration;

#[cfg(not(target_family = "wasm"))]
mod native;
#[cfg(target_family = "wasm")]
mod web;

#[cfg(not(target_family = "wasm"))]
pub use native::{MockEvent, MockPage};
#[cfg(target_family = "wasm")]
pub use web::{bind, WebPage};

pub const FORM_ID: &str = "loginForm";
pub const MESSAGE_ID: &str = "message";

/// Deferred work handed to [`Page::set_timeout`].
pub type Task = Box<dyn FnOnce()>;

/// Everything the login handler needs from the page it lives on.
pub trait Page {
    /// Current value of the input backing `field`.
    fn field_value(&self, field: Field) -> Result<String, PageError>;

    /// Shows a blocking alert.
    fn alert(&self, text: &str) -> Result<(), PageError>;

    /// Writes `message` into the message region, or clears it when `None`.
    fn render_message(&self, message: Option<&Message>) -> Result<(), PageError>;

    /// Runs `task` once after `delay`. Scheduled tasks can't be cancelled.
    fn set_timeout(&self, delay: Duration, task: Task) -> Result<(), PageError>;
}

/// A submit event whose default action can be suppressed.
pub trait Submission {
    fn prevent_default(&self);
}
