use std::time::Duration;

/// Non-success messages are wiped from the page after this long.
pub const CLEAR_DELAY: Duration = Duration::from_millis(3000);

/// Base class of the message region, severity classes are appended to it.
pub const BASE_CLASS: &str = "message";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Error,
    Success,
}

impl Severity {
    pub fn class(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Error => "error",
            Severity::Success => "success",
        }
    }
}

/// Text shown inline in the `#message` region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub severity: Severity,
}

impl Message {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Message {
            text: text.into(),
            severity,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Message::new(text, Severity::Info)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Message::new(text, Severity::Error)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Message::new(text, Severity::Success)
    }

    /// Full class attribute for the message region, e.g. `message error`.
    pub fn class_name(&self) -> String {
        format!("{} {}", BASE_CLASS, self.severity.class())
    }

    pub fn clears_automatically(&self) -> bool {
        self.severity != Severity::Success
    }
}

#[test]
fn test_class_name() {
    assert_eq!(Message::info("a").class_name(), "message info");
    assert_eq!(Message::error("a").class_name(), "message error");
    assert_eq!(Message::success("a").class_name(), "message success");
}

#[test]
fn test_clears_automatically() {
    assert!(Message::info("a").clears_automatically());
    assert!(Message::error("a").clears_automatically());
    assert!(!Message::success("a").clears_automatically());
}
