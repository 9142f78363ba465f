use instant::SystemTime;

/// Logs at info level under the target of a [`LogType`].
#[macro_export]
macro_rules! log_to {
    ($ty:expr, $($arg:tt)*) => {
        ::log::info!(target: $ty.target(), $($arg)*)
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogType {
    General,
    Form,
    Timer,
}

impl LogType {
    pub fn target(self) -> &'static str {
        match self {
            LogType::General => "general",
            LogType::Form => "form",
            LogType::Timer => "timer",
        }
    }
}

/// `/<unix secs>/ [<target>] <message>`
pub fn format_line(target: &str, args: &std::fmt::Arguments) -> String {
    let secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("/{}/ [{}] {}", secs, target, args)
}

#[cfg(target_family = "wasm")]
struct ConsoleLogger;

#[cfg(target_family = "wasm")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = wasm_bindgen::JsValue::from_str(&format_line(record.target(), record.args()));
        if record.level() == log::Level::Error {
            web_sys::console::error_1(&line);
        } else {
            web_sys::console::log_1(&line);
        }
    }

    fn flush(&self) {}
}

#[cfg(target_family = "wasm")]
static LOGGER: ConsoleLogger = ConsoleLogger;

/// Installs the logger for this platform. Calling it again does nothing.
pub fn init() {
    #[cfg(target_family = "wasm")]
    {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Info);
        }
    }
    #[cfg(not(target_family = "wasm"))]
    {
        let _ = env_logger::try_init();
    }
}

#[test]
fn test_format_line() {
    let line = format_line(LogType::Form.target(), &format_args!("{} + {}", 1, 2));
    assert!(line.starts_with('/'));
    assert!(line.ends_with("/ [form] 1 + 2"));
}

#[test]
fn test_init_twice() {
    init();
    init();
    log_to!(LogType::General, "still alive");
}
