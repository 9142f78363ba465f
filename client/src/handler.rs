use crate::{
    config::{Config, Mode},
    error::PageError,
    form::{js_len, Credentials, Field, Rejection},
    log_to,
    logging::LogType,
    message::{Message, CLEAR_DELAY},
    page::{Page, Submission},
};
use std::{rc::Rc, time::Duration};

#[cfg(test)]
use crate::page::{MockEvent, MockPage};

pub const INCOMPLETE_ALERT: &str = "请填写完整的登录信息";
pub const BACKEND_REQUIRED_ALERT: &str = "登录功能需要后端支持，当前仅为前端演示";
pub const LOGGING_IN: &str = "正在登录...";
pub const LOGIN_SUCCEEDED: &str = "登录成功！正在跳转...";

/// Faked network round trip of the simulated login.
pub const NETWORK_DELAY: Duration = Duration::from_millis(1000);
/// Pause between the success message and the welcome alert.
pub const WELCOME_DELAY: Duration = Duration::from_millis(1500);

pub fn welcome_alert(username: &str) -> String {
    format!("欢迎 {}！", username)
}

/// What a single submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A field was empty, the user was asked to fill in both.
    Incomplete,
    /// Both fields were filled, the user was told a backend is needed.
    BackendRequired,
    /// Refused before the faked round trip.
    Rejected(Rejection),
    /// The faked round trip is running, the result arrives through timers.
    Pending,
}

/// Handles submissions of the login form on `P`.
pub struct LoginForm<P: Page> {
    page: Rc<P>,
    config: Config,
}

impl<P: Page + 'static> LoginForm<P> {
    pub fn new(page: Rc<P>, config: Config) -> Self {
        LoginForm { page, config }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Suppresses the default action of `event`, then reads and answers the form.
    pub fn submit(&self, event: &impl Submission) -> Result<Outcome, PageError> {
        event.prevent_default();

        let credentials = Credentials {
            username: self.page.field_value(Field::Username)?,
            password: self.page.field_value(Field::Password)?,
        };
        log_to!(
            LogType::Form,
            "Submitted in {:?} mode (username length {})",
            self.config.mode,
            js_len(&credentials.username)
        );

        match self.config.mode {
            Mode::Demo => self.answer_demo(&credentials),
            Mode::Simulated => self.answer_simulated(credentials),
        }
    }

    fn answer_demo(&self, credentials: &Credentials) -> Result<Outcome, PageError> {
        if credentials.is_complete() {
            self.page.alert(BACKEND_REQUIRED_ALERT)?;
            Ok(Outcome::BackendRequired)
        } else {
            self.page.alert(INCOMPLETE_ALERT)?;
            Ok(Outcome::Incomplete)
        }
    }

    fn answer_simulated(&self, credentials: Credentials) -> Result<Outcome, PageError> {
        if let Err(rejection) = credentials.validate() {
            show_message(&self.page, Message::error(rejection.to_string()))?;
            return Ok(Outcome::Rejected(rejection));
        }

        show_message(&self.page, Message::info(LOGGING_IN))?;

        let page = Rc::clone(&self.page);
        self.page.set_timeout(
            NETWORK_DELAY,
            Box::new(move || {
                if let Err(e) = finish_login(&page, credentials) {
                    ::log::error!(target: LogType::Timer.target(), "Login failed: {}", e);
                }
            }),
        )?;
        Ok(Outcome::Pending)
    }
}

fn finish_login<P: Page + 'static>(page: &Rc<P>, credentials: Credentials) -> Result<(), PageError> {
    if let Err(rejection) = credentials.check() {
        log_to!(LogType::Timer, "Simulated login rejected");
        return show_message(page, Message::error(rejection.to_string()));
    }

    log_to!(LogType::Timer, "Simulated login accepted");
    show_message(page, Message::success(LOGIN_SUCCEEDED))?;

    let alert_page = Rc::clone(page);
    let text = welcome_alert(&credentials.username);
    page.set_timeout(
        WELCOME_DELAY,
        Box::new(move || {
            if let Err(e) = alert_page.alert(&text) {
                ::log::error!(target: LogType::Timer.target(), "Welcome alert failed: {}", e);
            }
        }),
    )
}

/// Renders `message` and, unless it is a success, schedules the region to be cleared.
/// The clear is unconditional: it also wipes anything shown after `message`.
fn show_message<P: Page + 'static>(page: &Rc<P>, message: Message) -> Result<(), PageError> {
    page.render_message(Some(&message))?;

    if message.clears_automatically() {
        let clear_page = Rc::clone(page);
        page.set_timeout(
            CLEAR_DELAY,
            Box::new(move || {
                if let Err(e) = clear_page.render_message(None) {
                    ::log::error!(target: LogType::Timer.target(), "Clearing message failed: {}", e);
                }
            }),
        )?;
    }
    Ok(())
}

#[cfg(test)]
fn form(mode: Mode, username: &str, password: &str) -> (Rc<MockPage>, LoginForm<MockPage>) {
    let page = Rc::new(MockPage::new(username, password));
    let form = LoginForm::new(Rc::clone(&page), Config { mode });
    (page, form)
}

#[cfg(test)]
fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

#[test]
fn test_demo_empty_username() {
    let (page, form) = form(Mode::Demo, "", "anything");
    let event = MockEvent::new();
    assert_eq!(form.submit(&event), Ok(Outcome::Incomplete));
    assert!(event.default_prevented());
    assert_eq!(page.alerts(), vec![INCOMPLETE_ALERT]);
    assert_eq!(page.pending_timers(), 0);
    assert_eq!(page.message(), None);
}

#[test]
fn test_demo_empty_password() {
    let (page, form) = form(Mode::Demo, "anything", "");
    assert_eq!(form.submit(&MockEvent::new()), Ok(Outcome::Incomplete));
    assert_eq!(page.alerts(), vec![INCOMPLETE_ALERT]);
}

#[test]
fn test_demo_complete() {
    let (page, form) = form(Mode::Demo, "alice", "secret");
    let event = MockEvent::new();
    assert_eq!(form.submit(&event), Ok(Outcome::BackendRequired));
    assert!(event.default_prevented());
    assert_eq!(page.alerts(), vec![BACKEND_REQUIRED_ALERT]);
    assert_eq!(page.pending_timers(), 0);
}

#[test]
fn test_demo_ignores_length_rules() {
    let (page, form) = form(Mode::Demo, "a", "b");
    assert_eq!(form.submit(&MockEvent::new()), Ok(Outcome::BackendRequired));
    assert_eq!(page.alerts(), vec![BACKEND_REQUIRED_ALERT]);
}

#[test]
fn test_default_prevented_even_on_page_error() {
    let (page, form) = form(Mode::Demo, "alice", "secret");
    page.remove_field(Field::Username);
    let event = MockEvent::new();
    assert_eq!(
        form.submit(&event),
        Err(PageError::MissingElement("username"))
    );
    assert!(event.default_prevented());
    assert!(page.alerts().is_empty());
}

#[test]
fn test_demo_resubmission_is_idempotent() {
    let (page, form) = form(Mode::Demo, "", "");
    for _ in 0..3 {
        assert_eq!(form.submit(&MockEvent::new()), Ok(Outcome::Incomplete));
    }
    assert_eq!(page.alerts(), vec![INCOMPLETE_ALERT; 3]);

    page.fill("bob", "pw");
    assert_eq!(form.submit(&MockEvent::new()), Ok(Outcome::BackendRequired));
}

#[test]
fn test_demo_needs_no_message_region() {
    let page = Rc::new(MockPage::without_message_region("alice", "secret"));
    let form = LoginForm::new(Rc::clone(&page), Config::default());
    assert_eq!(form.submit(&MockEvent::new()), Ok(Outcome::BackendRequired));
}

#[test]
fn test_simulated_missing_fields() {
    let (page, form) = form(Mode::Simulated, "", "123456");
    assert_eq!(
        form.submit(&MockEvent::new()),
        Ok(Outcome::Rejected(Rejection::MissingFields))
    );
    assert_eq!(page.message(), Some(Message::error("请填写用户名和密码")));
    assert!(page.alerts().is_empty());
}

#[test]
fn test_simulated_short_username() {
    for username in ["a", "ab"] {
        let (page, form) = form(Mode::Simulated, username, "123456");
        assert_eq!(
            form.submit(&MockEvent::new()),
            Ok(Outcome::Rejected(Rejection::UsernameTooShort(3)))
        );
        assert_eq!(page.message(), Some(Message::error("用户名至少需要3个字符")));
    }
}

#[test]
fn test_simulated_short_password() {
    for password in ["1", "12345"] {
        let (page, form) = form(Mode::Simulated, "admin", password);
        assert_eq!(
            form.submit(&MockEvent::new()),
            Ok(Outcome::Rejected(Rejection::PasswordTooShort(6)))
        );
        assert_eq!(page.message(), Some(Message::error("密码至少需要6个字符")));
    }
}

#[test]
fn test_simulated_error_clears_after_three_seconds() {
    let (page, form) = form(Mode::Simulated, "ab", "123456");
    form.submit(&MockEvent::new()).unwrap();
    assert_eq!(page.message().map(|m| m.class_name()), Some("message error".to_owned()));

    page.advance(ms(2999));
    assert!(page.message().is_some());
    page.advance(ms(1));
    assert_eq!(page.message(), None);
}

#[test]
fn test_simulated_success() {
    let (page, form) = form(Mode::Simulated, "admin", "123456");
    let event = MockEvent::new();
    assert_eq!(form.submit(&event), Ok(Outcome::Pending));
    assert!(event.default_prevented());
    assert_eq!(page.message(), Some(Message::info(LOGGING_IN)));

    page.advance(ms(999));
    assert_eq!(page.message(), Some(Message::info(LOGGING_IN)));

    page.advance(ms(1));
    assert_eq!(page.message(), Some(Message::success(LOGIN_SUCCEEDED)));
    assert!(page.alerts().is_empty());

    page.advance(ms(1499));
    assert!(page.alerts().is_empty());
    page.advance(ms(1));
    assert_eq!(page.alerts(), vec!["欢迎 admin！"]);

    // The success message never clears, but the info message's timer
    // scheduled at t=0 already wiped it at t=3s.
    page.advance(ms(10_000));
    assert_eq!(page.pending_timers(), 0);
    assert_eq!(page.alerts().len(), 1);
}

#[test]
fn test_simulated_stale_clear_wipes_success() {
    let (page, form) = form(Mode::Simulated, "admin", "123456");
    form.submit(&MockEvent::new()).unwrap();

    page.advance(ms(2999));
    assert_eq!(page.message(), Some(Message::success(LOGIN_SUCCEEDED)));
    page.advance(ms(1));
    assert_eq!(page.message(), None);
}

#[test]
fn test_simulated_wrong_credentials() {
    let (page, form) = form(Mode::Simulated, "alice", "secret1");
    assert_eq!(form.submit(&MockEvent::new()), Ok(Outcome::Pending));

    page.advance(ms(1000));
    assert_eq!(page.message(), Some(Message::error("用户名或密码错误")));

    // Cleared by the timer of the info message at 3s, then again by its own at 4s.
    page.advance(ms(2000));
    assert_eq!(page.message(), None);
    page.advance(ms(1000));
    assert_eq!(page.pending_timers(), 0);
    assert!(page.alerts().is_empty());
}

#[test]
fn test_simulated_overlapping_submissions() {
    let (page, form) = form(Mode::Simulated, "admin", "123456");
    form.submit(&MockEvent::new()).unwrap();
    page.advance(ms(500));
    form.submit(&MockEvent::new()).unwrap();

    page.advance(ms(10_000));
    assert_eq!(page.alerts(), vec!["欢迎 admin！"; 2]);
}

#[test]
fn test_simulated_resubmission_is_idempotent() {
    let (page, form) = form(Mode::Simulated, "ab", "123456");
    for _ in 0..3 {
        assert_eq!(
            form.submit(&MockEvent::new()),
            Ok(Outcome::Rejected(Rejection::UsernameTooShort(3)))
        );
        assert_eq!(page.message(), Some(Message::error("用户名至少需要3个字符")));
        page.advance(ms(5000));
    }
}

#[test]
fn test_simulated_missing_message_region() {
    let page = Rc::new(MockPage::without_message_region("ab", "123456"));
    let form = LoginForm::new(
        Rc::clone(&page),
        Config {
            mode: Mode::Simulated,
        },
    );
    assert_eq!(
        form.submit(&MockEvent::new()),
        Err(PageError::MissingElement("message"))
    );
}

#[test]
fn test_welcome_alert() {
    assert_eq!(welcome_alert("admin"), "欢迎 admin！");
}
