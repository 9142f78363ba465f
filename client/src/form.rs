use thiserror::Error;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

/// The only account the simulated login accepts.
pub const DEMO_USERNAME: &str = "admin";
pub const DEMO_PASSWORD: &str = "123456";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Password,
}

impl Field {
    /// Id of the input element backing this field.
    pub fn id(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Password => "password",
        }
    }
}

/// Values of the two inputs at the time of a submission.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Keeps the password out of log lines.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Why a submission was refused. The display text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("请填写用户名和密码")]
    MissingFields,
    #[error("用户名至少需要{0}个字符")]
    UsernameTooShort(usize),
    #[error("密码至少需要{0}个字符")]
    PasswordTooShort(usize),
    #[error("用户名或密码错误")]
    WrongCredentials,
}

/// Length as the browser reports it for an input value (UTF-16 code units).
pub fn js_len(s: &str) -> usize {
    s.encode_utf16().count()
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Presence first, then username length, then password length.
    pub fn validate(&self) -> Result<(), Rejection> {
        if !self.is_complete() {
            return Err(Rejection::MissingFields);
        }
        if js_len(&self.username) < MIN_USERNAME_LEN {
            return Err(Rejection::UsernameTooShort(MIN_USERNAME_LEN));
        }
        if js_len(&self.password) < MIN_PASSWORD_LEN {
            return Err(Rejection::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        Ok(())
    }

    pub fn check(&self) -> Result<(), Rejection> {
        if self.username == DEMO_USERNAME && self.password == DEMO_PASSWORD {
            Ok(())
        } else {
            Err(Rejection::WrongCredentials)
        }
    }
}

#[test]
fn test_is_complete() {
    assert!(Credentials::new("a", "b").is_complete());
    assert!(!Credentials::new("", "b").is_complete());
    assert!(!Credentials::new("a", "").is_complete());
    assert!(!Credentials::new("", "").is_complete());
}

#[test]
fn test_validate() {
    assert_eq!(
        Credentials::new("", "123456").validate(),
        Err(Rejection::MissingFields)
    );
    assert_eq!(
        Credentials::new("ab", "").validate(),
        Err(Rejection::MissingFields)
    );
    assert_eq!(
        Credentials::new("ab", "123456").validate(),
        Err(Rejection::UsernameTooShort(3))
    );
    assert_eq!(
        Credentials::new("abc", "12345").validate(),
        Err(Rejection::PasswordTooShort(6))
    );
    // Username is checked before password.
    assert_eq!(
        Credentials::new("a", "1").validate(),
        Err(Rejection::UsernameTooShort(3))
    );
    assert_eq!(Credentials::new("abc", "123456").validate(), Ok(()));
}

#[test]
fn test_validate_counts_utf16_units() {
    // One astral character is two code units in the browser.
    assert_eq!(Credentials::new("😀a", "123456").validate(), Ok(()));
    assert_eq!(
        Credentials::new("张三", "123456").validate(),
        Err(Rejection::UsernameTooShort(3))
    );
}

#[test]
fn test_check() {
    assert_eq!(Credentials::new("admin", "123456").check(), Ok(()));
    assert_eq!(
        Credentials::new("admin", "1234567").check(),
        Err(Rejection::WrongCredentials)
    );
    assert_eq!(
        Credentials::new("Admin", "123456").check(),
        Err(Rejection::WrongCredentials)
    );
}

#[test]
fn test_rejection_text() {
    assert_eq!(Rejection::MissingFields.to_string(), "请填写用户名和密码");
    assert_eq!(
        Rejection::UsernameTooShort(3).to_string(),
        "用户名至少需要3个字符"
    );
    assert_eq!(
        Rejection::PasswordTooShort(6).to_string(),
        "密码至少需要6个字符"
    );
    assert_eq!(Rejection::WrongCredentials.to_string(), "用户名或密码错误");
}

#[test]
fn test_debug_hides_password() {
    let debug = format!("{:?}", Credentials::new("alice", "secret"));
    assert!(debug.contains("alice"));
    assert!(!debug.contains("secret"));
}

#[test]
fn test_js_len() {
    assert_eq!(js_len("admin"), 5);
    assert_eq!(js_len("张三"), 2);
    assert_eq!(js_len("😀"), 2);
}
