use crate::io::repos::UserRepository;

/// Outcome of a login attempt. Failures are user-facing conditions, not
/// errors; the messages match the site's login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    EmptyUsername,
    UnknownUser,
    WrongPassword,
    /// Carries the trimmed username to persist as the session.
    Success(String),
}

impl LoginOutcome {
    pub fn message(&self) -> String {
        match self {
            LoginOutcome::EmptyUsername => "Please enter a valid username".to_string(),
            LoginOutcome::UnknownUser => {
                "Account with this username does not exist.".to_string()
            }
            LoginOutcome::WrongPassword => {
                "Password is incorrect for this username.".to_string()
            }
            LoginOutcome::Success(username) => format!("Logged in as {}", username),
        }
    }
}

/// Check credentials against the user repository. The username is trimmed
/// first; the password is compared exactly.
pub fn attempt(users: &UserRepository, username: &str, password: &str) -> LoginOutcome {
    let username = username.trim();
    if username.is_empty() {
        return LoginOutcome::EmptyUsername;
    }
    if !users.exists(username) {
        return LoginOutcome::UnknownUser;
    }
    if users.password(username) != Some(password) {
        return LoginOutcome::WrongPassword;
    }
    LoginOutcome::Success(username.to_string())
}
