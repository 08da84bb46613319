use crate::backend::BackendError;
use crate::session::Session;
use crate::widgets::TextInput;

pub const MISSING_FIELDS: &str = "Please enter your email and password";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    SignUp,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "Log in",
            AuthMode::SignUp => "Sign up",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    #[default]
    Email,
    Password,
}

/// Credentials to send to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCommand {
    LogIn { username: String, password: String },
    /// The email doubles as the username
    SignUp { email: String, password: String },
}

#[derive(Debug)]
pub struct AuthState {
    mode: AuthMode,
    field: AuthField,
    email: TextInput,
    password: TextInput,
    error: Option<String>,
    pending: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            field: AuthField::Email,
            email: TextInput::new(),
            password: TextInput::masked(),
            error: None,
            pending: false,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn field(&self) -> AuthField {
        self.field
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn email(&self) -> &TextInput {
        &self.email
    }

    pub fn password(&self) -> &TextInput {
        &self.password
    }

    pub fn email_mut(&mut self) -> &mut TextInput {
        &mut self.email
    }

    pub fn password_mut(&mut self) -> &mut TextInput {
        &mut self.password
    }

    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.field {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn toggle_field(&mut self) {
        self.field = match self.field {
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Email,
        };
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::Login,
        };
        self.error = None;
    }

    /// Validate the form and produce the backend call. Nothing is sent
    /// while a previous submission is outstanding.
    pub fn submit(&mut self) -> Option<AuthCommand> {
        if self.pending {
            return None;
        }

        let email = self.email.text().trim().to_string();
        let password = self.password.text().to_string();
        if email.is_empty() || password.is_empty() {
            self.error = Some(MISSING_FIELDS.to_string());
            return None;
        }

        self.pending = true;
        self.error = None;
        Some(match self.mode {
            AuthMode::Login => AuthCommand::LogIn {
                username: email,
                password,
            },
            AuthMode::SignUp => AuthCommand::SignUp { email, password },
        })
    }

    /// Returns the session on success; failures stay on the form with the
    /// backend's message.
    pub fn on_result(&mut self, result: Result<Session, BackendError>) -> Option<Session> {
        self.pending = false;
        match result {
            Ok(session) => {
                self.password.clear();
                self.error = None;
                Some(session)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Back to an empty log-in form, keeping the email for convenience.
    pub fn reset(&mut self) {
        self.mode = AuthMode::Login;
        self.field = AuthField::Email;
        self.password.clear();
        self.error = None;
        self.pending = false;
    }
}
