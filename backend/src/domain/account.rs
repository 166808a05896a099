//! Login and contact form records.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Fixed confirmation returned on a successful login.
pub const LOGIN_MESSAGE: &str = "Login Succesfully!";

/// Login credentials submitted as a form.
///
/// The password is accepted but never stored or echoed.
#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct LoginForm {
    #[validate(length(max = 30, message = "must be at most 30 characters"))]
    /// Account name, at most 30 characters.
    #[schema(max_length = 30, example = "cafregoso")]
    pub username: String,
    /// Account secret; read and discarded.
    #[schema(example = "secret123")]
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginOut {
    /// Username echoed from the form.
    #[schema(max_length = 30, example = "cafregoso")]
    pub username: String,
    /// Always [`LOGIN_MESSAGE`].
    #[schema(example = "Login Succesfully!")]
    pub message: String,
}

impl LoginOut {
    /// Confirmation echoing `username` with the fixed success message.
    #[must_use]
    pub fn for_user(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            message: LOGIN_MESSAGE.to_owned(),
        }
    }
}

impl From<LoginForm> for LoginOut {
    fn from(form: LoginForm) -> Self {
        Self::for_user(form.username)
    }
}

/// Contact request submitted as a form.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ContactForm {
    /// Sender's given name.
    #[validate(length(min = 2, max = 30, message = "must be between 2 and 30 characters"))]
    #[schema(min_length = 2, max_length = 30, example = "Carlos")]
    pub first_name: String,
    /// Sender's family name.
    #[validate(length(min = 2, max = 30, message = "must be between 2 and 30 characters"))]
    #[schema(min_length = 2, max_length = 30, example = "Alvarez")]
    pub last_name: String,
    /// Reply address.
    #[validate(email(message = "must be a valid email address"))]
    #[schema(example = "carlos@example.com")]
    pub email: String,
    /// Message body, at least 20 characters.
    #[validate(length(min = 20, message = "must be at least 20 characters"))]
    #[schema(min_length = 20, example = "I would like to know more about your service.")]
    pub message: String,
}

/// Greeting returned by the root endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Greeting {
    /// Greeting text, serialised under the `Hello` key.
    #[serde(rename = "Hello")]
    #[schema(example = "World again")]
    pub hello: String,
}

impl Default for Greeting {
    fn default() -> Self {
        Self {
            hello: "World again".to_owned(),
        }
    }
}
