//! Basic authentication for the Jenkins API.
//!
//! Jenkins accepts either the account password or a personal API token as the
//! Basic-auth secret. Both are encoded the same way; only one may be set.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Credentials used for every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Username and account password.
    Password { username: String, password: String },

    /// Username and API token.
    ApiToken { username: String, token: String },
}

impl Credentials {
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Password {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn api_token(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self::ApiToken {
            username: username.into(),
            token: token.into(),
        }
    }

    pub fn username(&self) -> &str {
        match self {
            Self::Password { username, .. } | Self::ApiToken { username, .. } => username,
        }
    }

    fn secret(&self) -> &str {
        match self {
            Self::Password { password, .. } => password,
            Self::ApiToken { token, .. } => token,
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Self::ApiToken { .. })
    }

    /// Value of the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        let raw = format!("{}:{}", self.username(), self.secret());
        format!("Basic {}", STANDARD.encode(raw))
    }
}

// Secrets never end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_token() { "ApiToken" } else { "Password" };
        f.debug_struct(kind)
            .field("username", &self.username())
            .field("secret", &"<redacted>")
            .finish()
    }
}
