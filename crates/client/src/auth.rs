//! Authentication: login credentials and the in-memory session.

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, UserId};

/// Email/password pair submitted to `POST /auth/login`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(DomainError::validation("email and password are required"));
        }
        if !self.email.contains('@') {
            return Err(DomainError::validation("email format is invalid"));
        }
        Ok(())
    }
}

/// The logged-in user as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Bearer token plus the user it was issued to.
///
/// `user` is `None` when the token came from configuration instead of a login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: Option<User>,
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

impl Session {
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_validation() {
        assert!(Credentials::new("", "secret").validate().is_err());
        assert!(Credentials::new("a@b.c", "").validate().is_err());
        assert!(matches!(
            Credentials::new("admin.example.com", "secret").validate(),
            Err(DomainError::Validation(msg)) if msg.contains("format")
        ));
        assert!(Credentials::new("admin@example.com", "secret").validate().is_ok());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let creds = Credentials::new("admin@example.com", "hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));

        let session = Session::from_token("abc.def.ghi");
        assert!(!format!("{session:?}").contains("abc.def.ghi"));
    }
}
