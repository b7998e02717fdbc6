//! User domain types: registration and login DTOs with their
//! validation rules.
//!
//! Users are created once at registration and never mutated through
//! this API, so there is no update DTO.

use serde::Deserialize;

use crate::error::CoreError;

/// Role assigned at registration when the client supplies none.
pub const DEFAULT_ROLE: &str = "user";

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Request body for `POST /register`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Validated registration data.
///
/// The password is still plaintext here; hashing happens at the API
/// layer before anything is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl RegisterUser {
    /// Validate required fields, defaulting `role` to [`DEFAULT_ROLE`].
    pub fn validate(&self) -> Result<Registration, CoreError> {
        Ok(Registration {
            name: require(self.name.as_deref(), "nome é obrigatório")?,
            email: require(self.email.as_deref(), "e-mail é obrigatório")?,
            password: require(self.password.as_deref(), "senha é obrigatória")?,
            role: self
                .role
                .as_deref()
                .and_then(trimmed)
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Request body for `POST /login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginUser {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validated login credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginUser {
    /// Validate that both credentials are present.
    pub fn validate(&self) -> Result<Credentials, CoreError> {
        Ok(Credentials {
            email: require(self.email.as_deref(), "e-mail é obrigatório")?,
            password: require(self.password.as_deref(), "senha é obrigatória")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn trimmed(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn require(value: Option<&str>, message: &str) -> Result<String, CoreError> {
    value
        .and_then(trimmed)
        .ok_or_else(|| CoreError::Validation(message.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn full_register() -> RegisterUser {
        RegisterUser {
            name: Some("Maria".to_string()),
            email: Some("maria@example.com".to_string()),
            password: Some("s3nha-forte".to_string()),
            role: None,
        }
    }

    #[test]
    fn role_defaults_to_user() {
        let reg = full_register().validate().unwrap();
        assert_eq!(reg.role, DEFAULT_ROLE);
    }

    #[test]
    fn explicit_role_is_kept() {
        let mut input = full_register();
        input.role = Some("admin".to_string());

        assert_eq!(input.validate().unwrap().role, "admin");
    }

    #[test]
    fn missing_name_is_rejected() {
        let mut input = full_register();
        input.name = None;

        let err = input.validate().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "nome é obrigatório");
    }

    #[test]
    fn blank_email_counts_as_missing() {
        let mut input = full_register();
        input.email = Some("  ".to_string());

        let err = input.validate().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "e-mail é obrigatório");
    }

    #[test]
    fn login_requires_both_fields() {
        let err = LoginUser::default().validate().unwrap_err();
        assert_matches!(err, CoreError::Validation(_));

        let ok = LoginUser {
            email: Some("maria@example.com".to_string()),
            password: Some("s3nha-forte".to_string()),
        }
        .validate()
        .unwrap();
        assert_eq!(ok.email, "maria@example.com");
    }
}
