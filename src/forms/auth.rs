use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{EmailAddress, TypeConstraintError, Username};
use crate::domain::user::NewUser;

#[derive(Deserialize, Validate)]
pub struct SignupForm {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub password_confirm: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignupFormPayload {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl SignupFormPayload {
    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser {
            username: self.username,
            email: self.email,
            password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

#[derive(Debug, Error)]
pub enum SignupFormError {
    #[error("Signup form validation failed: {0}")]
    Validation(String),
    #[error("Signup form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl From<ValidationErrors> for SignupFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for SignupFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<SignupForm> for SignupFormPayload {
    type Error = SignupFormError;

    fn try_from(value: SignupForm) -> Result<Self, Self::Error> {
        value.validate()?;
        if value.password != value.password_confirm {
            return Err(SignupFormError::PasswordMismatch);
        }

        Ok(Self {
            username: Username::new(value.username)?,
            email: EmailAddress::new(value.email)?,
            password: value.password,
            first_name: value.first_name.trim().to_string(),
            last_name: value.last_name.trim().to_string(),
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginFormPayload {
    pub username: Username,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum LoginFormError {
    #[error("Login form validation failed: {0}")]
    Validation(String),
    #[error("Login form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for LoginFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for LoginFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<LoginForm> for LoginFormPayload {
    type Error = LoginFormError;

    fn try_from(value: LoginForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            username: Username::new(value.username)?,
            password: value.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup_form() -> SignupForm {
        SignupForm {
            username: "ivan".to_string(),
            email: "ivan@example.com".to_string(),
            password: "correct horse".to_string(),
            password_confirm: "correct horse".to_string(),
            first_name: " Ivan ".to_string(),
            last_name: "".to_string(),
        }
    }

    #[test]
    fn signup_accepts_valid_input_and_trims_names() {
        let payload: SignupFormPayload = signup_form().try_into().unwrap();
        assert_eq!(payload.username.as_str(), "ivan");
        assert_eq!(payload.first_name, "Ivan");
        assert_eq!(payload.last_name, "");
    }

    #[test]
    fn signup_rejects_password_mismatch() {
        let mut form = signup_form();
        form.password_confirm = "different".to_string();
        let err = SignupFormPayload::try_from(form).unwrap_err();
        assert!(matches!(err, SignupFormError::PasswordMismatch));
    }

    #[test]
    fn signup_rejects_short_password() {
        let mut form = signup_form();
        form.password = "short".to_string();
        form.password_confirm = "short".to_string();
        let err = SignupFormPayload::try_from(form).unwrap_err();
        assert!(matches!(err, SignupFormError::Validation(_)));
    }

    #[test]
    fn login_rejects_empty_fields() {
        let form = LoginForm {
            username: "".to_string(),
            password: "secret".to_string(),
        };
        let err = LoginFormPayload::try_from(form).unwrap_err();
        assert!(matches!(err, LoginFormError::Validation(_)));
    }
}
