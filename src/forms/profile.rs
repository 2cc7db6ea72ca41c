use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{EmailAddress, TypeConstraintError, Username};

#[derive(Deserialize, Validate)]
pub struct ProfileUpdateForm {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdateFormPayload {
    pub username: Username,
    pub email: EmailAddress,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Error)]
pub enum ProfileUpdateFormError {
    #[error("Profile form validation failed: {0}")]
    Validation(String),
    #[error("Profile form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ProfileUpdateFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ProfileUpdateFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ProfileUpdateForm> for ProfileUpdateFormPayload {
    type Error = ProfileUpdateFormError;

    fn try_from(value: ProfileUpdateForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            username: Username::new(value.username)?,
            email: EmailAddress::new(value.email)?,
            first_name: value.first_name.trim().to_string(),
            last_name: value.last_name.trim().to_string(),
        })
    }
}
