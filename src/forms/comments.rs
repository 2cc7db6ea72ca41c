use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::comment::NewComment;
use crate::domain::types::{CommentBody, PostId, TypeConstraintError, UserId};

#[derive(Deserialize, Validate)]
pub struct CommentForm {
    #[validate(length(min = 1))]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentFormPayload {
    pub body: CommentBody,
}

impl CommentFormPayload {
    pub fn into_new_comment(self, post_id: PostId, author_id: UserId) -> NewComment {
        NewComment {
            post_id,
            author_id,
            body: self.body,
        }
    }
}

#[derive(Debug, Error)]
pub enum CommentFormError {
    #[error("Comment form validation failed: {0}")]
    Validation(String),
    #[error("Comment form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CommentFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CommentFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CommentForm> for CommentFormPayload {
    type Error = CommentFormError;

    fn try_from(value: CommentForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            body: CommentBody::new(value.body)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_text_is_trimmed() {
        let form = CommentForm {
            body: "  well said  ".to_string(),
        };
        let payload: CommentFormPayload = form.try_into().unwrap();
        assert_eq!(payload.body.as_str(), "well said");
    }

    #[test]
    fn whitespace_only_comment_is_rejected() {
        let form = CommentForm {
            body: "   ".to_string(),
        };
        let payload: Result<CommentFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }
}
