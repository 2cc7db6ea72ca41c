use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::domain::post::{NewPost, UpdatePost};
use crate::domain::types::{
    CategoryId, ImageFileName, LocationId, PostBody, PostTitle, TypeConstraintError, UserId,
};

/// Post create/edit form. Multipart because of the image upload; selects
/// submit an empty string when nothing is chosen, hence the string-typed
/// id fields.
#[derive(MultipartForm)]
pub struct PostForm {
    pub title: Text<String>,
    pub body: Text<String>,
    pub pub_date: Text<String>,
    pub category_id: Option<Text<String>>,
    pub location_id: Option<Text<String>>,
    pub is_published: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostFormPayload {
    pub title: PostTitle,
    pub body: PostBody,
    pub pub_date: NaiveDateTime,
    pub category_id: Option<CategoryId>,
    pub location_id: Option<LocationId>,
    pub is_published: bool,
}

impl PostFormPayload {
    pub fn into_new_post(self, author_id: UserId, image: Option<ImageFileName>) -> NewPost {
        NewPost {
            title: self.title,
            body: self.body,
            image,
            pub_date: self.pub_date,
            author_id,
            location_id: self.location_id,
            category_id: self.category_id,
            is_published: self.is_published,
        }
    }

    /// `image: None` keeps the currently stored file.
    pub fn into_update_post(self, image: Option<ImageFileName>) -> UpdatePost {
        UpdatePost {
            title: self.title,
            body: self.body,
            image,
            pub_date: self.pub_date,
            location_id: self.location_id,
            category_id: self.category_id,
            is_published: self.is_published,
        }
    }
}

#[derive(Debug, Error)]
pub enum PostFormError {
    #[error("Post form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Publication date is not recognized: {0}")]
    InvalidPubDate(String),
    #[error("Invalid reference id: {0}")]
    InvalidId(String),
}

impl From<TypeConstraintError> for PostFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Accepts `YYYY-MM-DDTHH:MM` from a datetime-local input and plain
/// `YYYY-MM-DD`, which means midnight.
fn parse_pub_date(value: &str) -> Result<NaiveDateTime, PostFormError> {
    let value = value.trim();
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }
    Err(PostFormError::InvalidPubDate(value.to_string()))
}

fn parse_optional_id(value: Option<&str>, field: &'static str) -> Result<Option<i32>, PostFormError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<i32>()
            .map(Some)
            .map_err(|_| PostFormError::InvalidId(format!("{field}: {raw}"))),
    }
}

impl TryFrom<&PostForm> for PostFormPayload {
    type Error = PostFormError;

    fn try_from(value: &PostForm) -> Result<Self, Self::Error> {
        let category_id = parse_optional_id(
            value.category_id.as_ref().map(|t| t.as_str()),
            "category_id",
        )?
        .map(CategoryId::new)
        .transpose()?;
        let location_id = parse_optional_id(
            value.location_id.as_ref().map(|t| t.as_str()),
            "location_id",
        )?
        .map(LocationId::new)
        .transpose()?;

        Ok(Self {
            title: PostTitle::new(value.title.as_str())?,
            body: PostBody::new(value.body.as_str())?,
            pub_date: parse_pub_date(&value.pub_date)?,
            category_id,
            location_id,
            is_published: value.is_published.is_some(),
        })
    }
}
