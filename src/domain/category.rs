use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryDescription, CategoryId, CategorySlug, CategoryTitle};

/// A thematic rubric posts can be filed under. Hidden categories take their
/// posts off the public listings as well.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: CategoryTitle,
    pub description: CategoryDescription,
    pub slug: CategorySlug,
    pub is_published: bool,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub title: CategoryTitle,
    pub description: CategoryDescription,
    pub slug: CategorySlug,
    pub is_published: bool,
}
