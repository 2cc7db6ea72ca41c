use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{LocationId, LocationName};

/// A place a post can be tagged with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: LocationName,
    pub is_published: bool,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Location`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewLocation {
    pub name: LocationName,
    pub is_published: bool,
}
