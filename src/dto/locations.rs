use serde::Serialize;

use crate::domain::location::Location;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationDto {
    pub id: i32,
    pub name: String,
}

impl From<Location> for LocationDto {
    fn from(value: Location) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
        }
    }
}
