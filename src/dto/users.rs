use serde::Serialize;

use crate::domain::user::User;

/// Public profile card of an author.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfileDto {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<User> for ProfileDto {
    fn from(value: User) -> Self {
        let name = value.display_name();
        Self {
            id: value.id.get(),
            username: value.username.into_inner(),
            name,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email.into_inner(),
        }
    }
}
