use serde::Serialize;

use crate::domain::category::Category;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub slug: String,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            title: value.title.into_inner(),
            description: value.description.into_inner(),
            slug: value.slug.into_inner(),
        }
    }
}
