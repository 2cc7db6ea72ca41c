use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::comment::Comment;
use crate::domain::post::Post;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostDto {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub pub_date: NaiveDateTime,
    pub author: String,
    pub author_id: i32,
    pub location: Option<String>,
    pub category_title: Option<String>,
    pub category_slug: Option<String>,
    pub is_published: bool,
    pub comment_count: i64,
}

impl From<Post> for PostDto {
    fn from(value: Post) -> Self {
        Self {
            id: value.id.get(),
            title: value.title.into_inner(),
            body: value.body.into_inner(),
            image: value.image.map(|i| i.into_inner()),
            pub_date: value.pub_date,
            author: value.author.into_inner(),
            author_id: value.author_id.get(),
            location: value.location.map(|l| l.into_inner()),
            category_title: value
                .category
                .as_ref()
                .map(|c| c.title.as_str().to_string()),
            category_slug: value.category.map(|c| c.slug.into_inner()),
            is_published: value.is_published,
            comment_count: value.comment_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommentDto {
    pub id: i32,
    pub post_id: i32,
    pub author: String,
    pub author_id: i32,
    pub body: String,
    pub created_at: NaiveDateTime,
}

impl From<Comment> for CommentDto {
    fn from(value: Comment) -> Self {
        Self {
            id: value.id.get(),
            post_id: value.post_id.get(),
            author: value.author.into_inner(),
            author_id: value.author_id.get(),
            body: value.body.into_inner(),
            created_at: value.created_at,
        }
    }
}
