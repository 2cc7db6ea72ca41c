use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::post::{
    NewPost as DomainNewPost, Post as DomainPost, PostCategory, UpdatePost as DomainUpdatePost,
};
use crate::domain::types::{
    CategorySlug, CategoryTitle, ImageFileName, LocationName, PostBody, PostTitle,
    TypeConstraintError, Username,
};
use crate::models::category::Category;
use crate::models::location::Location;
use crate::models::user::User;

/// Diesel model representing the `posts` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::posts)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub pub_date: NaiveDateTime,
    pub author_id: i32,
    pub location_id: Option<i32>,
    pub category_id: Option<i32>,
    pub is_published: bool,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Post`]. `created_at` is filled by the database.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::posts)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub pub_date: NaiveDateTime,
    pub author_id: i32,
    pub location_id: Option<i32>,
    pub category_id: Option<i32>,
    pub is_published: bool,
}

/// Changeset applied when editing a post.
///
/// `image` uses a nested option so that `None` leaves the stored file name
/// untouched while category/location can be reset to NULL.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::posts)]
pub struct PostChangeset {
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub pub_date: NaiveDateTime,
    pub location_id: Option<Option<i32>>,
    pub category_id: Option<Option<i32>>,
    pub is_published: bool,
}

/// Row shape produced by the listing join:
/// post, author, optional category, optional location, comment count.
pub type PostJoinRow = (Post, User, Option<Category>, Option<Location>);

impl DomainPost {
    /// Assemble a domain post from a join row and its comment count.
    pub fn from_join_row(row: PostJoinRow, comment_count: i64) -> Result<Self, TypeConstraintError> {
        let (post, author, category, location) = row;
        let category = category
            .map(|c| {
                Ok::<_, TypeConstraintError>(PostCategory {
                    id: c.id.try_into()?,
                    title: CategoryTitle::new(c.title)?,
                    slug: CategorySlug::new(c.slug)?,
                    is_published: c.is_published,
                })
            })
            .transpose()?;

        Ok(Self {
            id: post.id.try_into()?,
            title: PostTitle::new(post.title)?,
            body: PostBody::new(post.body)?,
            image: post.image.map(ImageFileName::new).transpose()?,
            pub_date: post.pub_date,
            author_id: post.author_id.try_into()?,
            author: Username::new(author.username)?,
            location_id: post.location_id.map(TryInto::try_into).transpose()?,
            location: location.map(|l| LocationName::new(l.name)).transpose()?,
            category,
            is_published: post.is_published,
            created_at: post.created_at,
            comment_count,
        })
    }
}

impl From<DomainNewPost> for NewPost {
    fn from(post: DomainNewPost) -> Self {
        Self {
            title: post.title.into_inner(),
            body: post.body.into_inner(),
            image: post.image.map(ImageFileName::into_inner),
            pub_date: post.pub_date,
            author_id: post.author_id.get(),
            location_id: post.location_id.map(|id| id.get()),
            category_id: post.category_id.map(|id| id.get()),
            is_published: post.is_published,
        }
    }
}

impl From<DomainUpdatePost> for PostChangeset {
    fn from(post: DomainUpdatePost) -> Self {
        Self {
            title: post.title.into_inner(),
            body: post.body.into_inner(),
            image: post.image.map(ImageFileName::into_inner),
            pub_date: post.pub_date,
            location_id: Some(post.location_id.map(|id| id.get())),
            category_id: Some(post.category_id.map(|id| id.get())),
            is_published: post.is_published,
        }
    }
}
