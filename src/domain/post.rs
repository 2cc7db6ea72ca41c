use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, CategorySlug, CategoryTitle, ImageFileName, LocationId, LocationName, PostBody,
    PostId, PostTitle, UserId, Username,
};

/// Category attributes carried on a post after the join.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostCategory {
    pub id: CategoryId,
    pub title: CategoryTitle,
    pub slug: CategorySlug,
    pub is_published: bool,
}

/// A blog entry together with the author/category/location attributes
/// resolved by the repository join and the number of comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub body: PostBody,
    pub image: Option<ImageFileName>,
    /// Scheduled publication moment; a future value hides the post.
    pub pub_date: NaiveDateTime,
    pub author_id: UserId,
    pub author: Username,
    pub location_id: Option<LocationId>,
    pub location: Option<LocationName>,
    pub category: Option<PostCategory>,
    pub is_published: bool,
    pub created_at: NaiveDateTime,
    pub comment_count: i64,
}

impl Post {
    /// Whether the post is publicly visible at `now`.
    ///
    /// A post is published when its own flag is set, its publication moment
    /// has passed and its category (when present) is not hidden.
    pub fn is_published_at(&self, now: NaiveDateTime) -> bool {
        self.is_published
            && self.pub_date <= now
            && self.category.as_ref().is_none_or(|c| c.is_published)
    }

    /// Whether `viewer` may open the post's detail page at `now`.
    pub fn is_visible_to(&self, viewer: Option<UserId>, now: NaiveDateTime) -> bool {
        self.is_published_at(now) || viewer == Some(self.author_id)
    }
}

/// Information required to create a new [`Post`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPost {
    pub title: PostTitle,
    pub body: PostBody,
    pub image: Option<ImageFileName>,
    pub pub_date: NaiveDateTime,
    pub author_id: UserId,
    pub location_id: Option<LocationId>,
    pub category_id: Option<CategoryId>,
    pub is_published: bool,
}

/// Field values applied when editing an existing [`Post`].
///
/// `image: None` keeps the stored image untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdatePost {
    pub title: PostTitle,
    pub body: PostBody,
    pub image: Option<ImageFileName>,
    pub pub_date: NaiveDateTime,
    pub location_id: Option<LocationId>,
    pub category_id: Option<CategoryId>,
    pub is_published: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn sample_post(is_published: bool, pub_offset_secs: i64) -> Post {
        let now = DateTime::from_timestamp(1_000_000, 0).unwrap().naive_utc();
        Post {
            id: PostId::new(1).unwrap(),
            title: PostTitle::new("title").unwrap(),
            body: PostBody::new("body").unwrap(),
            image: None,
            pub_date: now + chrono::Duration::seconds(pub_offset_secs),
            author_id: UserId::new(7).unwrap(),
            author: Username::new("author").unwrap(),
            location_id: None,
            location: None,
            category: None,
            is_published,
            created_at: now,
            comment_count: 0,
        }
    }

    fn now() -> NaiveDateTime {
        DateTime::from_timestamp(1_000_000, 0).unwrap().naive_utc()
    }

    #[test]
    fn published_post_is_visible_to_anyone() {
        let post = sample_post(true, -60);
        assert!(post.is_visible_to(None, now()));
    }

    #[test]
    fn scheduled_post_is_hidden_until_pub_date() {
        let post = sample_post(true, 3600);
        assert!(!post.is_published_at(now()));
        assert!(post.is_visible_to(Some(UserId::new(7).unwrap()), now()));
        assert!(!post.is_visible_to(Some(UserId::new(8).unwrap()), now()));
    }

    #[test]
    fn hidden_category_unpublishes_the_post() {
        let mut post = sample_post(true, -60);
        post.category = Some(PostCategory {
            id: CategoryId::new(1).unwrap(),
            title: CategoryTitle::new("Travel").unwrap(),
            slug: CategorySlug::new("travel").unwrap(),
            is_published: false,
        });
        assert!(!post.is_published_at(now()));
    }
}
