use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::category::Category;
use crate::domain::comment::{Comment, NewComment};
use crate::domain::location::Location;
use crate::domain::post::{NewPost, Post, UpdatePost};
use crate::domain::types::{
    CategoryId, CommentBody, CommentId, EmailAddress, PostId, UserId, Username,
};
use crate::domain::user::{NewUser, User};
use crate::pagination::Pagination;
use crate::repository::errors::RepositoryResult;

pub mod category;
pub mod comment;
pub mod errors;
pub mod location;
pub mod post;
pub mod user;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing posts.
#[derive(Debug, Clone, Default)]
pub struct PostListQuery {
    /// Restrict to posts written by this author.
    pub author_id: Option<UserId>,
    /// Restrict to posts filed under this category.
    pub category_id: Option<CategoryId>,
    /// When set, keep only posts published at the given moment: visible
    /// flag set, publication date passed, category (if any) visible.
    pub published_at: Option<NaiveDateTime>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl PostListQuery {
    pub fn author(mut self, author_id: UserId) -> Self {
        self.author_id = Some(author_id);
        self
    }
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn published_at(mut self, now: NaiveDateTime) -> Self {
        self.published_at = Some(now);
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for user accounts.
pub trait UserReader {
    /// Retrieve a user by its identifier.
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    /// Retrieve a user by login name.
    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
    /// Retrieve a user by email address.
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
}

/// Write operations for user accounts.
pub trait UserWriter {
    /// Persist a new account and return it with its assigned id.
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;
    /// Update the editable profile fields of an account.
    fn update_user_profile(
        &self,
        id: UserId,
        username: &Username,
        email: &EmailAddress,
        first_name: &str,
        last_name: &str,
    ) -> RepositoryResult<usize>;
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List visible categories ordered by title.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by slug regardless of visibility.
    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;
}

/// Read-only operations for location entities.
pub trait LocationReader {
    /// List visible locations ordered by name.
    fn list_locations(&self) -> RepositoryResult<Vec<Location>>;
}

/// Read-only operations for posts.
pub trait PostReader {
    /// List posts matching the supplied query, newest publication first.
    /// Returns the total number of matches alongside the requested page.
    fn list_posts(&self, query: PostListQuery) -> RepositoryResult<(usize, Vec<Post>)>;
    /// Retrieve a post by its identifier regardless of visibility.
    fn get_post_by_id(&self, id: PostId) -> RepositoryResult<Option<Post>>;
}

/// Write operations for posts.
pub trait PostWriter {
    /// Persist a new post and return its assigned identifier.
    fn create_post(&self, post: &NewPost) -> RepositoryResult<PostId>;
    /// Apply an edit to an existing post.
    fn update_post(&self, id: PostId, update: &UpdatePost) -> RepositoryResult<usize>;
    /// Delete a post; its comments go with it.
    fn delete_post(&self, id: PostId) -> RepositoryResult<usize>;
}

/// Read-only operations for comments.
pub trait CommentReader {
    /// List a post's comments in creation order.
    fn list_comments(&self, post_id: PostId) -> RepositoryResult<Vec<Comment>>;
    /// Retrieve a comment by its identifier.
    fn get_comment_by_id(&self, id: CommentId) -> RepositoryResult<Option<Comment>>;
}

/// Write operations for comments.
pub trait CommentWriter {
    /// Persist a new comment.
    fn create_comment(&self, comment: &NewComment) -> RepositoryResult<usize>;
    /// Replace the text of an existing comment.
    fn update_comment(&self, id: CommentId, body: &CommentBody) -> RepositoryResult<usize>;
    /// Delete a comment.
    fn delete_comment(&self, id: CommentId) -> RepositoryResult<usize>;
}
