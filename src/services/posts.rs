use chrono::Utc;

use crate::auth::AuthenticatedUser;
use crate::domain::types::{ImageFileName, PostId};
use crate::dto::categories::CategoryDto;
use crate::dto::locations::LocationDto;
use crate::dto::posts::{CommentDto, PostDto};
use crate::forms::posts::PostFormPayload;
use crate::repository::{CategoryReader, CommentReader, LocationReader, PostReader, PostWriter};

use super::{ServiceError, ServiceResult};

/// A post detail page: the post plus its comments in creation order.
///
/// Published posts are public; an unpublished or scheduled post is only
/// shown to its author and yields `NotFound` for everyone else.
pub fn show_post<R>(
    post_id: i32,
    viewer: Option<&AuthenticatedUser>,
    repo: &R,
) -> ServiceResult<(PostDto, Vec<CommentDto>)>
where
    R: PostReader + CommentReader,
{
    let post_id = match PostId::new(post_id) {
        Ok(post_id) => post_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    let post = match repo.get_post_by_id(post_id) {
        Ok(Some(post)) => post,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get post: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let now = Utc::now().naive_utc();
    if !post.is_visible_to(viewer.map(|v| v.user_id()), now) {
        return Err(ServiceError::NotFound);
    }

    let comments = match repo.list_comments(post.id) {
        Ok(comments) => comments.into_iter().map(CommentDto::from).collect(),
        Err(e) => {
            log::error!("Failed to list comments: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok((post.into(), comments))
}

/// Select options for the post create/edit form.
pub fn show_post_form<R>(repo: &R) -> ServiceResult<(Vec<CategoryDto>, Vec<LocationDto>)>
where
    R: CategoryReader + LocationReader,
{
    let categories = match repo.list_categories() {
        Ok(categories) => categories.into_iter().map(CategoryDto::from).collect(),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let locations = match repo.list_locations() {
        Ok(locations) => locations.into_iter().map(LocationDto::from).collect(),
        Err(e) => {
            log::error!("Failed to list locations: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok((categories, locations))
}

/// Create a post on behalf of the logged-in user.
pub fn create_post<R>(
    payload: PostFormPayload,
    image: Option<ImageFileName>,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<PostId>
where
    R: PostWriter,
{
    let post = payload.into_new_post(user.user_id(), image);
    match repo.create_post(&post) {
        Ok(id) => Ok(id),
        Err(e) => {
            log::error!("Failed to create post: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// The post loaded for the edit form, restricted to its author.
pub fn show_post_for_edit<R>(
    post_id: i32,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<PostDto>
where
    R: PostReader,
{
    let post = author_checked_post(post_id, user, repo)?;
    Ok(post.into())
}

/// Apply an edit; only the author may change a post.
pub fn update_post<R>(
    post_id: i32,
    payload: PostFormPayload,
    image: Option<ImageFileName>,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<PostId>
where
    R: PostReader + PostWriter,
{
    let post = author_checked_post(post_id, user, repo)?;

    match repo.update_post(post.id, &payload.into_update_post(image)) {
        Ok(_) => Ok(post.id),
        Err(e) => {
            log::error!("Failed to update post: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Delete a post; only the author may remove it. Comments cascade away.
pub fn delete_post<R>(post_id: i32, user: &AuthenticatedUser, repo: &R) -> ServiceResult<()>
where
    R: PostReader + PostWriter,
{
    let post = author_checked_post(post_id, user, repo)?;

    match repo.delete_post(post.id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete post: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn author_checked_post<R>(
    post_id: i32,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<crate::domain::post::Post>
where
    R: PostReader,
{
    let post_id = match PostId::new(post_id) {
        Ok(post_id) => post_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    let post = match repo.get_post_by_id(post_id) {
        Ok(Some(post)) => post,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get post: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if post.author_id != user.user_id() {
        return Err(ServiceError::Unauthorized);
    }

    Ok(post)
}
