use chrono::Utc;

use crate::auth::AuthenticatedUser;
use crate::domain::comment::Comment;
use crate::domain::types::{CommentId, PostId};
use crate::dto::posts::CommentDto;
use crate::forms::comments::CommentFormPayload;
use crate::repository::{CommentReader, CommentWriter, PostReader};

use super::{ServiceError, ServiceResult};

/// Attach a comment to a post the user can see. Returns the post id for
/// the redirect back to the detail page.
pub fn add_comment<R>(
    post_id: i32,
    payload: CommentFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<PostId>
where
    R: PostReader + CommentWriter,
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
    if !post.is_visible_to(Some(user.user_id()), now) {
        return Err(ServiceError::NotFound);
    }

    match repo.create_comment(&payload.into_new_comment(post.id, user.user_id())) {
        Ok(_) => Ok(post.id),
        Err(e) => {
            log::error!("Failed to create comment: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// The comment loaded for the edit form, restricted to moderators.
pub fn show_comment_for_edit<R>(
    post_id: i32,
    comment_id: i32,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<CommentDto>
where
    R: CommentReader,
{
    let comment = moderated_comment(post_id, comment_id, user, repo)?;
    Ok(comment.into())
}

/// Replace a comment's text. Allowed for its author and for superusers.
pub fn update_comment<R>(
    post_id: i32,
    comment_id: i32,
    payload: CommentFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<PostId>
where
    R: CommentReader + CommentWriter,
{
    let comment = moderated_comment(post_id, comment_id, user, repo)?;

    match repo.update_comment(comment.id, &payload.body) {
        Ok(_) => Ok(comment.post_id),
        Err(e) => {
            log::error!("Failed to update comment: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Delete a comment. Allowed for its author and for superusers.
pub fn delete_comment<R>(
    post_id: i32,
    comment_id: i32,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<PostId>
where
    R: CommentReader + CommentWriter,
{
    let comment = moderated_comment(post_id, comment_id, user, repo)?;

    match repo.delete_comment(comment.id) {
        Ok(_) => Ok(comment.post_id),
        Err(e) => {
            log::error!("Failed to delete comment: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Load a comment under its post and enforce the moderation rule:
/// only the comment's author or a superuser may change it.
fn moderated_comment<R>(
    post_id: i32,
    comment_id: i32,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Comment>
where
    R: CommentReader,
{
    let comment_id = match CommentId::new(comment_id) {
        Ok(comment_id) => comment_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    let comment = match repo.get_comment_by_id(comment_id) {
        Ok(Some(comment)) => comment,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get comment: {e}");
            return Err(ServiceError::Internal);
        }
    };

    // The URL nests comments under their post; a mismatched pair is a dead link.
    if comment.post_id.get() != post_id {
        return Err(ServiceError::NotFound);
    }

    if comment.author_id != user.user_id() && !user.is_superuser {
        return Err(ServiceError::Unauthorized);
    }

    Ok(comment)
}
