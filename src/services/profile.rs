use chrono::Utc;

use crate::auth::AuthenticatedUser;
use crate::dto::posts::PostDto;
use crate::dto::users::ProfileDto;
use crate::forms::profile::ProfileUpdateFormPayload;
use crate::pagination::Paginated;
use crate::repository::{PostListQuery, PostReader, UserReader, UserWriter};

use super::{ServiceError, ServiceResult};

/// An author page: profile card plus their posts, newest first.
///
/// The owner sees all of their posts including drafts and scheduled ones;
/// everyone else gets the published subset.
pub fn show_profile<R>(
    username: &str,
    viewer: Option<&AuthenticatedUser>,
    page: usize,
    per_page: usize,
    repo: &R,
) -> ServiceResult<(ProfileDto, Paginated<PostDto>)>
where
    R: UserReader + PostReader,
{
    let user = match repo.get_user_by_username(username) {
        Ok(Some(user)) => user,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get user by username: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let is_owner = viewer.is_some_and(|v| v.id == user.id.get());

    let mut query = PostListQuery::default()
        .author(user.id)
        .paginate(page, per_page);
    if !is_owner {
        query = query.published_at(Utc::now().naive_utc());
    }

    let posts = match repo.list_posts(query) {
        Ok((total, posts)) => Paginated::new(
            posts.into_iter().map(PostDto::from).collect(),
            page,
            total.div_ceil(per_page),
        ),
        Err(e) => {
            log::error!("Failed to list profile posts: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok((user.into(), posts))
}

/// Update the logged-in user's own profile fields.
pub fn update_profile<R>(
    payload: ProfileUpdateFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<bool>
where
    R: UserReader + UserWriter,
{
    match repo.get_user_by_username(payload.username.as_str()) {
        Ok(Some(existing)) if existing.id.get() != user.id => {
            return Err(ServiceError::Form(
                "Имя пользователя уже занято.".to_string(),
            ));
        }
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to check username: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.get_user_by_email(payload.email.as_str()) {
        Ok(Some(existing)) if existing.id.get() != user.id => {
            return Err(ServiceError::Form(
                "Эта почта уже зарегистрирована.".to_string(),
            ));
        }
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to check email: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.update_user_profile(
        user.user_id(),
        &payload.username,
        &payload.email,
        &payload.first_name,
        &payload.last_name,
    ) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to update profile: {e}");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::Post;
    use crate::domain::types::{
        EmailAddress, PostBody, PostId, PostTitle, UserId, Username,
    };
    use crate::domain::user::User;
    use crate::repository::test::TestRepository;
    use chrono::Duration;

    fn sample_account(id: i32, username: &str) -> User {
        User {
            id: UserId::new(id).unwrap(),
            username: Username::new(username).unwrap(),
            email: EmailAddress::new(format!("{username}@example.com")).unwrap(),
            password_hash: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            is_superuser: false,
            created_at: Utc::now().naive_utc(),
        }
    }

    fn sample_viewer(id: i32, username: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            name: username.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            is_superuser: false,
        }
    }

    fn sample_post(id: i32, author_id: i32, is_published: bool) -> Post {
        let now = Utc::now().naive_utc();
        Post {
            id: PostId::new(id).unwrap(),
            title: PostTitle::new("title").unwrap(),
            body: PostBody::new("body").unwrap(),
            image: None,
            pub_date: now - Duration::hours(1),
            author_id: UserId::new(author_id).unwrap(),
            author: Username::new("writer").unwrap(),
            location_id: None,
            location: None,
            category: None,
            is_published,
            created_at: now,
            comment_count: 0,
        }
    }

    #[test]
    fn profile_of_unknown_user_is_not_found() {
        let repo = TestRepository::new();

        let err = show_profile("ghost", None, 1, 10, &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn visitors_see_only_published_posts() {
        let repo = TestRepository::new()
            .with_users(vec![sample_account(1, "writer")])
            .with_posts(vec![sample_post(1, 1, true), sample_post(2, 1, false)]);

        let (profile, page) = show_profile("writer", None, 1, 10, &repo).unwrap();
        assert_eq!(profile.username, "writer");
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn owner_sees_drafts_too() {
        let repo = TestRepository::new()
            .with_users(vec![sample_account(1, "writer")])
            .with_posts(vec![sample_post(1, 1, true), sample_post(2, 1, false)]);

        let viewer = sample_viewer(1, "writer");
        let (_, page) = show_profile("writer", Some(&viewer), 1, 10, &repo).unwrap();
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn taken_username_is_a_form_error() {
        let repo = TestRepository::new()
            .with_users(vec![sample_account(1, "writer"), sample_account(2, "anna")]);

        let payload = ProfileUpdateFormPayload {
            username: Username::new("anna").unwrap(),
            email: EmailAddress::new("writer@example.com").unwrap(),
            first_name: String::new(),
            last_name: String::new(),
        };

        let err = update_profile(payload, &sample_viewer(1, "writer"), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::Form(_)));
    }

    #[test]
    fn keeping_own_username_is_allowed() {
        let repo = TestRepository::new().with_users(vec![sample_account(1, "writer")]);

        let payload = ProfileUpdateFormPayload {
            username: Username::new("writer").unwrap(),
            email: EmailAddress::new("writer@example.com").unwrap(),
            first_name: "Ivan".to_string(),
            last_name: String::new(),
        };

        assert!(update_profile(payload, &sample_viewer(1, "writer"), &repo).unwrap());
    }
}
