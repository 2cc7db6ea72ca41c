use crate::auth::{hash_password, verify_password};
use crate::domain::user::User;
use crate::forms::auth::{LoginFormPayload, SignupFormPayload};
use crate::repository::{UserReader, UserWriter};

use super::{ServiceError, ServiceResult};

/// Register a new account. Username and email must be unused.
pub fn register<R>(payload: SignupFormPayload, repo: &R) -> ServiceResult<User>
where
    R: UserReader + UserWriter,
{
    match repo.get_user_by_username(payload.username.as_str()) {
        Ok(Some(_)) => {
            return Err(ServiceError::Form(
                "Имя пользователя уже занято.".to_string(),
            ));
        }
        Ok(None) => {}
        Err(e) => {
            log::error!("Failed to check username: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.get_user_by_email(payload.email.as_str()) {
        Ok(Some(_)) => {
            return Err(ServiceError::Form(
                "Эта почта уже зарегистрирована.".to_string(),
            ));
        }
        Ok(None) => {}
        Err(e) => {
            log::error!("Failed to check email: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(e) => {
            log::error!("Failed to hash password: {e}");
            return Err(ServiceError::Internal);
        }
    };

    match repo.create_user(&payload.into_new_user(password_hash)) {
        Ok(user) => Ok(user),
        // Lost the race against a concurrent signup with the same name.
        Err(e) if e.is_unique_violation() => Err(ServiceError::Form(
            "Имя пользователя или почта уже заняты.".to_string(),
        )),
        Err(e) => {
            log::error!("Failed to create user: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Check credentials and return the account to start a session for.
///
/// Unknown usernames and wrong passwords produce the same message so the
/// login form does not leak which accounts exist.
pub fn login<R>(payload: LoginFormPayload, repo: &R) -> ServiceResult<User>
where
    R: UserReader,
{
    const BAD_CREDENTIALS: &str = "Неверное имя пользователя или пароль.";

    let user = match repo.get_user_by_username(payload.username.as_str()) {
        Ok(Some(user)) => user,
        Ok(None) => return Err(ServiceError::Form(BAD_CREDENTIALS.to_string())),
        Err(e) => {
            log::error!("Failed to get user by username: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(ServiceError::Form(BAD_CREDENTIALS.to_string()));
    }

    Ok(user)
}
