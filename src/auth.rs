//! Session authentication: the logged-in user extractor and password
//! hashing. Credentials are hashed with Argon2id and stored in PHC string
//! format; the session cookie carries only the user id.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::types::UserId;
use crate::domain::user::User;
use crate::repository::{DieselRepository, UserReader};

/// The requesting user, resolved from the identity cookie on every request.
///
/// Extracting this type guards a handler: requests without a valid session
/// are redirected to the login page. Use `Option<AuthenticatedUser>` on
/// pages that anonymous visitors may open.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub is_superuser: bool,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> UserId {
        UserId::new(self.id).expect("session carries a persisted user id")
    }
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        let name = user.display_name();
        Self {
            id: user.id.get(),
            username: user.username.into_inner(),
            email: user.email.into_inner(),
            name,
            first_name: user.first_name,
            last_name: user.last_name,
            is_superuser: user.is_superuser,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication required")]
    NotAuthenticated,
    #[error("internal error")]
    Internal,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotAuthenticated => StatusCode::SEE_OTHER,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::NotAuthenticated => HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/auth/login"))
                .finish(),
            Self::Internal => HttpResponse::InternalServerError().finish(),
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let result = resolve_user(req, payload);
        ready(result.map_err(Into::into))
    }
}

fn resolve_user(req: &HttpRequest, payload: &mut Payload) -> Result<AuthenticatedUser, AuthError> {
    let identity = Identity::from_request(req, payload)
        .into_inner()
        .map_err(|_| AuthError::NotAuthenticated)?;

    let user_id = identity
        .id()
        .ok()
        .and_then(|id| id.parse::<i32>().ok())
        .and_then(|id| UserId::new(id).ok())
        .ok_or(AuthError::NotAuthenticated)?;

    let repo = req
        .app_data::<web::Data<DieselRepository>>()
        .ok_or(AuthError::Internal)?;

    match repo.get_user_by_id(user_id) {
        Ok(Some(user)) => Ok(user.into()),
        // Stale cookie referencing a removed account.
        Ok(None) => Err(AuthError::NotAuthenticated),
        Err(e) => {
            log::error!("Failed to load user for session: {e}");
            Err(AuthError::Internal)
        }
    }
}

/// Hash a password with Argon2id and a random per-password salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC-format hash.
///
/// A malformed stored hash counts as a mismatch rather than an error so a
/// corrupted row cannot lock the login route into a 500.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
