use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::profile::{ProfileUpdateForm, ProfileUpdateFormPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{PageQuery, base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::profile::{
    show_profile as show_profile_service, update_profile as update_profile_service,
};

// Registered before `show_profile` so the literal segment wins over
// `{username}`.
#[get("/profile/edit")]
pub async fn update_profile_form(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, Some(&user), "profile_edit");
    context.insert("profile", &user);
    render_template(&tera, "profile/edit.html", &context)
}

#[post("/profile/edit")]
pub async fn update_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ProfileUpdateForm>,
) -> impl Responder {
    let payload: ProfileUpdateFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/profile/edit");
        }
    };

    let username = payload.username.to_string();

    match update_profile_service(payload, &user, repo.get_ref()) {
        Ok(true) => FlashMessage::success("Профиль обновлён.").send(),
        Ok(false) => {
            FlashMessage::error("Ошибка при обновлении профиля.").send();
            return redirect("/profile/edit");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            return redirect("/profile/edit");
        }
        Err(err) => {
            log::error!("Failed to update profile: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&format!("/profile/{username}"))
}

#[get("/profile/{username}")]
pub async fn show_profile(
    username: web::Path<String>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    match show_profile_service(
        &username,
        user.as_ref(),
        query.page(),
        server_config.posts_per_page,
        repo.get_ref(),
    ) {
        Ok((profile, posts)) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "profile");
            context.insert("profile", &profile);
            context.insert("posts", &posts);
            render_template(&tera, "profile/show.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render profile page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
