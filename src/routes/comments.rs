use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::comments::{CommentForm, CommentFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::comments::{
    add_comment as add_comment_service, delete_comment as delete_comment_service,
    show_comment_for_edit as show_comment_for_edit_service,
    update_comment as update_comment_service,
};

#[post("/posts/{post_id}/comment")]
pub async fn add_comment(
    post_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<CommentForm>,
) -> impl Responder {
    let post_id = post_id.into_inner();

    let payload: CommentFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&format!("/posts/{post_id}"));
        }
    };

    match add_comment_service(post_id, payload, &user, repo.get_ref()) {
        Ok(_) => FlashMessage::success("Комментарий добавлен.").send(),
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to add comment: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&format!("/posts/{post_id}"))
}

#[get("/posts/{post_id}/comments/{comment_id}/edit")]
pub async fn update_comment_form(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (post_id, comment_id) = path.into_inner();

    match show_comment_for_edit_service(post_id, comment_id, &user, repo.get_ref()) {
        Ok(comment) => {
            let mut context = base_context(&flash_messages, Some(&user), "comment_edit");
            context.insert("comment", &comment);
            render_template(&tera, "comments/form.html", &context)
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Forbidden().finish(),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render comment form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/posts/{post_id}/comments/{comment_id}/edit")]
pub async fn update_comment(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<CommentForm>,
) -> impl Responder {
    let (post_id, comment_id) = path.into_inner();

    let payload: CommentFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&format!("/posts/{post_id}/comments/{comment_id}/edit"));
        }
    };

    match update_comment_service(post_id, comment_id, payload, &user, repo.get_ref()) {
        Ok(_) => FlashMessage::success("Комментарий обновлён.").send(),
        Err(ServiceError::Unauthorized) => return HttpResponse::Forbidden().finish(),
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to update comment: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&format!("/posts/{post_id}"))
}

#[post("/posts/{post_id}/comments/{comment_id}/delete")]
pub async fn delete_comment(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (post_id, comment_id) = path.into_inner();

    match delete_comment_service(post_id, comment_id, &user, repo.get_ref()) {
        Ok(_) => FlashMessage::success("Комментарий удалён.").send(),
        Err(ServiceError::Unauthorized) => return HttpResponse::Forbidden().finish(),
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to delete comment: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&format!("/posts/{post_id}"))
}
