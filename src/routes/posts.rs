use std::path::Path;

use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Utc;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::domain::types::ImageFileName;
use crate::forms::posts::{PostForm, PostFormPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::posts::{
    create_post as create_post_service, delete_post as delete_post_service,
    show_post as show_post_service, show_post_for_edit as show_post_for_edit_service,
    show_post_form as show_post_form_service, update_post as update_post_service,
};

#[get("/posts/{post_id}")]
pub async fn show_post(
    post_id: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_post_service(post_id.into_inner(), user.as_ref(), repo.get_ref()) {
        Ok((post, comments)) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "post_detail");
            context.insert("post", &post);
            context.insert("comments", &comments);
            render_template(&tera, "posts/detail.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render post page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/posts/create")]
pub async fn create_post_form(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_post_form_service(repo.get_ref()) {
        Ok((categories, locations)) => {
            let mut context = base_context(&flash_messages, Some(&user), "post_create");
            context.insert("categories", &categories);
            context.insert("locations", &locations);
            render_template(&tera, "posts/form.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render post form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/posts/create")]
pub async fn create_post(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(mut form): MultipartForm<PostForm>,
) -> impl Responder {
    let payload: PostFormPayload = match (&form).try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/posts/create");
        }
    };

    let image = match store_uploaded_image(form.image.take(), &server_config.media_root) {
        Ok(image) => image,
        Err(e) => {
            log::error!("Failed to store uploaded image: {e}");
            FlashMessage::error("Не удалось сохранить изображение.").send();
            return redirect("/posts/create");
        }
    };

    match create_post_service(payload, image, &user, repo.get_ref()) {
        Ok(_) => FlashMessage::success("Публикация добавлена.").send(),
        Err(err) => {
            log::error!("Failed to create post: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&format!("/profile/{}", user.username))
}

#[get("/posts/{post_id}/edit")]
pub async fn update_post_form(
    post_id: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let post_id = post_id.into_inner();

    let post = match show_post_for_edit_service(post_id, &user, repo.get_ref()) {
        Ok(post) => post,
        // Not the author: back to the detail page.
        Err(ServiceError::Unauthorized) => return redirect(&format!("/posts/{post_id}")),
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load post for edit: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match show_post_form_service(repo.get_ref()) {
        Ok((categories, locations)) => {
            let mut context = base_context(&flash_messages, Some(&user), "post_edit");
            context.insert("post", &post);
            context.insert("categories", &categories);
            context.insert("locations", &locations);
            render_template(&tera, "posts/form.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render post form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/posts/{post_id}/edit")]
pub async fn update_post(
    post_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(mut form): MultipartForm<PostForm>,
) -> impl Responder {
    let post_id = post_id.into_inner();

    let payload: PostFormPayload = match (&form).try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&format!("/posts/{post_id}/edit"));
        }
    };

    let image = match store_uploaded_image(form.image.take(), &server_config.media_root) {
        Ok(image) => image,
        Err(e) => {
            log::error!("Failed to store uploaded image: {e}");
            FlashMessage::error("Не удалось сохранить изображение.").send();
            return redirect(&format!("/posts/{post_id}/edit"));
        }
    };

    match update_post_service(post_id, payload, image, &user, repo.get_ref()) {
        Ok(_) => FlashMessage::success("Публикация обновлена.").send(),
        Err(ServiceError::Unauthorized) => return redirect(&format!("/posts/{post_id}")),
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to update post: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&format!("/posts/{post_id}"))
}

#[post("/posts/{post_id}/delete")]
pub async fn delete_post(
    post_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let post_id = post_id.into_inner();

    match delete_post_service(post_id, &user, repo.get_ref()) {
        Ok(()) => FlashMessage::success("Публикация удалена.").send(),
        Err(ServiceError::Unauthorized) => return redirect(&format!("/posts/{post_id}")),
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to delete post: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&format!("/profile/{}", user.username))
}

/// Persist an uploaded image under the media root.
///
/// Browsers send an empty file part when nothing was chosen; that case (and
/// a missing part) yields `Ok(None)` so the caller keeps the stored image.
fn store_uploaded_image(
    file: Option<TempFile>,
    media_root: &str,
) -> std::io::Result<Option<ImageFileName>> {
    let Some(file) = file else {
        return Ok(None);
    };

    let original = file.file_name.as_deref().unwrap_or("");
    if file.size == 0 || original.is_empty() {
        return Ok(None);
    }

    let sanitized = original
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>();
    let stored = format!("{}-{}", Utc::now().timestamp_millis(), sanitized);

    std::fs::create_dir_all(media_root)?;
    std::fs::copy(file.file.path(), Path::new(media_root).join(&stored))?;

    let image = ImageFileName::new(stored)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    Ok(Some(image))
}
