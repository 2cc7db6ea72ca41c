use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{PageQuery, base_context, render_template};
use crate::services::ServiceError;
use crate::services::main::{show_category as show_category_service, show_index as show_index_service};

#[get("/")]
pub async fn index(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    match show_index_service(query.page(), server_config.posts_per_page, repo.get_ref()) {
        Ok(posts) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "index");
            context.insert("posts", &posts);
            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render index page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/category/{slug}")]
pub async fn category_posts(
    slug: web::Path<String>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    match show_category_service(
        &slug,
        query.page(),
        server_config.posts_per_page,
        repo.get_ref(),
    ) {
        Ok((category, posts)) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "category");
            context.insert("category", &category);
            context.insert("posts", &posts);
            render_template(&tera, "main/category.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render category page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
