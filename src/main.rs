use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use tera::Tera;

use chronicle::db::establish_connection_pool;
use chronicle::models::config::ServerConfig;
use chronicle::repository::DieselRepository;
use chronicle::routes::{auth, comments, main as main_routes, posts, profile};

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("CHRONICLE"))
        .build()?
        .try_deserialize()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let server_config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let secret_key = if server_config.secret_key.is_empty() {
        log::warn!("No secret key configured; sessions will not survive a restart");
        Key::generate()
    } else if server_config.secret_key.len() < 32 {
        log::error!("secret_key must be at least 32 bytes long");
        std::process::exit(1);
    } else {
        Key::derive_from(server_config.secret_key.as_bytes())
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database pool: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let tera = match Tera::new("templates/**/*.html") {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("Failed to load templates: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = std::fs::create_dir_all(&server_config.media_root) {
        log::error!("Failed to create media directory: {e}");
        std::process::exit(1);
    }

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let bind_address = (server_config.host.clone(), server_config.port);
    let media_root = server_config.media_root.clone();

    log::info!("Starting server on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                secret_key.clone(),
            ))
            .wrap(message_framework.clone())
            .wrap(Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .app_data(web::Data::new(tera.clone()))
            .service(main_routes::index)
            .service(main_routes::category_posts)
            // Literal segments are registered ahead of their `{id}` siblings.
            .service(posts::create_post_form)
            .service(posts::create_post)
            .service(posts::show_post)
            .service(posts::update_post_form)
            .service(posts::update_post)
            .service(posts::delete_post)
            .service(comments::add_comment)
            .service(comments::update_comment_form)
            .service(comments::update_comment)
            .service(comments::delete_comment)
            .service(profile::update_profile_form)
            .service(profile::update_profile)
            .service(profile::show_profile)
            .service(auth::signup_form)
            .service(auth::signup)
            .service(auth::login_form)
            .service(auth::login)
            .service(auth::logout)
            .service(Files::new("/media", media_root.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
