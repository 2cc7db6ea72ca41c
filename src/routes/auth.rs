use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::auth::{LoginForm, LoginFormPayload, SignupForm, SignupFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::auth::{login as login_service, register as register_service};

#[get("/auth/signup")]
pub async fn signup_form(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.is_some() {
        return redirect("/");
    }
    let context = base_context(&flash_messages, None, "signup");
    render_template(&tera, "auth/signup.html", &context)
}

#[post("/auth/signup")]
pub async fn signup(
    request: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SignupForm>,
) -> impl Responder {
    let payload: SignupFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/auth/signup");
        }
    };

    let user = match register_service(payload, repo.get_ref()) {
        Ok(user) => user,
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            return redirect("/auth/signup");
        }
        Err(err) => {
            log::error!("Failed to register user: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(e) = Identity::login(&request.extensions(), user.id.to_string()) {
        log::error!("Failed to start session after signup: {e}");
        return redirect("/auth/login");
    }

    FlashMessage::success("Добро пожаловать!").send();
    redirect("/")
}

#[get("/auth/login")]
pub async fn login_form(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.is_some() {
        return redirect("/");
    }
    let context = base_context(&flash_messages, None, "login");
    render_template(&tera, "auth/login.html", &context)
}

#[post("/auth/login")]
pub async fn login(
    request: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let payload: LoginFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/auth/login");
        }
    };

    let user = match login_service(payload, repo.get_ref()) {
        Ok(user) => user,
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            return redirect("/auth/login");
        }
        Err(err) => {
            log::error!("Failed to log user in: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(e) = Identity::login(&request.extensions(), user.id.to_string()) {
        log::error!("Failed to start session: {e}");
        return HttpResponse::InternalServerError().finish();
    }

    redirect("/")
}

#[post("/auth/logout")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
        FlashMessage::success("Вы вышли из аккаунта.").send();
    }
    redirect("/")
}
