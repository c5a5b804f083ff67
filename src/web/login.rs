use crate::auth::{local_redirect_target, verify_board_password};
use crate::config::BoardConfig;
use crate::flash::{push_flash, FlashLevel};
use crate::middleware::ClientCtx;
use crate::session::authenticate;
use actix_session::Session;
use actix_web::http::header;
use actix_web::{get, post, web, Error, HttpResponse};
use askama_actix::{Template, TemplateToResponse};
use serde::Deserialize;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_login).service(post_login);
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub client: ClientCtx,
    /// Where to go once logged in. Carried through the form.
    pub next: String,
}

#[derive(Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginFormData {
    pub password: Option<String>,
    pub next: Option<String>,
}

#[get("/login")]
pub async fn view_login(client: ClientCtx, query: web::Query<LoginQuery>) -> HttpResponse {
    LoginTemplate {
        client,
        next: query.into_inner().next.unwrap_or_default(),
    }
    .to_response()
}

#[post("/login")]
pub async fn post_login(
    client: ClientCtx,
    session: Session,
    config: web::Data<BoardConfig>,
    query: web::Query<LoginQuery>,
    form: web::Form<LoginFormData>,
) -> Result<HttpResponse, Error> {
    let form = form.into_inner();
    let next = form
        .next
        .filter(|n| !n.is_empty())
        .or_else(|| query.into_inner().next);
    let password = form.password.unwrap_or_default();

    if verify_board_password(&config.password, &password) {
        authenticate(&session)?;
        log::info!("post_login: client authenticated");
        return Ok(HttpResponse::Found()
            .append_header((header::LOCATION, local_redirect_target(next.as_deref())))
            .finish());
    }

    log::warn!("post_login: invalid password submitted");
    push_flash(&session, FlashLevel::Error, "Invalid password")?;

    Ok(LoginTemplate {
        client,
        next: next.unwrap_or_default(),
    }
    .to_response())
}
