use crate::session;
use actix_session::Session;
use actix_web::http::header;
use actix_web::{get, HttpResponse};

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_logout);
}

#[get("/logout")]
pub async fn view_logout(cookies: Session) -> HttpResponse {
    session::clear(&cookies);

    HttpResponse::Found()
        .append_header((header::LOCATION, "/login"))
        .finish()
}
