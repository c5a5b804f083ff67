use crate::flash::{push_flash, FlashLevel};
use crate::message::{create_message, NewMessage};
use crate::session::username_cookie;
use crate::topic::get_topic;
use crate::ugc::{clean_optional, clean_required, CONTENT_MAX_LEN, NAME_MAX_LEN};
use actix_session::Session;
use actix_web::http::header;
use actix_web::{error, post, web, Error, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(create_message_post);
}

#[derive(Deserialize)]
pub struct NewMessageFormData {
    pub content: Option<String>,
    pub username: Option<String>,
}

#[post("/topic/{topic_id:\\d+}/message")]
async fn create_message_post(
    session: Session,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    form: web::Form<NewMessageFormData>,
) -> Result<HttpResponse, Error> {
    let topic = get_topic(&db, path.into_inner())
        .await
        .map_err(|e| {
            log::error!("create_message_post: {}", e);
            error::ErrorInternalServerError("Could not load topic.")
        })?
        .ok_or_else(|| error::ErrorNotFound("Topic not found."))?;

    let form = form.into_inner();
    let topic_url = format!("/topic/{}", topic.id);

    let content = match clean_required(form.content.as_deref().unwrap_or_default(), CONTENT_MAX_LEN) {
        Some(content) => content,
        None => {
            push_flash(&session, FlashLevel::Error, "Message cannot be empty")?;
            return Ok(HttpResponse::Found()
                .append_header((header::LOCATION, topic_url))
                .finish());
        }
    };
    let username = clean_optional(form.username.as_deref(), NAME_MAX_LEN);

    create_message(
        &db,
        NewMessage {
            topic_id: topic.id,
            content,
            username: username.to_owned(),
        },
    )
    .await
    .map_err(|e| {
        log::error!("create_message_post: {}", e);
        error::ErrorInternalServerError("Could not post message.")
    })?;

    push_flash(&session, FlashLevel::Success, "Message posted")?;

    let mut res = HttpResponse::Found();
    res.append_header((header::LOCATION, topic_url));
    if let Some(username) = username {
        res.cookie(username_cookie(&username));
    }
    Ok(res.finish())
}
