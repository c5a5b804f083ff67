use crate::flash::{push_flash, FlashLevel};
use crate::message::get_message_page;
use crate::middleware::ClientCtx;
use crate::orm::{messages, topics};
use crate::pagination::Pagination;
use crate::session::username_cookie;
use crate::topic::{create_topic, get_topic, get_topic_page, NewTopic};
use crate::ugc::{clean_optional, clean_required, NAME_MAX_LEN, TITLE_MAX_LEN};
use actix_session::Session;
use actix_web::http::header;
use actix_web::{error, get, post, web, Error, HttpResponse};
use askama_actix::{Template, TemplateToResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_index)
        .service(view_topics)
        .service(view_topics_page)
        .service(view_new_topic)
        .service(create_topic_post)
        .service(view_topic)
        .service(view_topic_page);
}

#[derive(Template)]
#[template(path = "topics.html")]
pub struct TopicListTemplate {
    pub client: ClientCtx,
    pub topics: Vec<topics::Model>,
    pub pagination: Pagination,
}

#[derive(Template)]
#[template(path = "topic.html")]
pub struct TopicTemplate {
    pub client: ClientCtx,
    pub topic: topics::Model,
    pub messages: Vec<messages::Model>,
    pub pagination: Pagination,
    /// Default for the name field of the reply form.
    pub username: String,
}

#[derive(Template)]
#[template(path = "new_topic.html")]
pub struct NewTopicTemplate {
    pub client: ClientCtx,
    pub title: String,
    pub username: String,
}

#[derive(Deserialize)]
pub struct NewTopicFormData {
    pub title: Option<String>,
    pub username: Option<String>,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[get("/")]
async fn view_index(
    client: ClientCtx,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, Error> {
    render_topic_list(client, &db, 1).await
}

#[get("/topics")]
async fn view_topics(
    client: ClientCtx,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, Error> {
    render_topic_list(client, &db, 1).await
}

#[get("/topics/{page:\\d+}")]
async fn view_topics_page(
    client: ClientCtx,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, Error> {
    render_topic_list(client, &db, path.into_inner()).await
}

#[get("/topic/new")]
async fn view_new_topic(client: ClientCtx) -> HttpResponse {
    let username = client.saved_username();
    NewTopicTemplate {
        client,
        title: String::new(),
        username,
    }
    .to_response()
}

#[post("/topic/new")]
async fn create_topic_post(
    client: ClientCtx,
    session: Session,
    db: web::Data<DatabaseConnection>,
    form: web::Form<NewTopicFormData>,
) -> Result<HttpResponse, Error> {
    let form = form.into_inner();
    let author = clean_optional(form.username.as_deref(), NAME_MAX_LEN);

    let title = match clean_required(form.title.as_deref().unwrap_or_default(), TITLE_MAX_LEN) {
        Some(title) => title,
        None => {
            push_flash(&session, FlashLevel::Error, "Topic title cannot be empty")?;
            return Ok(NewTopicTemplate {
                client,
                title: String::new(),
                username: form.username.unwrap_or_default(),
            }
            .to_response());
        }
    };

    let topic = create_topic(
        &db,
        NewTopic {
            title,
            author: author.to_owned(),
        },
    )
    .await
    .map_err(|e| {
        log::error!("create_topic_post: {}", e);
        error::ErrorInternalServerError("Could not create topic.")
    })?;
    log::info!("create_topic_post: created topic {}", topic.id);

    push_flash(&session, FlashLevel::Success, "Topic created")?;

    let mut res = HttpResponse::Found();
    res.append_header((header::LOCATION, format!("/topic/{}", topic.id)));
    if let Some(author) = author {
        res.cookie(username_cookie(&author));
    }
    Ok(res.finish())
}

#[get("/topic/{topic_id:\\d+}")]
async fn view_topic(
    client: ClientCtx,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, Error> {
    let page = query
        .into_inner()
        .page
        .and_then(|p| p.parse::<i32>().ok())
        .unwrap_or(1);
    render_topic(client, &db, path.into_inner(), page).await
}

#[get("/topic/{topic_id:\\d+}/{page:\\d+}")]
async fn view_topic_page(
    client: ClientCtx,
    db: web::Data<DatabaseConnection>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse, Error> {
    let (topic_id, page) = path.into_inner();
    render_topic(client, &db, topic_id, page).await
}

async fn render_topic_list(
    client: ClientCtx,
    db: &DatabaseConnection,
    page: i32,
) -> Result<HttpResponse, Error> {
    let (topics, pagination) = get_topic_page(db, page)
        .await
        .map_err(|e| {
            log::error!("render_topic_list: {}", e);
            error::ErrorInternalServerError("Could not load topics.")
        })?
        .ok_or_else(|| error::ErrorNotFound("Page not found."))?;

    Ok(TopicListTemplate {
        client,
        topics,
        pagination,
    }
    .to_response())
}

async fn render_topic(
    client: ClientCtx,
    db: &DatabaseConnection,
    topic_id: i32,
    page: i32,
) -> Result<HttpResponse, Error> {
    let topic = get_topic(db, topic_id)
        .await
        .map_err(|e| {
            log::error!("render_topic: {}", e);
            error::ErrorInternalServerError("Could not load topic.")
        })?
        .ok_or_else(|| error::ErrorNotFound("Topic not found."))?;

    let (messages, pagination) = get_message_page(db, topic.id, page)
        .await
        .map_err(|e| {
            log::error!("render_topic: {}", e);
            error::ErrorInternalServerError("Could not load messages.")
        })?
        .ok_or_else(|| error::ErrorNotFound("Page not found."))?;

    let username = client.saved_username();
    Ok(TopicTemplate {
        client,
        topic,
        messages,
        pagination,
        username,
    }
    .to_response())
}
