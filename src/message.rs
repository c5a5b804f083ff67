use crate::orm::messages;
use crate::pagination::Pagination;
use crate::ugc::{truncate_chars, CONTENT_MAX_LEN, NAME_MAX_LEN};
use chrono::prelude::Utc;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, PaginatorTrait};

pub const MESSAGES_PER_PAGE: i32 = 10;

/// Fields accepted for a new message, already cleaned.
pub struct NewMessage {
    pub topic_id: i32,
    pub content: String,
    pub username: Option<String>,
}

/// Inserts a message stamped with the current server time.
/// The owning topic must exist.
pub async fn create_message(
    db: &DatabaseConnection,
    message: NewMessage,
) -> Result<messages::Model, DbErr> {
    messages::ActiveModel {
        topic_id: Set(message.topic_id),
        content: Set(truncate_chars(&message.content, CONTENT_MAX_LEN)),
        username: Set(message.username.map(|u| truncate_chars(&u, NAME_MAX_LEN))),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn count_messages(db: &DatabaseConnection, topic_id: i32) -> Result<usize, DbErr> {
    messages::Entity::find()
        .filter(messages::Column::TopicId.eq(topic_id))
        .count(db)
        .await
}

/// Returns one page of a topic's messages, newest first.
/// None if the page does not exist.
pub async fn get_message_page(
    db: &DatabaseConnection,
    topic_id: i32,
    page: i32,
) -> Result<Option<(Vec<messages::Model>, Pagination)>, DbErr> {
    let total = count_messages(db, topic_id).await? as i32;
    let pagination = Pagination::new(
        format!("/topic/{}", topic_id),
        page,
        MESSAGES_PER_PAGE,
        total,
    );

    if !Pagination::is_valid_page(page, pagination.total_pages) {
        return Ok(None);
    }

    let messages = messages::Entity::find()
        .filter(messages::Column::TopicId.eq(topic_id))
        .order_by_desc(messages::Column::Id)
        .paginate(db, MESSAGES_PER_PAGE as usize)
        .fetch_page(pagination.page_index())
        .await?;

    Ok(Some((messages, pagination)))
}
