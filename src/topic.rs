use crate::orm::topics;
use crate::pagination::Pagination;
use crate::ugc::{truncate_chars, NAME_MAX_LEN, TITLE_MAX_LEN};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, PaginatorTrait};

pub const TOPICS_PER_PAGE: i32 = 20;

/// Fields accepted for a new topic, already cleaned.
pub struct NewTopic {
    pub title: String,
    pub author: Option<String>,
}

pub async fn create_topic(db: &DatabaseConnection, topic: NewTopic) -> Result<topics::Model, DbErr> {
    topics::ActiveModel {
        title: Set(truncate_chars(&topic.title, TITLE_MAX_LEN)),
        author: Set(topic.author.map(|a| truncate_chars(&a, NAME_MAX_LEN))),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn get_topic(db: &DatabaseConnection, id: i32) -> Result<Option<topics::Model>, DbErr> {
    topics::Entity::find_by_id(id).one(db).await
}

/// Returns one page of topics, newest first.
/// None if the page does not exist.
pub async fn get_topic_page(
    db: &DatabaseConnection,
    page: i32,
) -> Result<Option<(Vec<topics::Model>, Pagination)>, DbErr> {
    let total = topics::Entity::find().count(db).await? as i32;
    let pagination = Pagination::new("/topics", page, TOPICS_PER_PAGE, total);

    if !Pagination::is_valid_page(page, pagination.total_pages) {
        return Ok(None);
    }

    let topics = topics::Entity::find()
        .order_by_desc(topics::Column::Id)
        .paginate(db, TOPICS_PER_PAGE as usize)
        .fetch_page(pagination.page_index())
        .await?;

    Ok(Some((topics, pagination)))
}

/// Removes a topic. Its messages go with it through the foreign key cascade.
/// Returns false if no such topic existed.
pub async fn delete_topic(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    let res = topics::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
