use crate::orm::{messages, topics};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use std::time::Duration;

/// Opens the database URL and makes sure the board tables exist.
pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url.to_owned());

    // SQLite serializes writers anyway, and an in-memory database only lives
    // as long as its single connection.
    if database_url.starts_with("sqlite:") {
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(100).min_connections(5);
    }
    opt.connect_timeout(Duration::from_secs(8)).sqlx_logging(false);

    let db = Database::connect(opt).await?;
    create_schema(&db).await?;

    Ok(db)
}

/// Creates the topic and message tables if they are missing.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    // Order matters, messages reference topics.
    let mut tables = [
        schema.create_table_from_entity(topics::Entity),
        schema.create_table_from_entity(messages::Entity),
    ];

    for table in tables.iter_mut() {
        table.if_not_exists();
        db.execute(backend.build(&*table)).await?;
    }

    Ok(())
}
