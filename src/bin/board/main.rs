use actix_session::config::PersistentSession;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use env_logger::Env;
use topicboard::config::BoardConfig;
use topicboard::db::init_db;
use topicboard::middleware::ClientCtx;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_lib_mods();

    let config = BoardConfig::from_env()?;
    let db = init_db(&config.database_url).await.with_context(|| {
        format!(
            "Database connection to {} was not established",
            config.database_url
        )
    })?;
    log::info!("Database ready at {}", config.database_url);

    let secret_key = Key::derive_from(config.secret_key.as_bytes());
    let bind_addr = config.bind_addr.to_owned();
    let db = Data::new(db);
    let config = Data::new(config);

    log::info!("Listening on {}", bind_addr);
    HttpServer::new(move || {
        // Order of middleware IS IMPORTANT and is in REVERSE EXECUTION ORDER.
        App::new()
            .app_data(db.clone())
            .app_data(config.clone())
            .wrap(topicboard::web::error::error_handlers())
            .wrap(ClientCtx::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .session_lifecycle(
                        PersistentSession::default()
                            .session_ttl(topicboard::session::session_ttl()),
                    )
                    .build(),
            )
            .wrap(Logger::new("%a %r %s %{User-Agent}i"))
            .configure(topicboard::web::configure)
    })
    // GET    view_ (read/view/render entity)
    // POST   create_ (apply form)
    .bind(&bind_addr)
    .with_context(|| format!("Could not bind {}", bind_addr))?
    .run()
    .await?;

    Ok(())
}

/// Initialize third party crates we rely on but don't have control over.
pub fn init_lib_mods() {
    // A missing .env is fine, the environment may already be populated.
    if let Err(e) = dotenv::dotenv() {
        eprintln!("No .env loaded: {}", e);
    }
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}
