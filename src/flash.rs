//! One-shot notices carried in the session until the next rendered page.

use actix_session::Session;
use actix_web::Error;
use serde::{Deserialize, Serialize};

const FLASH_KEY: &str = "_flashes";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Error,
    Success,
}

impl FlashLevel {
    /// CSS class and label for templates.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Error => "error",
            FlashLevel::Success => "success",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Queues a flash for the next page this client renders.
pub fn push_flash(session: &Session, level: FlashLevel, message: &str) -> Result<(), Error> {
    let mut flashes = peek_flashes(session);
    flashes.push(Flash {
        level,
        message: message.to_owned(),
    });
    session.insert(FLASH_KEY, flashes)?;
    Ok(())
}

/// Removes and returns all queued flashes.
pub fn take_flashes(session: &Session) -> Vec<Flash> {
    match session.remove_as::<Vec<Flash>>(FLASH_KEY) {
        Some(Ok(flashes)) => flashes,
        Some(Err(raw)) => {
            log::warn!("take_flashes: discarding unreadable flashes {}", raw);
            Vec::new()
        }
        None => Vec::new(),
    }
}

fn peek_flashes(session: &Session) -> Vec<Flash> {
    session
        .get::<Vec<Flash>>(FLASH_KEY)
        .ok()
        .flatten()
        .unwrap_or_default()
}
