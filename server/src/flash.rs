use actix_session::{
    config::CookieContentSecurity, storage::CookieSessionStore, Session, SessionMiddleware,
};
use actix_web::cookie::Key;
use serde::{Deserialize, Serialize};

const FLASH_KEY: &str = "_flashes";

/// A notice shown once on the next rendered page.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Flash {
    pub category: String,
    pub message: String,
}

pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(false)
        .cookie_content_security(CookieContentSecurity::Private)
        .build()
}

pub fn push(session: &Session, category: &str, message: impl Into<String>) {
    let mut pending = session
        .get::<Vec<Flash>>(FLASH_KEY)
        .ok()
        .flatten()
        .unwrap_or_default();
    pending.push(Flash {
        category: category.to_string(),
        message: message.into(),
    });
    if let Err(e) = session.insert(FLASH_KEY, &pending) {
        log::warn!("could not store flash message: {e}");
    }
}

/// Drain pending messages. Each message is returned by exactly one call.
pub fn take(session: &Session) -> Vec<Flash> {
    session
        .remove_as::<Vec<Flash>>(FLASH_KEY)
        .and_then(Result::ok)
        .unwrap_or_default()
}
