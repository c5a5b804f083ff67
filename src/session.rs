use actix_session::Session;
use actix_web::cookie::{time::Duration, Cookie};
use actix_web::Error;
use chrono::{DateTime, TimeZone, Utc};

/// Session key holding the unix time at which the client entered the board password.
pub const AUTHENTICATED_KEY: &str = "authenticated_at";
/// Login lasts this long before the password must be entered again.
pub const SESSION_TTL_DAYS: i64 = 1;

/// Browser cookie remembering the last display name used on a form.
pub const USERNAME_COOKIE: &str = "username";
pub const USERNAME_COOKIE_DAYS: i64 = 30;

pub fn session_ttl() -> Duration {
    Duration::days(SESSION_TTL_DAYS)
}

pub fn is_authenticated(session: &Session) -> bool {
    is_authenticated_at(session, Utc::now())
}

/// True if the session logged in no longer than `session_ttl()` before `now`.
/// Stale logins are dropped from the session.
pub fn is_authenticated_at(session: &Session, now: DateTime<Utc>) -> bool {
    let logged_in_at = match session.get::<i64>(AUTHENTICATED_KEY) {
        Ok(Some(ts)) => match Utc.timestamp_opt(ts, 0).single() {
            Some(at) => at,
            None => return false,
        },
        Ok(None) => return false,
        Err(e) => {
            log::warn!("is_authenticated: unreadable session: {}", e);
            return false;
        }
    };

    let age = now.signed_duration_since(logged_in_at);
    if age > chrono::Duration::seconds(session_ttl().whole_seconds()) {
        log::debug!("is_authenticated: login from {} has expired", logged_in_at);
        session.remove(AUTHENTICATED_KEY);
        return false;
    }

    true
}

/// Marks the session as logged in. The session id is renewed on privilege change.
pub fn authenticate(session: &Session) -> Result<(), Error> {
    session.renew();
    session.insert(AUTHENTICATED_KEY, Utc::now().timestamp())?;
    Ok(())
}

/// Drops every value in the session and expires the cookie.
pub fn clear(session: &Session) {
    session.purge();
}

/// The value is percent-encoded; request cookies are decoded when read back.
pub fn username_cookie(name: &str) -> Cookie<'static> {
    let encoded: String = url::form_urlencoded::byte_serialize(name.as_bytes()).collect();
    // Form encoding writes spaces as '+', which cookie decoding leaves alone.
    Cookie::build(USERNAME_COOKIE, encoded.replace('+', "%20"))
        .path("/")
        .max_age(Duration::days(USERNAME_COOKIE_DAYS))
        .http_only(true)
        .finish()
}
