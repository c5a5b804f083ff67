//! Shared-password gate and post-login redirect targets.

use argon2::password_hash::{PasswordHash, PasswordVerifier};
use argon2::Argon2;

/// Checks a submitted password against the configured board password.
/// The configured value may be an Argon2 PHC string instead of plain text.
pub fn verify_board_password(configured: &str, submitted: &str) -> bool {
    if configured.starts_with("$argon2") {
        match PasswordHash::new(configured) {
            Ok(hash) => Argon2::default()
                .verify_password(submitted.as_bytes(), &hash)
                .is_ok(),
            Err(e) => {
                log::error!("verify_board_password: BOARD_PASSWORD hash is malformed: {}", e);
                false
            }
        }
    } else {
        configured == submitted
    }
}

/// Returns the redirect target if it stays on this site, otherwise the index.
pub fn local_redirect_target(next: Option<&str>) -> String {
    match next {
        Some(next)
            if next.starts_with('/') && !next.starts_with("//") && !next.starts_with("/\\") =>
        {
            next.to_owned()
        }
        _ => "/".to_owned(),
    }
}

/// Login page URL which returns the client to `target` afterwards.
pub fn login_url_for(target: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    // Slashes are legal in a query string and keep the URL readable.
    format!("/login?next={}", encoded.replace("%2F", "/"))
}
