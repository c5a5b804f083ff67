mod client_ctx;
mod require_login;

pub use client_ctx::ClientCtx;
pub use require_login::RequireLogin;

// Documentation for middleware can be found here:
// https://github.com/actix/actix-web/blob/master/src/middleware/normalize.rs
