pub mod error;
mod login;
mod logout;
mod message;
mod topic;

use crate::middleware::RequireLogin;

/// Configures the web app. Everything but login and logout sits behind `RequireLogin`.
///
/// @see https://docs.rs/actix-web/4.0.1/actix_web/struct.App.html#method.configure
pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    login::configure(conf);
    logout::configure(conf);

    conf.service(
        actix_web::web::scope("")
            .wrap(RequireLogin)
            .configure(topic::configure)
            .configure(message::configure),
    );
}
