use crate::auth::login_url_for;
use crate::session::is_authenticated;
use actix_session::SessionExt;
use actix_utils::future::{ok, Ready};
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpResponse};
use futures_util::future::{FutureExt as _, LocalBoxFuture};

/// Sends clients without an authenticated session to the login page,
/// remembering where they were headed.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequireLogin;

impl<S, B> Transform<S, ServiceRequest> for RequireLogin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequireLoginMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RequireLoginMiddleware { service })
    }
}

pub struct RequireLoginMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireLoginMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_authenticated(&req.get_session()) {
            let fut = self.service.call(req);
            return async move { Ok(fut.await?.map_into_left_body()) }.boxed_local();
        }

        let target = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_owned())
            .unwrap_or_else(|| req.path().to_owned());
        log::debug!("RequireLogin: unauthenticated request for {}", target);

        let (httpreq, _payload) = req.into_parts();
        let res = HttpResponse::Found()
            .insert_header((header::LOCATION, login_url_for(&target)))
            .finish()
            .map_into_right_body();

        async move { Ok(ServiceResponse::new(httpreq, res)) }.boxed_local()
    }
}
