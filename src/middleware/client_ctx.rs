use crate::flash::{take_flashes, Flash};
use crate::session::{is_authenticated, USERNAME_COOKIE};
use actix_session::{Session, SessionExt};
use actix_utils::future::{ok, Ready};
use actix_web::dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{FutureExt as _, LocalBoxFuture};
use std::time::{Duration, Instant};
use std::{cell::RefCell, rc::Rc};

/// Client data stored for a single request cycle.
#[derive(Clone)]
pub struct ClientCtxInner {
    pub session: Option<Session>,
    pub authenticated: bool,
    /// Display name remembered from an earlier post.
    pub saved_username: Option<String>,
    /// Flashes pulled from the session, once something asks for them.
    pub flashes: Option<Vec<Flash>>,
    pub request_start: Instant,
}

impl ClientCtxInner {
    fn new() -> Self {
        Self {
            session: None,
            authenticated: false,
            saved_username: None,
            flashes: None,
            request_start: Instant::now(),
        }
    }

    fn from_request(req: &HttpRequest) -> Self {
        let session = req.get_session();
        Self {
            authenticated: is_authenticated(&session),
            saved_username: req
                .cookie(USERNAME_COOKIE)
                .map(|c| c.value().to_owned())
                .filter(|v| !v.is_empty()),
            session: Some(session),
            ..Self::new()
        }
    }
}

/// Client context passed to routes and templates.
/// Wraps ClientCtxInner, which is set at the beginning of the request.
#[derive(Clone)]
pub struct ClientCtx(Rc<RefCell<ClientCtxInner>>);

impl Default for ClientCtx {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(ClientCtxInner::new())))
    }
}

impl ClientCtx {
    /// Context of the request, created on first use.
    pub fn for_request(req: &HttpRequest) -> Self {
        let existing = req.extensions().get::<Rc<RefCell<ClientCtxInner>>>().cloned();
        match existing {
            // Existing record in extensions; pull it.
            Some(inner) => Self(inner),
            // No existing record; create and insert it.
            None => {
                let inner = Rc::new(RefCell::new(ClientCtxInner::from_request(req)));
                req.extensions_mut().insert(inner.clone());
                Self(inner)
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.borrow().authenticated
    }

    /// Default value for name fields on forms.
    pub fn saved_username(&self) -> String {
        self.0.borrow().saved_username.to_owned().unwrap_or_default()
    }

    /// Flashes queued for this client. The session copy is consumed on first call,
    /// later calls in the same request see the same list.
    pub fn flashes(&self) -> Vec<Flash> {
        let mut inner = self.0.borrow_mut();
        if inner.flashes.is_none() {
            let flashes = match &inner.session {
                Some(session) => take_flashes(session),
                None => Vec::new(),
            };
            inner.flashes = Some(flashes);
        }
        inner.flashes.to_owned().unwrap_or_default()
    }

    /// Returns Duration representing request time.
    pub fn request_time(&self) -> Duration {
        Instant::now() - self.0.borrow().request_start
    }

    /// Returns human readable representing request time.
    pub fn request_time_as_string(&self) -> String {
        let us = self.request_time().as_micros();
        if us > 5000 {
            format!("{}ms", us / 1000)
        } else {
            format!("{}μs", us)
        }
    }
}

/// This implementation is what actually provides the `client: ClientCtx` in the parameters of route functions.
impl FromRequest for ClientCtx {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ok(ClientCtx::for_request(req))
    }
}

impl<S, B> Transform<S, ServiceRequest> for ClientCtx
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = ClientCtxMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ClientCtxMiddleware { service })
    }
}

/// Client context middleware
pub struct ClientCtxMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ClientCtxMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Starts the request clock and reads the session before any route sees it.
        let ctx = ClientCtx::for_request(req.request());
        let fut = self.service.call(req);

        async move {
            let res = fut.await?;
            log::debug!("request served in {}", ctx.request_time_as_string());
            Ok(res)
        }
        .boxed_local()
    }
}
