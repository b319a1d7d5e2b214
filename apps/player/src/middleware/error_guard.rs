//! Last line of defense for the dispatcher.
//!
//! Handlers classify their own failures and always answer with a response.
//! A response that still carries an actix error (a failed extractor, for
//! instance) is replaced by a 500 `Internal server error` JSON body.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error as ActixError;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::error;

use crate::routes::internal_server_error;

pub struct ErrorGuard;

impl<S, B> Transform<S, ServiceRequest> for ErrorGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type InitError = ();
    type Transform = ErrorGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorGuardMiddleware { service }))
    }
}

pub struct ErrorGuardMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ErrorGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // The router needs sole ownership of the request, so nothing may keep
        // a handle to it while the inner service runs.
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            if let Some(err) = res.response().error() {
                error!(error = %err, path = %res.request().path(), "error escaped handler");
                let req = res.request().clone();
                return Ok(ServiceResponse::new(req, internal_server_error()).map_into_right_body());
            }
            Ok(res.map_into_left_body())
        })
    }
}
