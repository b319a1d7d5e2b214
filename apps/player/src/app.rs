//! Application assembly shared by the binary and the integration tests.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};

use crate::middleware::{ErrorGuard, PermissiveCors, StructuredLogger};
use crate::routes;
use crate::state::AppState;

/// Builds the player app around `data`.
///
/// `PermissiveCors` is registered last so it runs first: preflights are
/// answered before logging or routing, and every other response, including
/// the ones `ErrorGuard` rewrites, leaves with the allow headers attached.
pub fn build_app(
    data: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(ErrorGuard)
        .wrap(StructuredLogger)
        .wrap(PermissiveCors)
        .app_data(data)
        .configure(routes::configure)
}
