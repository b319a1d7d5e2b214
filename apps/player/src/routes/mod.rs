//! Route table and dispatch.
//!
//! Every route is a `(method, path, action)` row. All actions share one
//! handler, `player::handle`, which runs the per-action protocol. Unmatched
//! requests, including known paths with the wrong method, get a 404.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use actix_web::http::Method;
use actix_web::{web, HttpResponse};
use futures_util::FutureExt;
use tracing::error;

use crate::action::Action;
use crate::errors::ErrorBody;
use crate::state::AppState;

pub mod player;

pub struct Route {
    pub method: Method,
    pub path: &'static str,
    pub action: Action,
}

pub static ROUTES: [Route; 6] = [
    Route {
        method: Method::POST,
        path: "/api/player/start-game",
        action: Action::StartGame,
    },
    Route {
        method: Method::POST,
        path: "/api/player/speak",
        action: Action::Speak,
    },
    Route {
        method: Method::POST,
        path: "/api/player/vote",
        action: Action::Vote,
    },
    Route {
        method: Method::POST,
        path: "/api/player/use-ability",
        action: Action::UseAbility,
    },
    Route {
        method: Method::POST,
        path: "/api/player/last-words",
        action: Action::LastWords,
    },
    Route {
        method: Method::POST,
        path: "/api/player/status",
        action: Action::Status,
    },
];

pub fn configure(cfg: &mut web::ServiceConfig) {
    for route in &ROUTES {
        let action = route.action;
        cfg.service(
            web::resource(route.path)
                .route(web::method(route.method.clone()).to(
                    move |state: web::Data<AppState>, payload: web::Payload| {
                        dispatch(action, state, payload)
                    },
                ))
                .default_service(web::to(not_found)),
        );
    }
    cfg.default_service(web::to(not_found));
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new("Not found"))
}

pub fn internal_server_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorBody::new("Internal server error"))
}

/// Runs one action handler. A panic anywhere inside it is a defect of this
/// layer and is answered with a generic 500.
async fn dispatch(action: Action, state: web::Data<AppState>, payload: web::Payload) -> HttpResponse {
    match AssertUnwindSafe(player::handle(action, state, payload))
        .catch_unwind()
        .await
    {
        Ok(response) => response,
        Err(panic) => {
            error!(
                action = action.name(),
                panic = %panic_message(panic.as_ref()),
                "handler panicked"
            );
            internal_server_error()
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
