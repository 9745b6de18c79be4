//! Contains all the routes that this application can handle.

mod home;
mod subscribers;

use axum::{http::StatusCode, routing::get, Router};

use crate::{
    web::{Error, WebResult},
    AppState,
};
use home::home;

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Answers every path or method nothing else handles.
async fn route_not_found() -> WebResult<()> {
    Err(Error::RouteNotFound)
}

/// All the routes of the server.
/// Each path carries its own fallback so an unsupported method is a 404 like an unknown path.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home).fallback(route_not_found))
        .route(
            "/subscribers",
            get(subscribers::list_subscribers)
                .post(subscribers::create_subscriber)
                .fallback(route_not_found),
        )
        .route(
            "/subscribers/names",
            get(subscribers::list_subscriber_names)
                .post(subscribers::create_subscriber_name)
                .fallback(route_not_found),
        )
        .route(
            "/subscribers/{id}",
            get(subscribers::get_subscriber)
                .post(subscribers::create_subscriber_with_id)
                .delete(subscribers::delete_subscriber)
                .fallback(route_not_found),
        )
        .route(
            "/health-check",
            get(health_check).fallback(route_not_found),
        )
        .fallback(route_not_found)
        .with_state(app_state)
}
