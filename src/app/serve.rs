use std::time::Duration;

use axum::{
    body::Body,
    extract::Request as AxumRequest,
    http::{HeaderName, Request, Response},
    middleware, ServiceExt,
};
use tower::{Layer, ServiceBuilder};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    normalize_path::NormalizePathLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{MakeSpan, OnRequest, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::{
    web::{midware, routes::routes, REQUEST_ID_HEADER},
    App,
};

/// Serves the application until the listener fails.
///
/// Wraps the routes with request ids, a `TraceLayer` for console logging and the
/// response mapper that shapes error bodies. Trailing slashes are trimmed before
/// routing, so `/subscribers/` is served like `/subscribers`.
pub async fn serve(app: App) -> Result<(), ServeError> {
    let App {
        app_state,
        listener,
    } = app;
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let router = routes(app_state).layer(
        ServiceBuilder::new()
            // Set UUID per request
            .layer(SetRequestIdLayer::new(
                x_request_id.clone(),
                MakeRequestUuid,
            ))
            .layer(build_trace_layer())
            // Responses travel the stack bottom up, so the mapper runs before
            // the request id gets copied onto the response.
            .layer(middleware::map_response(midware::response_mapper))
            // Propagate UUID to response
            .layer(PropagateRequestIdLayer::new(x_request_id)),
    );

    // Has to wrap the router from the outside, `Router::layer` runs after route matching.
    let router = NormalizePathLayer::trim_trailing_slash().layer(router);
    axum::serve(listener, ServiceExt::<AxumRequest>::into_make_service(router)).await?;

    Ok(())
}

/// Sets up the `tower_http::TraceLayer` tracing configuration.
fn build_trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl MakeSpan<Body> + Clone,
    impl OnRequest<Body> + Clone,
    impl OnResponse<Body> + Clone,
> {
    TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            let uuid = req
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|uuid| uuid.to_str().ok())
                .unwrap_or_default()
                .to_string();

            tracing::error_span!(
                "serve",
                id = uuid,
                method = req.method().to_string(),
                path = req.uri().path()
            )
        })
        .on_request(|req: &Request<Body>, _s: &Span| tracing::info!("START @ {}", req.uri()))
        .on_response(|res: &Response<Body>, latency: Duration, _s: &Span| {
            let st_code = res.status().as_u16();

            if (500..=599).contains(&st_code) {
                tracing::error!("END in: {:?} - STATUS: {st_code}", latency)
            } else if (400..=499).contains(&st_code) {
                tracing::warn!("END in: {:?} - STATUS: {st_code}", latency)
            } else {
                tracing::info!("END in: {:?} - STATUS: {st_code}", latency)
            }
        })
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("io error while serving: {0}")]
    Io(#[from] std::io::Error),
}
