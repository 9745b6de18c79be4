use std::sync::Arc;

use axum::{
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::web::{log, Error, REQUEST_ID_HEADER};

/// Turns an `Error` stashed in the response extensions into the `{ "message": ... }`
/// body the client sees, and logs every request.
pub async fn response_mapper(
    req_method: Method,
    uri: Uri,
    headers: HeaderMap,
    resp: Response,
) -> Response {
    let req_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|id| id.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let web_error = resp.extensions().get::<Arc<Error>>().map(|er| &**er);
    let client_status_and_error = web_error.map(Error::status_code_and_client_error);

    log::log_request(
        &req_id,
        &req_method,
        &uri,
        client_status_and_error
            .as_ref()
            .map(|(status, _)| *status)
            .unwrap_or(resp.status()),
        web_error,
        client_status_and_error.as_ref().map(|(_, ce)| ce),
    );

    match client_status_and_error {
        Some((status, client_error)) => {
            let client_error_body = json!({ "message": client_error.to_string() });
            (status, Json(client_error_body)).into_response()
        }
        None => resp,
    }
}
