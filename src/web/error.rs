use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use strum_macros::AsRefStr;

use super::types::DataParsingError;
use crate::model::StoreError;

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("No ID provided")]
    MissingId,
    #[error("Subscriber not found")]
    SubscriberNotFound,
    #[error("Error - Route not found")]
    RouteNotFound,
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error(transparent)]
    DataParsing(#[from] DataParsingError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("templating error: {0}")]
    Tera(#[from] tera::Error),
}

impl Error {
    /// Wraps an extractor rejection. Oversized bodies keep their 413, every other
    /// unreadable path or body is a 400.
    pub fn rejected(status: StatusCode, message: String) -> Self {
        let status = match status {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        Error::Rejected { status, message }
    }

    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::Rejected { status, message } => (*status, InvalidInput(message.clone())),
            Error::MissingId
            | Error::DataParsing(_)
            | Error::Store(_) => (StatusCode::BAD_REQUEST, InvalidInput(self.to_string())),
            Error::SubscriberNotFound | Error::RouteNotFound => {
                (StatusCode::NOT_FOUND, NotFound(self.to_string()))
            }
            Error::Tera(_) => (StatusCode::INTERNAL_SERVER_ERROR, ServiceError),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        let (status, _) = self.status_code_and_client_error();
        let mut res = status.into_response();

        // Insert the Error into response so that the response mapper can build the client body.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// The part of an `Error` the client gets to see.
#[derive(Debug, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("{_0}")]
    InvalidInput(String),
    #[display("{_0}")]
    NotFound(String),
    #[display("Service Error!")]
    ServiceError,
}
