//! Request body types for the subscriber routes and their validation.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header::CONTENT_TYPE, request::Parts, StatusCode},
    Form, Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{model::NewSubscriber, web::Error};

// ###################################
// ->   STRUCTS
// ###################################
/// Deserializable Subscriber
/// The fields as they arrive in a request body, any of them may be missing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeserSubscriber {
    pub name: Option<String>,
    pub subscribed_channel: Option<String>,
}

/// Validated Subscriber
/// Both fields are present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubscriber {
    pub name: String,
    pub subscribed_channel: String,
}

impl TryFrom<DeserSubscriber> for ValidSubscriber {
    type Error = DataParsingError;

    fn try_from(deser_sub: DeserSubscriber) -> Result<Self, Self::Error> {
        match (non_empty(deser_sub.name), non_empty(deser_sub.subscribed_channel)) {
            (Some(name), Some(subscribed_channel)) => Ok(ValidSubscriber {
                name,
                subscribed_channel,
            }),
            _ => Err(DataParsingError::MissingNameOrChannel),
        }
    }
}

impl ValidSubscriber {
    /// Validation for creating a subscriber under a caller supplied id.
    /// Reports the id as part of the missing fields.
    pub fn try_with_id(id: &str, deser_sub: DeserSubscriber) -> Result<Self, DataParsingError> {
        if id.is_empty() {
            return Err(DataParsingError::MissingIdNameOrChannel);
        }
        Self::try_from(deser_sub).map_err(|_| DataParsingError::MissingIdNameOrChannel)
    }

    pub fn into_new_subscriber(self, id: Option<String>) -> NewSubscriber {
        NewSubscriber {
            id,
            name: self.name,
            subscribed_channel: self.subscribed_channel,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ###################################
// ->   EXTRACTORS
// ###################################
/// Extracts a `DeserSubscriber` from a JSON or URL-encoded body.
/// Any other content type, an empty body or a JSON value that isn't an object
/// yields a subscriber with no fields.
#[derive(Debug, Default)]
pub struct SubscriberBody(pub DeserSubscriber);

impl<S> FromRequest<S> for SubscriberBody
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map(|ct| ct.to_ascii_lowercase())
            .unwrap_or_default();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(deser_sub) = Form::<DeserSubscriber>::from_request(req, state)
                .await
                .map_err(|rej| Error::rejected(rej.status(), rej.body_text()))?;
            return Ok(SubscriberBody(deser_sub));
        }

        if content_type.starts_with("application/json") {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|rej| Error::rejected(rej.status(), rej.body_text()))?;
            if bytes.is_empty() {
                return Ok(SubscriberBody::default());
            }
            let Json(value) = Json::<Value>::from_bytes(&bytes)
                .map_err(|rej| Error::rejected(rej.status(), rej.body_text()))?;

            return match value {
                Value::Object(_) => serde_json::from_value(value)
                    .map(SubscriberBody)
                    .map_err(|er| Error::rejected(StatusCode::BAD_REQUEST, er.to_string())),
                _ => Ok(SubscriberBody::default()),
            };
        }

        Ok(SubscriberBody::default())
    }
}

/// The `{id}` segment of a subscriber path.
/// Rejections go through `web::Error` so clients always get a JSON body.
#[derive(Debug)]
pub struct SubscriberId(pub String);

impl<S> FromRequestParts<S> for SubscriberId
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rej| Error::rejected(rej.status(), rej.body_text()))?;

        Ok(SubscriberId(id))
    }
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("Name and Subscribed Channel are required")]
    MissingNameOrChannel,
    #[error("ID, Name, and Subscribed Channel are required")]
    MissingIdNameOrChannel,
}
