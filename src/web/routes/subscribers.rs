use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;

use crate::{
    model::{Subscriber, SubscriberName},
    web::{
        types::{SubscriberBody, SubscriberId, ValidSubscriber},
        Error, WebResult,
    },
    AppState,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedSubscriber {
    pub message: &'static str,
    pub deleted_subscriber: Subscriber,
}

// ###################################
// ->   READ
// ###################################
#[tracing::instrument(name = "Listing all subscribers", skip(app_state))]
pub async fn list_subscribers(
    State(app_state): State<AppState>,
) -> WebResult<Json<Vec<Subscriber>>> {
    let subscribers = app_state.store.find_all().await?;

    Ok(Json(subscribers))
}

#[tracing::instrument(name = "Listing subscriber names", skip(app_state))]
pub async fn list_subscriber_names(
    State(app_state): State<AppState>,
) -> WebResult<Json<Vec<SubscriberName>>> {
    let names = app_state.store.find_all_names().await?;

    Ok(Json(names))
}

#[tracing::instrument(name = "Fetching a subscriber", skip(app_state))]
pub async fn get_subscriber(
    State(app_state): State<AppState>,
    SubscriberId(id): SubscriberId,
) -> WebResult<Json<Subscriber>> {
    if id.is_empty() {
        return Err(Error::MissingId);
    }

    let subscriber = app_state
        .store
        .find_by_id(&id)
        .await?
        .ok_or(Error::SubscriberNotFound)?;

    Ok(Json(subscriber))
}

// ###################################
// ->   CREATE
// ###################################
#[tracing::instrument(name = "Creating a subscriber", skip(app_state, body))]
pub async fn create_subscriber(
    State(app_state): State<AppState>,
    SubscriberBody(body): SubscriberBody,
) -> WebResult<(StatusCode, Json<Subscriber>)> {
    let created = insert(&app_state, ValidSubscriber::try_from(body)?, None).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[tracing::instrument(name = "Creating a subscriber, answering with its name", skip(app_state, body))]
pub async fn create_subscriber_name(
    State(app_state): State<AppState>,
    SubscriberBody(body): SubscriberBody,
) -> WebResult<(StatusCode, Json<SubscriberName>)> {
    let created = insert(&app_state, ValidSubscriber::try_from(body)?, None).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Creates a subscriber under the id given in the path.
/// Kept for compatibility with existing clients, new clients should let the store assign ids.
#[tracing::instrument(name = "Creating a subscriber with a given id", skip(app_state, body))]
pub async fn create_subscriber_with_id(
    State(app_state): State<AppState>,
    SubscriberId(id): SubscriberId,
    SubscriberBody(body): SubscriberBody,
) -> WebResult<(StatusCode, Json<Subscriber>)> {
    let subscriber = ValidSubscriber::try_with_id(&id, body)?;
    let created = insert(&app_state, subscriber, Some(id)).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

async fn insert(
    app_state: &AppState,
    subscriber: ValidSubscriber,
    id: Option<String>,
) -> WebResult<Subscriber> {
    let created = app_state
        .store
        .create(subscriber.into_new_subscriber(id))
        .await?;
    info!(subscriber_id = %created.id, "New subscriber successfully added.");

    Ok(created)
}

// ###################################
// ->   DELETE
// ###################################
#[tracing::instrument(name = "Deleting a subscriber", skip(app_state))]
pub async fn delete_subscriber(
    State(app_state): State<AppState>,
    SubscriberId(id): SubscriberId,
) -> WebResult<Json<DeletedSubscriber>> {
    if id.is_empty() {
        return Err(Error::MissingId);
    }

    let deleted_subscriber = app_state
        .store
        .delete_by_id(&id)
        .await?
        .ok_or(Error::SubscriberNotFound)?;
    info!(subscriber_id = %deleted_subscriber.id, "Subscriber deleted.");

    Ok(Json(DeletedSubscriber {
        message: "Subscriber deleted successfully",
        deleted_subscriber,
    }))
}
