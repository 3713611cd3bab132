use axum::Json;
use axum::body::Bytes;
use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::Html;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::protocol::{
    CreateContactRequest, ErrorResponse, MSG_MISSING_PAYLOAD, MSG_UNKNOWN_ENDPOINT,
    UpdateContactRequest,
};
use crate::contacts::types::validate_number;
use crate::contacts::{Contact, ContactId, NewContact, SharedStore};

/// Decodes a JSON object body. An empty body, invalid JSON or a non-object all
/// count as a missing payload.
fn parse_payload<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    if body.is_empty() {
        return Err(ApiError::validation(MSG_MISSING_PAYLOAD));
    }
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| ApiError::validation(MSG_MISSING_PAYLOAD))?;
    if !value.is_object() {
        return Err(ApiError::validation(MSG_MISSING_PAYLOAD));
    }
    serde_json::from_value(value).map_err(|e| {
        tracing::debug!("Payload has unexpected field types: {}", e);
        ApiError::validation(MSG_MISSING_PAYLOAD)
    })
}

pub async fn handle_list_contacts(
    Extension(store): Extension<SharedStore>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = store.list().await?;
    tracing::debug!("Listing {} contacts", contacts.len());
    Ok(Json(contacts))
}

pub async fn handle_get_contact(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    let contact = store.get(&ContactId(id)).await?;
    Ok(Json(contact))
}

pub async fn handle_create_contact(
    Extension(store): Extension<SharedStore>,
    body: Bytes,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let req: CreateContactRequest = parse_payload(&body)?;

    // Absent and empty fields are rejected alike, number first.
    let contact = NewContact::new(req.name.unwrap_or_default(), req.number.unwrap_or_default());
    contact.validate()?;

    let created = store.create(contact).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn handle_update_contact(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Contact>, ApiError> {
    let req: UpdateContactRequest = parse_payload(&body)?;
    let number = req.number.unwrap_or_default();
    validate_number(&number)?;

    let updated = store.update(&ContactId(id), number).await?;
    Ok(Json(updated))
}

pub async fn handle_delete_contact(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    store.delete(&ContactId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn handle_info(
    Extension(store): Extension<SharedStore>,
) -> Result<Html<String>, ApiError> {
    let count = store.count().await?;
    let now = chrono::Local::now().format("%a %b %d %Y %H:%M:%S GMT%z");
    Ok(Html(format!(
        "<p>Phonebook has info for {} people</p><p>{}</p>",
        count, now
    )))
}

pub async fn handle_unknown_endpoint() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(MSG_UNKNOWN_ENDPOINT)),
    )
}
